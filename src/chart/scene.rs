//! A retained display list for one chart frame.
//!
//! Charts redraw from scratch: every render pass builds a fresh [`Scene`]
//! from the current parameter snapshot.
//! Axis chrome and data series live in separate layers because only series
//! move with the viewport transform; the per-role [`SeriesTransform`]s carry
//! the pan offset and the transition duration the painter should apply.

use std::collections::HashMap;

use egui::{Align2, Color32};

use super::style::SeriesRole;

/// One drawable element.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A stroked, unfilled polyline in pixel coordinates.
    Path {
        role: Option<SeriesRole>,
        points: Vec<[f64; 2]>,
        color: Color32,
        width: f32,
    },
    /// A filled circle.
    Circle {
        role: Option<SeriesRole>,
        center: [f64; 2],
        radius: f32,
        fill: Color32,
    },
    /// A text label; `angle_deg` rotates about the position.
    Text {
        text: String,
        position: [f64; 2],
        color: Color32,
        size: f32,
        angle_deg: f32,
        anchor: Align2,
    },
}

/// Affine viewport transform of one series plus its transition duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesTransform {
    pub translate: [f64; 2],
    pub scale: f64,
    /// 500 for the eased brush/restore transition, 0 for immediate moves.
    pub duration_ms: u32,
}

impl Default for SeriesTransform {
    fn default() -> Self {
        SeriesTransform {
            translate: [0.0, 0.0],
            scale: 1.0,
            duration_ms: 0,
        }
    }
}

/// All shapes of one chart frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    /// Static chrome: axis lines, ticks, labels.
    pub axes: Vec<Shape>,
    /// Data series, clipped to the plot area and moved by the transforms.
    pub series: Vec<Shape>,
    pub transforms: HashMap<SeriesRole, SeriesTransform>,
}

impl Scene {
    pub fn new() -> Scene {
        Scene::default()
    }

    pub fn clear(&mut self) {
        self.axes.clear();
        self.series.clear();
        self.transforms.clear();
    }

    /// Append a series polyline.
    pub fn series_path(&mut self, role: SeriesRole, points: Vec<[f64; 2]>, color: Color32, width: f32) {
        self.series.push(Shape::Path {
            role: Some(role),
            points,
            color,
            width,
        });
    }

    /// Append a series circle.
    pub fn series_circle(&mut self, role: SeriesRole, center: [f64; 2], radius: f32, fill: Color32) {
        self.series.push(Shape::Circle {
            role: Some(role),
            center,
            radius,
            fill,
        });
    }

    /// Append an axis polyline (tick marks, axis spine).
    pub fn axis_path(&mut self, points: Vec<[f64; 2]>, color: Color32, width: f32) {
        self.axes.push(Shape::Path {
            role: None,
            points,
            color,
            width,
        });
    }

    /// Append an axis text label.
    pub fn axis_text(
        &mut self,
        text: impl Into<String>,
        position: [f64; 2],
        color: Color32,
        size: f32,
        angle_deg: f32,
        anchor: Align2,
    ) {
        self.axes.push(Shape::Text {
            text: text.into(),
            position,
            color,
            size,
            angle_deg,
            anchor,
        });
    }

    /// Set the viewport transform of one series.
    pub fn set_series_transform(&mut self, role: SeriesRole, transform: SeriesTransform) {
        self.transforms.insert(role, transform);
    }

    /// The transform of a series, identity if none was set.
    pub fn series_transform(&self, role: SeriesRole) -> SeriesTransform {
        self.transforms.get(&role).copied().unwrap_or_default()
    }
}
