//! Style constants for the chart engine.
//!
//! One authoritative table maps every series and axis role to its look, so
//! the per-kind plot modules never carry inline color literals.

use egui::Color32;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Base font size in pixels corresponding to `1em`.
pub const EM: f32 = 16.0;

/// Stroke width of every series path.
pub const SERIES_STROKE_WIDTH: f32 = 2.0;

/// Radius of the collection scatter dots.
pub const DOT_RADIUS: f32 = 6.0;

/// Tick mark length in pixels.
pub const TICK_SIZE: f32 = 6.0;

/// Gap between a tick mark and its label.
pub const TICK_PADDING: f32 = 3.0;

/// Accent used for the primary value series (voltage, equivalent waveform).
pub const ACCENT_CYAN: Color32 = Color32::from_rgb(0x03, 0xc2, 0xfc);
/// Accent used for secondary series (current, waveform B).
pub const ACCENT_ORANGE: Color32 = Color32::from_rgb(0xff, 0xa5, 0x00);
/// Color of the first STDP parent waveform.
pub const SERIES_GREEN: Color32 = Color32::from_rgb(0x00, 0x80, 0x00);

/// Every element the chart engine draws as a data series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesRole {
    WaveformA,
    WaveformB,
    Equivalent,
    Voltage,
    Current,
    CollectionDots,
    /// Horizontal reference line at conductance ratio 0.
    ReferenceX,
    /// Vertical reference line at delay 0.
    ReferenceY,
}

/// Look of one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    pub color: Color32,
    pub stroke_width: f32,
}

static SERIES_STYLES: Lazy<HashMap<SeriesRole, SeriesStyle>> = Lazy::new(|| {
    let stroke = |color| SeriesStyle {
        color,
        stroke_width: SERIES_STROKE_WIDTH,
    };
    HashMap::from([
        (SeriesRole::WaveformA, stroke(SERIES_GREEN)),
        (SeriesRole::WaveformB, stroke(ACCENT_ORANGE)),
        (SeriesRole::Equivalent, stroke(ACCENT_CYAN)),
        (SeriesRole::Voltage, stroke(ACCENT_CYAN)),
        (SeriesRole::Current, stroke(ACCENT_ORANGE)),
        (SeriesRole::CollectionDots, stroke(ACCENT_CYAN)),
        (SeriesRole::ReferenceX, stroke(Color32::WHITE)),
        (SeriesRole::ReferenceY, stroke(Color32::WHITE)),
    ])
});

/// Look up the authoritative style of a series role.
pub fn series_style(role: SeriesRole) -> SeriesStyle {
    SERIES_STYLES[&role]
}

/// The three axis slots a chart kind can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisRole {
    Left,
    Right,
    Bottom,
}

/// Look of one axis: label color and font sizes in `em`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisStyle {
    pub label_color: Color32,
    pub label_em: f32,
    pub tick_em: f32,
}

/// Axis style table: left labels cyan, right labels orange, bottom labels
/// white; labels at 2em, tick text at 1em.
pub fn axis_style(role: AxisRole) -> AxisStyle {
    let label_color = match role {
        AxisRole::Left => ACCENT_CYAN,
        AxisRole::Right => ACCENT_ORANGE,
        AxisRole::Bottom => Color32::WHITE,
    };
    AxisStyle {
        label_color,
        label_em: 2.0,
        tick_em: 1.0,
    }
}

/// Color of tick marks and tick text.
pub const TICK_COLOR: Color32 = Color32::WHITE;
