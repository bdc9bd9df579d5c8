//! Chart orchestration: one shared viewport, wheel pan, brush zoom,
//! double-click restore, and the egui painting of a [`Scene`].
//!
//! The interaction state machine per instance:
//! Idle → (wheel) → Panned → (brush end with selection) → Zoomed →
//! (double-click) → Idle. The pan offset accumulates unclamped; a zoom
//! narrows the domain and resets the offset; restore brings back the
//! original extent and animates the offset to zero.

use egui::epaint;
use egui::{Align2, Color32, Pos2, Rect, Sense, Stroke, Vec2};

use super::scene::{Scene, SeriesTransform, Shape};
use super::style::SeriesRole;
use super::{ChartData, Dimensions, Movement, Parameters};

/// Pixels of pan per wheel-delta unit divisor.
const WHEEL_PAN_DIVISOR: f64 = 10.0;

/// Interaction state of one chart instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Panned,
    Zoomed,
}

/// An in-progress rectangular brush selection, in plot-area x pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub origin: f64,
    pub current: f64,
}

impl Brush {
    /// The selected pixel range, `None` for a zero-width (click) selection.
    pub fn selection(&self) -> Option<[f64; 2]> {
        if self.origin == self.current {
            None
        } else {
            Some([
                self.origin.min(self.current),
                self.origin.max(self.current),
            ])
        }
    }
}

/// An interactive chart over one dataset.
///
/// Re-rendering is idempotent: supplying a new dataset tears the instance
/// state down and rebuilds parameters and scene from scratch.
pub struct ChartView {
    data: ChartData,
    dimensions: Dimensions,
    parameters: Option<Parameters>,
    movement: Movement,
    state: ViewState,
    brush: Option<Brush>,
    pending_animation: bool,
}

impl ChartView {
    /// Build a chart for a dataset. Invalid dimensions abort rendering of
    /// this instance silently: no scene is ever produced.
    pub fn new(data: ChartData, dimensions: Dimensions) -> ChartView {
        let parameters = dimensions
            .is_valid()
            .then(|| Parameters::compute(&data, &dimensions));
        ChartView {
            data,
            dimensions,
            parameters,
            movement: Movement::default(),
            state: ViewState::Idle,
            brush: None,
            pending_animation: false,
        }
    }

    /// Replace the dataset, discarding all viewport state.
    pub fn set_data(&mut self, data: ChartData) {
        *self = ChartView::new(data, self.dimensions);
    }

    /// Resize the chart, recomputing scales against the same dataset.
    pub fn set_dimensions(&mut self, dimensions: Dimensions) {
        if dimensions != self.dimensions {
            *self = ChartView::new(self.data.clone(), dimensions);
        }
    }

    pub fn data(&self) -> &ChartData {
        &self.data
    }

    pub fn parameters(&self) -> Option<&Parameters> {
        self.parameters.as_ref()
    }

    pub fn movement(&self) -> Movement {
        self.movement
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn brush(&self) -> Option<Brush> {
        self.brush
    }

    /// Wheel input: horizontal pan by `delta_y / 10` pixels. The zoom
    /// scale-extent is pinned to `[1, 1]`, so the wheel never zooms.
    pub fn on_wheel(&mut self, wheel_delta_y: f64) {
        if self.parameters.is_none() || wheel_delta_y == 0.0 {
            return;
        }
        self.movement.x += wheel_delta_y / WHEEL_PAN_DIVISOR;
        self.state = ViewState::Panned;
    }

    /// Begin a brush drag at an x position inside the plot area.
    pub fn on_brush_start(&mut self, x: f64) {
        if self.parameters.is_none() {
            return;
        }
        self.brush = Some(Brush { origin: x, current: x });
    }

    /// Extend the active brush.
    pub fn on_brush_move(&mut self, x: f64) {
        if let Some(brush) = &mut self.brush {
            brush.current = x;
        }
    }

    /// Finish the brush. A selection zooms the domain, resets the pan
    /// offset and replaces the brush overlay; a zero-width selection is a
    /// no-op.
    pub fn on_brush_end(&mut self) {
        let Some(brush) = self.brush.take() else {
            return;
        };
        let Some(parameters) = self.parameters.as_ref() else {
            return;
        };
        if let Some(selection) = brush.selection() {
            self.parameters = Some(parameters.zoomed(&self.movement, selection));
            self.movement.x = 0.0;
            self.state = ViewState::Zoomed;
            self.pending_animation = true;
        }
    }

    /// Double-click: restore the original domain and animate the pan offset
    /// back to zero.
    pub fn on_double_click(&mut self) {
        let Some(parameters) = self.parameters.as_ref() else {
            return;
        };
        self.parameters = Some(parameters.restored());
        self.movement = Movement::default();
        self.state = ViewState::Idle;
        self.pending_animation = true;
    }

    /// Build the frame's scene from the current snapshot: axes, paths, and
    /// the viewport transforms. Returns `None` when rendering was aborted.
    pub fn scene(&mut self) -> Option<Scene> {
        let parameters = self.parameters.as_ref()?;
        let mut scene = Scene::new();
        parameters.append_axes(&mut scene);
        parameters.append_paths(&mut scene);
        let animate = std::mem::take(&mut self.pending_animation);
        parameters.transform_movement(&mut scene, &mut self.movement, animate);
        Some(scene)
    }

    /// Render into an egui `Ui`, mapping pointer input onto the state
    /// machine and painting the resulting scene.
    pub fn ui(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let dimensions = self.dimensions;
        let outer = Vec2::new(
            (dimensions.margin.left + dimensions.width + dimensions.margin.right) as f32,
            (dimensions.margin.top + dimensions.height + dimensions.margin.bottom) as f32,
        );
        let (rect, response) = ui.allocate_exact_size(outer, Sense::click_and_drag());
        let origin = rect.min
            + Vec2::new(dimensions.margin.left as f32, dimensions.margin.top as f32);

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta);
            if scroll.y != 0.0 {
                self.on_wheel(scroll.y as f64);
            }
        }
        if response.double_clicked() {
            self.on_double_click();
        }
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.on_brush_start((pos.x - origin.x) as f64);
            }
        } else if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.on_brush_move((pos.x - origin.x) as f64);
            }
        }
        if response.drag_stopped() {
            self.on_brush_end();
        }

        let brush = self.brush;
        if let Some(scene) = self.scene() {
            paint_scene(ui, &scene, rect, origin, &dimensions);
            if let Some(brush) = brush {
                paint_brush(ui, &brush, origin, &dimensions);
            }
        }
        response
    }
}

fn role_id(response_id: egui::Id, role: SeriesRole, axis: &str) -> egui::Id {
    response_id.with((format!("{role:?}"), axis))
}

/// The transform to apply this frame, advancing any running transition.
fn animated_translate(
    ui: &egui::Ui,
    base_id: egui::Id,
    role: SeriesRole,
    transform: &SeriesTransform,
) -> Vec2 {
    let duration = transform.duration_ms as f32 / 1000.0;
    let x = ui.ctx().animate_value_with_time(
        role_id(base_id, role, "x"),
        transform.translate[0] as f32,
        duration,
    );
    let y = ui.ctx().animate_value_with_time(
        role_id(base_id, role, "y"),
        transform.translate[1] as f32,
        duration,
    );
    Vec2::new(x, y)
}

fn paint_scene(ui: &egui::Ui, scene: &Scene, rect: Rect, origin: Pos2, dimensions: &Dimensions) {
    let base_id = ui.id().with("chart");
    let axes_painter = ui.painter_at(rect);
    let plot_rect = Rect::from_min_size(
        origin,
        Vec2::new(dimensions.width as f32, dimensions.height as f32),
    );
    let series_painter = ui.painter_at(plot_rect);

    for shape in &scene.axes {
        paint_shape(ui, &axes_painter, shape, origin, Vec2::ZERO);
    }
    for shape in &scene.series {
        let role = match shape {
            Shape::Path { role, .. } | Shape::Circle { role, .. } => *role,
            Shape::Text { .. } => None,
        };
        let offset = role
            .map(|role| animated_translate(ui, base_id, role, &scene.series_transform(role)))
            .unwrap_or(Vec2::ZERO);
        paint_shape(ui, &series_painter, shape, origin, offset);
    }
}

fn paint_shape(ui: &egui::Ui, painter: &egui::Painter, shape: &Shape, origin: Pos2, offset: Vec2) {
    match shape {
        Shape::Path { points, color, width, .. } => {
            let points: Vec<Pos2> = points
                .iter()
                .map(|p| origin + Vec2::new(p[0] as f32, p[1] as f32) + offset)
                .collect();
            painter.add(epaint::PathShape::line(points, Stroke::new(*width, *color)));
        }
        Shape::Circle { center, radius, fill, .. } => {
            let center = origin + Vec2::new(center[0] as f32, center[1] as f32) + offset;
            painter.circle_filled(center, *radius, *fill);
        }
        Shape::Text { text, position, color, size, angle_deg, anchor } => {
            let position = origin + Vec2::new(position[0] as f32, position[1] as f32) + offset;
            paint_text(ui, painter, text, position, *color, *size, *angle_deg, *anchor);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn paint_text(
    ui: &egui::Ui,
    painter: &egui::Painter,
    text: &str,
    position: Pos2,
    color: Color32,
    size: f32,
    angle_deg: f32,
    anchor: Align2,
) {
    let font = egui::FontId::proportional(size);
    if angle_deg == 0.0 {
        painter.text(position, anchor, text, font, color);
        return;
    }
    // Rotated labels: lay out, then rotate the galley about its center.
    let galley = ui.fonts_mut(|fonts| fonts.layout_no_wrap(text.to_string(), font, color));
    let half = galley.size() / 2.0;
    let angle = angle_deg.to_radians();
    let (sin, cos) = angle.sin_cos();
    let offset = Vec2::new(
        -half.x * cos + half.y * sin,
        -half.x * sin - half.y * cos,
    );
    let mut text_shape = epaint::TextShape::new(position + offset, galley, color);
    text_shape.angle = angle;
    painter.add(text_shape);
}

fn paint_brush(ui: &egui::Ui, brush: &Brush, origin: Pos2, dimensions: &Dimensions) {
    let Some([start, end]) = brush.selection() else {
        return;
    };
    let rect = Rect::from_min_max(
        origin + Vec2::new(start as f32, 0.0),
        origin + Vec2::new(end as f32, dimensions.height as f32),
    );
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, egui::CornerRadius::ZERO, Color32::from_white_alpha(16));
    painter.rect_stroke(
        rect,
        egui::CornerRadius::ZERO,
        Stroke::new(1.0, Color32::from_white_alpha(96)),
        egui::StrokeKind::Inside,
    );
}
