//! Axis geometry: spines, tick marks, tick labels and axis titles.

use egui::Align2;

use super::scale::{tick_step, LinearScale};
use super::scene::Scene;
use super::style::{axis_style, AxisRole, EM, TICK_COLOR, TICK_PADDING, TICK_SIZE};
use super::Dimensions;

/// Target tick count per axis.
pub const TICK_COUNT: usize = 10;

/// Format a tick value with just enough decimals for the tick step.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 || step <= 0.0 || !step.is_finite() {
        0
    } else {
        (-step.log10().floor() as usize).min(10)
    };
    let text = format!("{value:.decimals$}");
    // A rounded-away sign would print as "-0".
    if text.starts_with('-') && text.trim_start_matches(['-', '0', '.']).is_empty() {
        text[1..].to_string()
    } else {
        text
    }
}

fn label_step(scale: &LinearScale) -> f64 {
    let (lo, hi) = if scale.domain[0] <= scale.domain[1] {
        (scale.domain[0], scale.domain[1])
    } else {
        (scale.domain[1], scale.domain[0])
    };
    tick_step(lo, hi, TICK_COUNT)
}

/// Bottom tick axis plus its title, drawn along the lower plot edge.
pub fn append_bottom_axis(scene: &mut Scene, scale: &LinearScale, dimensions: &Dimensions, label: &str) {
    let style = axis_style(AxisRole::Bottom);
    let height = dimensions.height;
    let step = label_step(scale);

    scene.axis_path(
        vec![[0.0, height], [dimensions.width, height]],
        TICK_COLOR,
        1.0,
    );
    for tick in scale.ticks(TICK_COUNT) {
        let x = scale.scale(tick);
        scene.axis_path(
            vec![[x, height], [x, height + TICK_SIZE as f64]],
            TICK_COLOR,
            1.0,
        );
        scene.axis_text(
            format_tick(tick, step),
            [x, height + (TICK_SIZE + TICK_PADDING) as f64],
            TICK_COLOR,
            style.tick_em * EM,
            0.0,
            Align2::CENTER_TOP,
        );
    }
    scene.axis_text(
        label,
        [dimensions.width / 2.0, height + 30.0],
        style.label_color,
        style.label_em * EM,
        0.0,
        Align2::CENTER_TOP,
    );
}

/// Left tick axis plus its rotated title.
pub fn append_left_axis(scene: &mut Scene, scale: &LinearScale, dimensions: &Dimensions, label: &str) {
    let style = axis_style(AxisRole::Left);
    let step = label_step(scale);

    scene.axis_path(vec![[0.0, 0.0], [0.0, dimensions.height]], TICK_COLOR, 1.0);
    for tick in scale.ticks(TICK_COUNT) {
        let y = scale.scale(tick);
        scene.axis_path(vec![[-(TICK_SIZE as f64), y], [0.0, y]], TICK_COLOR, 1.0);
        scene.axis_text(
            format_tick(tick, step),
            [-((TICK_SIZE + TICK_PADDING) as f64), y],
            TICK_COLOR,
            style.tick_em * EM,
            0.0,
            Align2::RIGHT_CENTER,
        );
    }
    scene.axis_text(
        label,
        [
            -dimensions.margin.left * 0.8 + EM as f64,
            dimensions.height / 2.0,
        ],
        style.label_color,
        style.label_em * EM,
        -90.0,
        Align2::CENTER_CENTER,
    );
}

/// Right tick axis plus its rotated title.
pub fn append_right_axis(scene: &mut Scene, scale: &LinearScale, dimensions: &Dimensions, label: &str) {
    let style = axis_style(AxisRole::Right);
    let width = dimensions.width;
    let step = label_step(scale);

    scene.axis_path(vec![[width, 0.0], [width, dimensions.height]], TICK_COLOR, 1.0);
    for tick in scale.ticks(TICK_COUNT) {
        let y = scale.scale(tick);
        scene.axis_path(
            vec![[width, y], [width + TICK_SIZE as f64, y]],
            TICK_COLOR,
            1.0,
        );
        scene.axis_text(
            format_tick(tick, step),
            [width + (TICK_SIZE + TICK_PADDING) as f64, y],
            TICK_COLOR,
            style.tick_em * EM,
            0.0,
            Align2::LEFT_CENTER,
        );
    }
    scene.axis_text(
        label,
        [
            width + dimensions.margin.left * 0.8 - EM as f64,
            dimensions.height / 2.0,
        ],
        style.label_color,
        style.label_em * EM,
        90.0,
        Align2::CENTER_CENTER,
    );
}
