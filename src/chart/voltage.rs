//! Plain voltage-waveform chart kind (preview of a synthesized waveform).

use crate::units::{get_scaling, Scaling};
use crate::waveform::VoltageWaveform;

use super::axis;
use super::scale::{extent_or_zero, margin_time, margin_value, x_scale, y_scale, LinearScale};
use super::scene::{Scene, SeriesTransform};
use super::style::{series_style, SeriesRole};
use super::{Dimensions, Movement};

/// Parameter snapshot of a voltage chart.
#[derive(Debug, Clone, PartialEq)]
pub struct VoltagePlot {
    pub data: VoltageWaveform,
    pub dimensions: Dimensions,
    pub time_scaling: Scaling,
    pub x_extent_time: [f64; 2],
    pub y_extent_voltage: [f64; 2],
    pub x_time: LinearScale,
    pub y_voltage: LinearScale,
    pub left_axis_label: String,
    pub bottom_axis_label: String,
}

pub fn parameters(data: &VoltageWaveform, dimensions: &Dimensions) -> VoltagePlot {
    let time_scaling = get_scaling(data, "s", |d| d.time);

    let x_extent_time = extent_or_zero(data.iter().map(|d| d.time * time_scaling.scaling_factor));
    let y_extent_voltage = extent_or_zero(data.iter().map(|d| d.voltage));

    let x_time = x_scale(x_extent_time, margin_time(x_extent_time), dimensions);
    let y_voltage = y_scale(y_extent_voltage, margin_value(y_extent_voltage), dimensions);

    VoltagePlot {
        data: data.clone(),
        dimensions: *dimensions,
        bottom_axis_label: format!("Time ({})", time_scaling.scale_unit),
        left_axis_label: "Voltage (V)".to_string(),
        time_scaling,
        x_extent_time,
        y_extent_voltage,
        x_time,
        y_voltage,
    }
}

pub fn append_axes(plot: &VoltagePlot, scene: &mut Scene) {
    axis::append_left_axis(scene, &plot.y_voltage, &plot.dimensions, &plot.left_axis_label);
    axis::append_bottom_axis(scene, &plot.x_time, &plot.dimensions, &plot.bottom_axis_label);
}

pub fn append_paths(plot: &VoltagePlot, scene: &mut Scene) {
    let style = series_style(SeriesRole::Voltage);
    let points = plot
        .data
        .iter()
        .map(|d| {
            [
                plot.x_time.scale(d.time * plot.time_scaling.scaling_factor),
                plot.y_voltage.scale(d.voltage),
            ]
        })
        .collect();
    scene.series_path(SeriesRole::Voltage, points, style.color, style.stroke_width);
}

pub fn transform_movement(scene: &mut Scene, movement: &mut Movement, animate: bool) {
    scene.set_series_transform(
        SeriesRole::Voltage,
        SeriesTransform {
            translate: [movement.x, movement.y],
            scale: movement.k,
            duration_ms: if animate { 500 } else { 0 },
        },
    );
}

/// New snapshot with the time domain narrowed to the brushed pixel range.
pub fn zoomed(plot: &VoltagePlot, movement: &Movement, extent: [f64; 2]) -> VoltagePlot {
    let domain = [
        plot.x_time.invert(extent[0] - movement.x),
        plot.x_time.invert(extent[1] - movement.x),
    ];
    VoltagePlot {
        x_time: plot.x_time.with_domain(domain),
        ..plot.clone()
    }
}

/// New snapshot with the full time extent restored.
pub fn restored(plot: &VoltagePlot) -> VoltagePlot {
    VoltagePlot {
        x_time: plot.x_time.with_domain(plot.x_extent_time),
        ..plot.clone()
    }
}
