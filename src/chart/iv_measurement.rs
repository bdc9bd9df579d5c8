//! IV/pulse measurement chart kind: voltage and current on twin value axes.

use crate::measurement::MeasurementData;
use crate::units::{get_scaling, Scaling};

use super::axis;
use super::scale::{extent_or_zero, margin_time, margin_value, x_scale, y_scale, LinearScale};
use super::scene::{Scene, SeriesTransform};
use super::style::{series_style, SeriesRole};
use super::{Dimensions, Movement};

const SERIES: [SeriesRole; 2] = [SeriesRole::Voltage, SeriesRole::Current];

/// Parameter snapshot of an IV measurement chart.
#[derive(Debug, Clone, PartialEq)]
pub struct IvPlot {
    pub data: MeasurementData,
    pub dimensions: Dimensions,
    pub time_scaling: Scaling,
    pub current_scaling: Scaling,
    pub x_extent_time: [f64; 2],
    pub y_extent_voltage: [f64; 2],
    pub y_extent_current: [f64; 2],
    pub x_time: LinearScale,
    pub y_voltage: LinearScale,
    pub y_current: LinearScale,
    pub left_axis_label: String,
    pub right_axis_label: String,
    pub bottom_axis_label: String,
}

pub fn parameters(data: &MeasurementData, dimensions: &Dimensions) -> IvPlot {
    let time_scaling = get_scaling(data, "s", |d| d.time);
    // Current scaling wants magnitudes, the extent keeps the sign.
    let current_scaling = get_scaling(data, "A", |d| d.current.abs());

    let x_extent_time = extent_or_zero(data.iter().map(|d| d.time * time_scaling.scaling_factor));
    let y_extent_voltage = extent_or_zero(data.iter().map(|d| d.voltage));
    let y_extent_current =
        extent_or_zero(data.iter().map(|d| d.current * current_scaling.scaling_factor));

    let x_time = x_scale(x_extent_time, margin_time(x_extent_time), dimensions);
    let y_voltage = y_scale(y_extent_voltage, margin_value(y_extent_voltage), dimensions);
    let y_current = y_scale(y_extent_current, margin_value(y_extent_current), dimensions);

    IvPlot {
        data: data.clone(),
        dimensions: *dimensions,
        bottom_axis_label: format!("Time ({})", time_scaling.scale_unit),
        right_axis_label: format!("Current ({})", current_scaling.scale_unit),
        left_axis_label: "Voltage (V)".to_string(),
        time_scaling,
        current_scaling,
        x_extent_time,
        y_extent_voltage,
        y_extent_current,
        x_time,
        y_voltage,
        y_current,
    }
}

pub fn append_axes(plot: &IvPlot, scene: &mut Scene) {
    axis::append_right_axis(scene, &plot.y_current, &plot.dimensions, &plot.right_axis_label);
    axis::append_left_axis(scene, &plot.y_voltage, &plot.dimensions, &plot.left_axis_label);
    axis::append_bottom_axis(scene, &plot.x_time, &plot.dimensions, &plot.bottom_axis_label);
}

pub fn append_paths(plot: &IvPlot, scene: &mut Scene) {
    let voltage_style = series_style(SeriesRole::Voltage);
    let voltage_points = plot
        .data
        .iter()
        .map(|d| {
            [
                plot.x_time.scale(d.time * plot.time_scaling.scaling_factor),
                plot.y_voltage.scale(d.voltage),
            ]
        })
        .collect();
    scene.series_path(
        SeriesRole::Voltage,
        voltage_points,
        voltage_style.color,
        voltage_style.stroke_width,
    );

    let current_style = series_style(SeriesRole::Current);
    let current_points = plot
        .data
        .iter()
        .map(|d| {
            [
                plot.x_time.scale(d.time * plot.time_scaling.scaling_factor),
                plot.y_current
                    .scale(d.current * plot.current_scaling.scaling_factor),
            ]
        })
        .collect();
    scene.series_path(
        SeriesRole::Current,
        current_points,
        current_style.color,
        current_style.stroke_width,
    );
}

pub fn transform_movement(scene: &mut Scene, movement: &mut Movement, animate: bool) {
    for role in SERIES {
        scene.set_series_transform(
            role,
            SeriesTransform {
                translate: [movement.x, movement.y],
                scale: movement.k,
                duration_ms: if animate { 500 } else { 0 },
            },
        );
    }
}

pub fn zoomed(plot: &IvPlot, movement: &Movement, extent: [f64; 2]) -> IvPlot {
    let domain = [
        plot.x_time.invert(extent[0] - movement.x),
        plot.x_time.invert(extent[1] - movement.x),
    ];
    IvPlot {
        x_time: plot.x_time.with_domain(domain),
        ..plot.clone()
    }
}

pub fn restored(plot: &IvPlot) -> IvPlot {
    IvPlot {
        x_time: plot.x_time.with_domain(plot.x_extent_time),
        ..plot.clone()
    }
}
