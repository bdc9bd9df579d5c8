//! STDP pulse-pair chart kind: parents A/B plus the equivalent waveform.

use crate::units::{get_scaling, Scaling};
use crate::waveform::{StdpWaveform, VoltageWaveform};

use super::axis;
use super::scale::{extent_or_zero, margin_time, margin_value, x_scale, y_scale, LinearScale};
use super::scene::{Scene, SeriesTransform};
use super::style::{series_style, SeriesRole};
use super::{Dimensions, Movement};

/// The three series of this kind, in draw order.
const SERIES: [SeriesRole; 3] = [
    SeriesRole::WaveformA,
    SeriesRole::WaveformB,
    SeriesRole::Equivalent,
];

/// Parameter snapshot of an STDP chart.
#[derive(Debug, Clone, PartialEq)]
pub struct StdpPlot {
    pub data: StdpWaveform,
    pub dimensions: Dimensions,
    pub time_scaling: Scaling,
    pub x_extent_time: [f64; 2],
    pub y_extent_voltage: [f64; 2],
    pub x_time: LinearScale,
    pub y_voltage: LinearScale,
    pub left_axis_label: String,
    pub bottom_axis_label: String,
}

pub fn parameters(data: &StdpWaveform, dimensions: &Dimensions) -> StdpPlot {
    // Scales and extents span all three series together.
    let times: Vec<f64> = data
        .equivalent
        .iter()
        .chain(&data.waveform_a)
        .chain(&data.waveform_b)
        .map(|d| d.time)
        .collect();
    let voltages: Vec<f64> = data
        .equivalent
        .iter()
        .chain(&data.waveform_a)
        .chain(&data.waveform_b)
        .map(|d| d.voltage)
        .collect();

    let time_scaling = get_scaling(&times, "s", |t| *t);

    let x_extent_time = extent_or_zero(times.iter().map(|t| t * time_scaling.scaling_factor));
    let y_extent_voltage = extent_or_zero(voltages.iter().copied());

    let x_time = x_scale(x_extent_time, margin_time(x_extent_time), dimensions);
    let y_voltage = y_scale(y_extent_voltage, margin_value(y_extent_voltage), dimensions);

    StdpPlot {
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

pub fn append_axes(plot: &StdpPlot, scene: &mut Scene) {
    axis::append_left_axis(scene, &plot.y_voltage, &plot.dimensions, &plot.left_axis_label);
    axis::append_bottom_axis(scene, &plot.x_time, &plot.dimensions, &plot.bottom_axis_label);
}

fn waveform_of(plot: &StdpPlot, role: SeriesRole) -> &VoltageWaveform {
    match role {
        SeriesRole::WaveformA => &plot.data.waveform_a,
        SeriesRole::WaveformB => &plot.data.waveform_b,
        _ => &plot.data.equivalent,
    }
}

pub fn append_paths(plot: &StdpPlot, scene: &mut Scene) {
    for role in SERIES {
        let style = series_style(role);
        let points = waveform_of(plot, role)
            .iter()
            .map(|d| {
                [
                    plot.x_time.scale(d.time * plot.time_scaling.scaling_factor),
                    plot.y_voltage.scale(d.voltage),
                ]
            })
            .collect();
        scene.series_path(role, points, style.color, style.stroke_width);
    }
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

pub fn zoomed(plot: &StdpPlot, movement: &Movement, extent: [f64; 2]) -> StdpPlot {
    let domain = [
        plot.x_time.invert(extent[0] - movement.x),
        plot.x_time.invert(extent[1] - movement.x),
    ];
    StdpPlot {
        x_time: plot.x_time.with_domain(domain),
        ..plot.clone()
    }
}

pub fn restored(plot: &StdpPlot) -> StdpPlot {
    StdpPlot {
        x_time: plot.x_time.with_domain(plot.x_extent_time),
        ..plot.clone()
    }
}
