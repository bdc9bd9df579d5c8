//! STDP delay-sweep chart kind: conductance-ratio scatter over delay.

use crate::measurement::{conductance_ratios, StdpCollectionMeasurement, StdpCollectionPoint};
use crate::units::{get_scaling, Scaling};

use super::axis;
use super::scale::{extent_or_zero, margin_time, margin_value, x_scale, y_scale, LinearScale};
use super::scene::{Scene, SeriesTransform};
use super::style::{series_style, SeriesRole, ACCENT_CYAN, ACCENT_ORANGE};
use super::{Dimensions, Movement};

const SERIES: [SeriesRole; 3] = [
    SeriesRole::CollectionDots,
    SeriesRole::ReferenceX,
    SeriesRole::ReferenceY,
];

/// Parameter snapshot of a collection chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionPlot {
    pub data: Vec<StdpCollectionPoint>,
    pub dimensions: Dimensions,
    pub delay_scaling: Scaling,
    pub x_extent_delay: [f64; 2],
    pub y_extent_ratio: [f64; 2],
    pub x_delay: LinearScale,
    pub y_ratio: LinearScale,
    pub left_axis_label: String,
    pub bottom_axis_label: String,
}

pub fn parameters(measurement: &StdpCollectionMeasurement, dimensions: &Dimensions) -> CollectionPlot {
    let data = conductance_ratios(measurement);
    let delays: Vec<f64> = data.iter().map(|p| p.delay).collect();

    let delay_scaling = get_scaling(&delays, "s", |d| *d);

    // Both extents are mirrored about zero so the origin stays centered.
    let x_extent_delay = extent_or_zero(
        delays
            .iter()
            .flat_map(|d| [-d, *d])
            .map(|d| d * delay_scaling.scaling_factor),
    );
    let mut y_extent_ratio = extent_or_zero(
        data.iter()
            .flat_map(|p| [-p.conductance_ratio, p.conductance_ratio]),
    );
    if y_extent_ratio[0].abs() + y_extent_ratio[1].abs() == 0.0 {
        y_extent_ratio = [-1.0, 1.0];
    }

    let x_delay = x_scale(x_extent_delay, margin_time(x_extent_delay), dimensions);
    let y_ratio = y_scale(y_extent_ratio, margin_value(y_extent_ratio), dimensions);

    CollectionPlot {
        data,
        dimensions: *dimensions,
        bottom_axis_label: format!("Delay ({})", delay_scaling.scale_unit),
        left_axis_label: "Conductance ratio".to_string(),
        delay_scaling,
        x_extent_delay,
        y_extent_ratio,
        x_delay,
        y_ratio,
    }
}

pub fn append_axes(plot: &CollectionPlot, scene: &mut Scene) {
    axis::append_left_axis(scene, &plot.y_ratio, &plot.dimensions, &plot.left_axis_label);
    axis::append_bottom_axis(scene, &plot.x_delay, &plot.dimensions, &plot.bottom_axis_label);
}

pub fn append_paths(plot: &CollectionPlot, scene: &mut Scene) {
    // A sweep entirely on positive delays keeps the primary accent.
    let fill = if plot.data.iter().all(|p| p.delay > 0.0) {
        ACCENT_CYAN
    } else {
        ACCENT_ORANGE
    };
    for point in &plot.data {
        scene.series_circle(
            SeriesRole::CollectionDots,
            [
                plot.x_delay
                    .scale(point.delay * plot.delay_scaling.scaling_factor),
                plot.y_ratio.scale(point.conductance_ratio),
            ],
            super::style::DOT_RADIUS,
            fill,
        );
    }

    let reference_style = series_style(SeriesRole::ReferenceY);
    scene.series_path(
        SeriesRole::ReferenceY,
        vec![
            [plot.x_delay.scale(0.0), plot.y_ratio.scale(plot.y_extent_ratio[0])],
            [plot.x_delay.scale(0.0), plot.y_ratio.scale(plot.y_extent_ratio[1])],
        ],
        reference_style.color,
        1.0,
    );
    scene.series_path(
        SeriesRole::ReferenceX,
        vec![
            [plot.x_delay.scale(plot.x_extent_delay[0]), plot.y_ratio.scale(0.0)],
            [plot.x_delay.scale(plot.x_extent_delay[1]), plot.y_ratio.scale(0.0)],
        ],
        reference_style.color,
        1.0,
    );
}

/// The scatter chart never pans: the offset is zeroed before applying.
pub fn transform_movement(scene: &mut Scene, movement: &mut Movement, animate: bool) {
    movement.x = 0.0;
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

pub fn zoomed(plot: &CollectionPlot, movement: &Movement, extent: [f64; 2]) -> CollectionPlot {
    let domain = [
        plot.x_delay.invert(extent[0] - movement.x),
        plot.x_delay.invert(extent[1] - movement.x),
    ];
    CollectionPlot {
        x_delay: plot.x_delay.with_domain(domain),
        ..plot.clone()
    }
}

pub fn restored(plot: &CollectionPlot) -> CollectionPlot {
    CollectionPlot {
        x_delay: plot.x_delay.with_domain(plot.x_extent_delay),
        ..plot.clone()
    }
}
