//! The chart engine.
//!
//! Four dataset kinds share one capability set: compute parameter snapshots
//! (scales, extents, labels), append axes and series to a [`scene::Scene`],
//! re-apply the viewport transform, zoom to a brushed pixel range, and
//! restore the original domain. Dispatch is a tagged union: [`ChartData`]
//! names the kind, [`Parameters`] holds the per-kind snapshot, and the
//! orchestrating [`view::ChartView`] matches on it once per operation.

pub mod axis;
pub mod iv_measurement;
pub mod scale;
pub mod scene;
pub mod stdp;
pub mod stdp_collection;
pub mod style;
pub mod view;
pub mod voltage;

use serde::{Deserialize, Serialize};

use crate::measurement::{MeasurementData, StdpCollectionMeasurement};
use crate::waveform::{StdpWaveform, VoltageWaveform};

use scene::Scene;

/// Pixel margins around the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Pixel geometry of one chart, supplied by the embedding UI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Plot area width, excluding margins.
    pub width: f64,
    /// Plot area height, excluding margins.
    pub height: f64,
    pub margin: Margin,
}

impl Dimensions {
    /// Rendering is aborted for dimensions that cannot produce a scale.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
            && [self.margin.top, self.margin.right, self.margin.bottom, self.margin.left]
                .iter()
                .all(|m| m.is_finite())
    }
}

/// Shared viewport transform of one chart instance. `k` is pinned to 1:
/// wheel zooming is disabled by design, only panning moves the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Movement {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for Movement {
    fn default() -> Self {
        Movement { k: 1.0, x: 0.0, y: 0.0 }
    }
}

/// A dataset tagged with its chart kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    Voltage(VoltageWaveform),
    Stdp(StdpWaveform),
    StdpCollection(StdpCollectionMeasurement),
    IvMeasurement(MeasurementData),
}

/// Per-kind parameter snapshot.
///
/// Snapshots are immutable: [`Parameters::zoomed`] and
/// [`Parameters::restored`] return new values instead of mutating scales in
/// place, so the view can hold the current snapshot and the original extent
/// side by side without shared state.
#[derive(Debug, Clone, PartialEq)]
pub enum Parameters {
    Voltage(voltage::VoltagePlot),
    Stdp(stdp::StdpPlot),
    StdpCollection(stdp_collection::CollectionPlot),
    IvMeasurement(iv_measurement::IvPlot),
}

impl Parameters {
    /// Compute the snapshot for a dataset. Empty and degenerate datasets
    /// produce `[0, 0]` extents rather than failing.
    pub fn compute(data: &ChartData, dimensions: &Dimensions) -> Parameters {
        match data {
            ChartData::Voltage(waveform) => {
                Parameters::Voltage(voltage::parameters(waveform, dimensions))
            }
            ChartData::Stdp(waveform) => Parameters::Stdp(stdp::parameters(waveform, dimensions)),
            ChartData::StdpCollection(measurement) => {
                Parameters::StdpCollection(stdp_collection::parameters(measurement, dimensions))
            }
            ChartData::IvMeasurement(data) => {
                Parameters::IvMeasurement(iv_measurement::parameters(data, dimensions))
            }
        }
    }

    /// Draw the tick axes and titles this kind needs.
    pub fn append_axes(&self, scene: &mut Scene) {
        match self {
            Parameters::Voltage(plot) => voltage::append_axes(plot, scene),
            Parameters::Stdp(plot) => stdp::append_axes(plot, scene),
            Parameters::StdpCollection(plot) => stdp_collection::append_axes(plot, scene),
            Parameters::IvMeasurement(plot) => iv_measurement::append_axes(plot, scene),
        }
    }

    /// Draw one stroked path (or dot cloud) per series.
    pub fn append_paths(&self, scene: &mut Scene) {
        match self {
            Parameters::Voltage(plot) => voltage::append_paths(plot, scene),
            Parameters::Stdp(plot) => stdp::append_paths(plot, scene),
            Parameters::StdpCollection(plot) => stdp_collection::append_paths(plot, scene),
            Parameters::IvMeasurement(plot) => iv_measurement::append_paths(plot, scene),
        }
    }

    /// Re-apply the viewport transform to every series; `animate` selects
    /// the 500 ms eased transition over an immediate update.
    pub fn transform_movement(&self, scene: &mut Scene, movement: &mut Movement, animate: bool) {
        match self {
            Parameters::Voltage(_) => voltage::transform_movement(scene, movement, animate),
            Parameters::Stdp(_) => stdp::transform_movement(scene, movement, animate),
            Parameters::StdpCollection(_) => {
                stdp_collection::transform_movement(scene, movement, animate)
            }
            Parameters::IvMeasurement(_) => {
                iv_measurement::transform_movement(scene, movement, animate)
            }
        }
    }

    /// New snapshot zoomed to a brushed pixel range, compensating the
    /// current pan offset before inverting the scale.
    pub fn zoomed(&self, movement: &Movement, extent: [f64; 2]) -> Parameters {
        match self {
            Parameters::Voltage(plot) => Parameters::Voltage(voltage::zoomed(plot, movement, extent)),
            Parameters::Stdp(plot) => Parameters::Stdp(stdp::zoomed(plot, movement, extent)),
            Parameters::StdpCollection(plot) => {
                Parameters::StdpCollection(stdp_collection::zoomed(plot, movement, extent))
            }
            Parameters::IvMeasurement(plot) => {
                Parameters::IvMeasurement(iv_measurement::zoomed(plot, movement, extent))
            }
        }
    }

    /// New snapshot with the domain reset to the extent computed at
    /// parameter time.
    pub fn restored(&self) -> Parameters {
        match self {
            Parameters::Voltage(plot) => Parameters::Voltage(voltage::restored(plot)),
            Parameters::Stdp(plot) => Parameters::Stdp(stdp::restored(plot)),
            Parameters::StdpCollection(plot) => {
                Parameters::StdpCollection(stdp_collection::restored(plot))
            }
            Parameters::IvMeasurement(plot) => {
                Parameters::IvMeasurement(iv_measurement::restored(plot))
            }
        }
    }

    /// The horizontal scale driving zoom and pan for this kind.
    pub fn x_scale(&self) -> scale::LinearScale {
        match self {
            Parameters::Voltage(plot) => plot.x_time,
            Parameters::Stdp(plot) => plot.x_time,
            Parameters::StdpCollection(plot) => plot.x_delay,
            Parameters::IvMeasurement(plot) => plot.x_time,
        }
    }
}
