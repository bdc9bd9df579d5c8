//! Wire contract with the instrument-control backend.
//!
//! Everything here mirrors the JSON the backend speaks: camelCase fields,
//! fully-resolved SI values (no unit suffixes), and the historical
//! `Potenciation` spelling. The only computation is the STDP collection
//! reduction to conductance-ratio points.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::waveform::StdpType;

/// One backend-measured sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementPoint {
    pub time: f64,
    pub voltage: f64,
    pub current: f64,
}

/// A backend time series.
pub type MeasurementData = Vec<MeasurementPoint>;

/// Lifecycle of a submitted measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasurementStatus {
    InProgress,
    Done,
    Error,
}

impl MeasurementStatus {
    /// Terminal states stop the polling loop.
    pub fn is_terminal(self) -> bool {
        matches!(self, MeasurementStatus::Done | MeasurementStatus::Error)
    }
}

/// Measurement families the backend knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasurementCategory {
    Pulse,
    Stdp,
    StdpCollection,
    Conductance,
}

/// A single-pair STDP result: the IV trace plus the derived conductance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StdpMeasurement {
    pub conductance: f64,
    #[serde(default)]
    pub iv: MeasurementData,
}

/// One entry of a delay-sweep collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StdpCollectionEntry {
    pub stdp_measurement: StdpMeasurement,
    pub delay: f64,
}

/// A full delay-sweep: baseline conductance plus one STDP measurement per
/// delay value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StdpCollectionMeasurement {
    pub base_conductance: f64,
    pub collection: Vec<StdpCollectionEntry>,
}

/// Derived point of the collection chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StdpCollectionPoint {
    pub delay: f64,
    pub conductance_ratio: f64,
}

/// Reduce a collection measurement to `(delay, (g - g0)/g0)` points.
///
/// A zero `base_conductance` propagates NaN/∞ into the ratios; the chart
/// layer maps non-finite extents to empty.
pub fn conductance_ratios(measurement: &StdpCollectionMeasurement) -> Vec<StdpCollectionPoint> {
    measurement
        .collection
        .iter()
        .map(|entry| StdpCollectionPoint {
            delay: entry.delay,
            conductance_ratio: (entry.stdp_measurement.conductance - measurement.base_conductance)
                / measurement.base_conductance,
        })
        .collect()
}

/// Terminal payload of a measurement record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeasurementPayload {
    /// IV/pulse time series.
    Points(MeasurementData),
    /// Single STDP pair result.
    Stdp(StdpMeasurement),
    /// Delay-sweep collection.
    StdpCollection(StdpCollectionMeasurement),
}

/// The polled measurement record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub id: u64,
    pub status: MeasurementStatus,
    pub date: DateTime<Utc>,
    pub category: MeasurementCategory,
    /// The request parameters as submitted, echoed back verbatim.
    pub parameters: serde_json::Value,
    pub data: Option<MeasurementPayload>,
}

/// Body of `POST measurements/pulse`. Note `duty_cycle` is a fraction
/// (0..=1) on the wire while [`crate::waveform::PulseTrainParams`] carries
/// percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PulseRequest {
    pub v_high: f64,
    pub v_low: f64,
    pub cycle_time: f64,
    pub duty_cycle: f64,
    pub n_pulses: u32,
    pub n_points_high: u32,
    pub n_points_low: u32,
    pub avg_time: f64,
    pub noise: bool,
    pub noise_std: f64,
}

/// Body of `POST measurements/stdp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StdpRequest {
    pub amplitude: f64,
    pub delay: f64,
    pub wait_time: f64,
    pub pulse_duration: f64,
    pub n_points: usize,
    pub stdp_type: StdpType,
    pub avg_time: f64,
    pub noise: bool,
    pub noise_std: f64,
}

/// Body of `POST measurements/stdp-collection`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StdpCollectionRequest {
    pub amplitude: f64,
    pub delay_points: u32,
    pub wait_time: f64,
    pub pulse_duration: f64,
    pub stdp_type: StdpType,
    pub n_points: usize,
    pub avg_time: f64,
    pub noise: bool,
    pub noise_std: f64,
}

/// Response of the submit endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementRef {
    pub id: u64,
}

/// Response of `POST measurements/conductance`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConductanceReading {
    pub conductance: f64,
}
