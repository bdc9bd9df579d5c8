//! Waveform synthesis: parameter records in, point sequences out.
//!
//! All generators are pure and deterministic apart from the optional noise
//! path, which takes an injectable random source (see [`noise`]). Times are
//! seconds, voltages volts; duplicate times encode instantaneous transitions
//! and are preserved as-is.

pub mod noise;
pub mod pulse;
pub mod stdp;

use serde::{Deserialize, Serialize};

pub use pulse::{pulse_train, PulseTrainParams};
pub use stdp::{
    constant_v_high, constant_v_low, cutting_v, max_v, min_v, stdp_waveform,
    stdp_waveform_with_rng, StdpParams, EPSILON_STEP,
};

/// One sample of a voltage waveform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoltagePoint {
    pub time: f64,
    pub voltage: f64,
}

/// Ordered sequence of [`VoltagePoint`]s with non-decreasing time.
pub type VoltageWaveform = Vec<VoltagePoint>;

/// The two STDP protocol polarities.
///
/// `Potenciation` is the historical wire spelling; it is kept verbatim so
/// serialized requests stay compatible with the instrument backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StdpType {
    Depression,
    Potenciation,
}

impl StdpType {
    /// Sign applied to every plateau voltage of the construction.
    pub fn multiplier(self) -> f64 {
        match self {
            StdpType::Depression => 1.0,
            StdpType::Potenciation => -1.0,
        }
    }
}

/// The STDP pulse pair: two time-shifted parents and the analytically
/// combined equivalent waveform sent to the instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StdpWaveform {
    pub waveform_a: VoltageWaveform,
    pub waveform_b: VoltageWaveform,
    pub equivalent: VoltageWaveform,
}
