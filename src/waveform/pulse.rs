//! Rectangular pulse train generator.

use serde::{Deserialize, Serialize};

use super::{VoltagePoint, VoltageWaveform};

/// Parameters of a rectangular pulse train.
///
/// `n_points_high` / `n_points_low` are the sampling-point counts forwarded
/// to the instrument; the preview emits only the four corner points of each
/// cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PulseTrainParams {
    pub v_high: f64,
    pub v_low: f64,
    pub n_pulses: u32,
    /// Duty cycle in percent, 0..=100.
    pub duty_cycle: f64,
    /// Cycle period in seconds.
    pub cycle_time: f64,
    pub n_points_high: u32,
    pub n_points_low: u32,
}

/// Generate the corner-point waveform of a pulse train.
///
/// Each cycle contributes four points: high at 0 and `time_high`, low at
/// `time_high` and `cycle_time`, where `time_high = cycle_time·duty/100`.
/// Cycles are replicated with a `cycle_time` offset, so the output has
/// exactly `4·n_pulses` points. Degenerate duty cycles (0 or 100) collapse
/// `time_high` onto a cycle edge; the duplicate times are kept.
pub fn pulse_train(params: &PulseTrainParams) -> VoltageWaveform {
    let time_high = params.cycle_time * params.duty_cycle / 100.0;
    let cycle = [
        VoltagePoint { time: 0.0, voltage: params.v_high },
        VoltagePoint { time: time_high, voltage: params.v_high },
        VoltagePoint { time: time_high, voltage: params.v_low },
        VoltagePoint { time: params.cycle_time, voltage: params.v_low },
    ];

    let mut waveform = Vec::with_capacity(4 * params.n_pulses as usize);
    for i in 0..params.n_pulses {
        let offset = params.cycle_time * i as f64;
        waveform.extend(cycle.iter().map(|point| VoltagePoint {
            time: point.time + offset,
            voltage: point.voltage,
        }));
    }
    waveform
}
