//! STDP pulse pair generator.
//!
//! The protocol drives two identical triangular pulses, one delayed against
//! the other; their net effect on the device is the `equivalent` waveform,
//! built from the same parameters by a closed-form construction (it is not a
//! superposition of the parents).

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::noise::resample_with_noise;
use super::{StdpType, StdpWaveform, VoltagePoint, VoltageWaveform};

/// Width of the instantaneous transitions in the emitted waveforms.
pub const EPSILON_STEP: f64 = 1e-8;

/// Parameters of an STDP pulse pair. Times are seconds, voltages volts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StdpParams {
    pub delay: f64,
    pub amplitude: f64,
    pub pulse_duration: f64,
    pub wait_time: f64,
    pub stdp_type: StdpType,
    /// Resample the equivalent waveform and add Gaussian noise.
    pub noise: bool,
    /// Noise standard deviation in volts.
    pub noise_std: f64,
    /// Sample count used by the noise resampler.
    pub n_points: usize,
}

/// Voltage of the high plateaus of the equivalent waveform (unsigned).
pub fn constant_v_high(amplitude: f64, pulse_duration: f64, delay: f64) -> f64 {
    (amplitude / 2.0) / (pulse_duration / 2.0) * delay
}

/// Depth of the cutting ramp between the two high plateaus (unsigned).
pub fn cutting_v(amplitude: f64, pulse_duration: f64, delay: f64) -> f64 {
    (amplitude / 2.0) / (pulse_duration / 2.0) * (pulse_duration / 2.0 - delay)
}

/// Voltage of the cutting plateau of the equivalent waveform (unsigned).
pub fn constant_v_low(amplitude: f64, pulse_duration: f64, delay: f64) -> f64 {
    -cutting_v(amplitude, pulse_duration, delay) - amplitude / 2.0
}

/// Largest voltage the equivalent waveform reaches for these parameters.
///
/// Bounds the amplitude sliders in the UI; the selection by `stdp_type`
/// mirrors the sign convention of the construction.
pub fn max_v(params: &StdpParams) -> f64 {
    let high = constant_v_high(params.amplitude, params.pulse_duration, params.delay);
    let low = constant_v_low(params.amplitude, params.pulse_duration, params.delay);
    match params.stdp_type {
        StdpType::Depression => high.abs(),
        StdpType::Potenciation => low.abs(),
    }
}

/// Most negative voltage the equivalent waveform reaches.
pub fn min_v(params: &StdpParams) -> f64 {
    let high = constant_v_high(params.amplitude, params.pulse_duration, params.delay);
    let low = constant_v_low(params.amplitude, params.pulse_duration, params.delay);
    match params.stdp_type {
        StdpType::Depression => -low.abs(),
        StdpType::Potenciation => -high.abs(),
    }
}

/// One parent pulse: flat, triangular up/down swing, flat.
fn parent_waveform(params: &StdpParams, extra_delay: f64) -> VoltageWaveform {
    let multiplier = params.stdp_type.multiplier();
    let half = params.pulse_duration / 2.0;

    let mut waveform = Vec::with_capacity(6);
    let mut time = 0.0;
    waveform.push(VoltagePoint { time, voltage: 0.0 });
    time += params.wait_time + extra_delay;
    waveform.push(VoltagePoint { time, voltage: 0.0 });
    time += half;
    waveform.push(VoltagePoint { time, voltage: params.amplitude / 2.0 * multiplier });
    time += EPSILON_STEP;
    waveform.push(VoltagePoint { time, voltage: -params.amplitude / 2.0 * multiplier });
    time += half;
    waveform.push(VoltagePoint { time, voltage: 0.0 });
    time += params.wait_time;
    waveform.push(VoltagePoint { time, voltage: 0.0 });
    waveform
}

/// The analytic net-effect waveform.
///
/// For `delay != 0` the two high plateaus at `constant_v_high` are bridged
/// by a cutting plateau at `-cutting_v - amplitude/2`, entered and left
/// through [`EPSILON_STEP`]-wide transitions (10 points). For `delay == 0`
/// the cutting plateau and its transitions vanish and the plateaus join
/// directly (8 points), keeping the total duration at exactly
/// `2·wait_time + delay + pulse_duration`.
fn equivalent_waveform(params: &StdpParams) -> VoltageWaveform {
    let multiplier = params.stdp_type.multiplier();
    let half = params.pulse_duration / 2.0;
    let v_high = constant_v_high(params.amplitude, params.pulse_duration, params.delay) * multiplier;
    let v_cut = constant_v_low(params.amplitude, params.pulse_duration, params.delay) * multiplier;

    let mut waveform = Vec::with_capacity(10);
    let mut time = 0.0;
    waveform.push(VoltagePoint { time, voltage: 0.0 });
    time += params.wait_time;
    waveform.push(VoltagePoint { time, voltage: 0.0 });

    // First ramp and high plateau
    time += params.delay;
    waveform.push(VoltagePoint { time, voltage: v_high });
    time += half - params.delay;
    waveform.push(VoltagePoint { time, voltage: v_high });

    if params.delay != 0.0 {
        // Cutting plateau
        time += EPSILON_STEP;
        waveform.push(VoltagePoint { time, voltage: v_cut });
        time += params.delay;
        waveform.push(VoltagePoint { time, voltage: v_cut });
        // Second high plateau
        time += EPSILON_STEP;
        waveform.push(VoltagePoint { time, voltage: v_high });
        time += half - params.delay;
        waveform.push(VoltagePoint { time, voltage: v_high });
    } else {
        waveform.push(VoltagePoint { time, voltage: v_high });
        time += half;
        waveform.push(VoltagePoint { time, voltage: v_high });
    }

    // Final ramp and tail
    time += params.delay;
    waveform.push(VoltagePoint { time, voltage: 0.0 });
    time += params.wait_time;
    waveform.push(VoltagePoint { time, voltage: 0.0 });
    waveform
}

/// Total analytic duration of the equivalent waveform.
fn total_duration(params: &StdpParams) -> f64 {
    2.0 * params.wait_time + params.delay + params.pulse_duration
}

/// Generate the STDP pulse pair with an explicit random source.
///
/// The parents are never resampled; when `params.noise` is set the
/// equivalent waveform is replaced by its noisy resampling.
pub fn stdp_waveform_with_rng<R: Rng + ?Sized>(params: &StdpParams, rng: &mut R) -> StdpWaveform {
    let waveform_a = {
        let mut parent = parent_waveform(params, 0.0);
        // Trailing point so both parents span the same total duration.
        let last_time = parent.last().map(|p| p.time).unwrap_or(0.0);
        parent.push(VoltagePoint { time: last_time + params.delay, voltage: 0.0 });
        parent
    };
    let waveform_b = parent_waveform(params, params.delay);

    let mut equivalent = equivalent_waveform(params);
    if params.noise {
        equivalent = resample_with_noise(
            &equivalent,
            params.n_points,
            total_duration(params),
            params.noise_std,
            rng,
        );
    }

    StdpWaveform {
        waveform_a,
        waveform_b,
        equivalent,
    }
}

/// Generate the STDP pulse pair using the thread-local random source.
pub fn stdp_waveform(params: &StdpParams) -> StdpWaveform {
    stdp_waveform_with_rng(params, &mut rand::thread_rng())
}
