//! Uniform resampling with additive Gaussian noise.
//!
//! The analytic equivalent waveform is a handful of breakpoints; to add
//! noise it is first upsampled to `n_points` evenly spaced samples by linear
//! interpolation, then each sample gets an independent draw from
//! `N(0, noise_std²)`.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use super::{VoltagePoint, VoltageWaveform};

/// Resample `waveform` at `n_points` uniform times over `[0, total_time]`
/// and add Gaussian noise with standard deviation `noise_std`.
///
/// Inputs with fewer than two breakpoints (or fewer than two requested
/// samples) are returned unchanged; a non-positive `noise_std` resamples
/// without noise. Zero-width segments (instantaneous transitions) evaluate
/// to their right endpoint.
pub fn resample_with_noise<R: Rng + ?Sized>(
    waveform: &[VoltagePoint],
    n_points: usize,
    total_time: f64,
    noise_std: f64,
    rng: &mut R,
) -> VoltageWaveform {
    if waveform.len() < 2 || n_points < 2 {
        return waveform.to_vec();
    }

    let distribution = if noise_std > 0.0 {
        Normal::new(0.0, noise_std).ok()
    } else {
        None
    };

    let sampling_time = total_time / (n_points - 1) as f64;
    let mut resampled = Vec::with_capacity(n_points);
    let mut segment = 0;
    for i in 0..n_points {
        let time = i as f64 * sampling_time;
        while segment + 2 < waveform.len() && time > waveform[segment + 1].time {
            segment += 1;
        }
        let left = &waveform[segment];
        let right = &waveform[segment + 1];
        let span = right.time - left.time;
        let voltage = if span <= 0.0 {
            right.voltage
        } else {
            left.voltage + (time - left.time) * (right.voltage - left.voltage) / span
        };
        let noise = distribution.map(|d| d.sample(rng)).unwrap_or(0.0);
        resampled.push(VoltagePoint {
            time,
            voltage: voltage + noise,
        });
    }
    resampled
}
