use float_cmp::approx_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use wavelab::waveform::noise::resample_with_noise;
use wavelab::waveform::*;

fn pulse_params(n_pulses: u32) -> PulseTrainParams {
    PulseTrainParams {
        v_high: 1.0,
        v_low: 0.0,
        n_pulses,
        duty_cycle: 50.0,
        cycle_time: 10.0,
        n_points_high: 10,
        n_points_low: 10,
    }
}

fn stdp_params(delay: f64, stdp_type: StdpType) -> StdpParams {
    StdpParams {
        delay,
        amplitude: 6.0,
        pulse_duration: 4.0,
        wait_time: 1.0,
        stdp_type,
        noise: false,
        noise_std: 0.0,
        n_points: 400,
    }
}

#[test]
fn pulse_train_emits_four_points_per_cycle() {
    for n in [0u32, 1, 2, 7, 100] {
        let waveform = pulse_train(&pulse_params(n));
        assert_eq!(waveform.len(), 4 * n as usize, "4n points for n = {n}");
    }
}

#[test]
fn pulse_train_of_zero_pulses_is_empty() {
    assert!(pulse_train(&pulse_params(0)).is_empty());
}

#[test]
fn pulse_train_two_cycles_at_half_duty() {
    // 1 V / 0 V, two pulses, 50% duty, 10 s cycle
    let waveform = pulse_train(&pulse_params(2));
    let expected = [
        (0.0, 1.0),
        (5.0, 1.0),
        (5.0, 0.0),
        (10.0, 0.0),
        (10.0, 1.0),
        (15.0, 1.0),
        (15.0, 0.0),
        (20.0, 0.0),
    ];
    assert_eq!(waveform.len(), expected.len());
    for (point, (time, voltage)) in waveform.iter().zip(expected) {
        assert_eq!(point.time, time);
        assert_eq!(point.voltage, voltage);
    }
}

#[test]
fn pulse_train_time_is_non_decreasing_and_cycles_align() {
    let params = pulse_params(5);
    let waveform = pulse_train(&params);
    for pair in waveform.windows(2) {
        assert!(pair[1].time >= pair[0].time, "time must not decrease");
    }
    for i in 0..5usize {
        let last_of_cycle = waveform[4 * i + 3].time;
        assert!(
            approx_eq!(f64, last_of_cycle, params.cycle_time * (i as f64 + 1.0), ulps = 4),
            "cycle {i} should end at {}",
            params.cycle_time * (i as f64 + 1.0)
        );
    }
}

#[test]
fn pulse_train_degenerate_duty_cycles_keep_duplicate_times() {
    for duty in [0.0, 100.0] {
        let mut params = pulse_params(1);
        params.duty_cycle = duty;
        let waveform = pulse_train(&params);
        assert_eq!(waveform.len(), 4);
        let time_high = params.cycle_time * duty / 100.0;
        assert_eq!(waveform[1].time, time_high);
        assert_eq!(waveform[2].time, time_high);
    }
}

#[test]
fn stdp_equivalent_has_ten_points_for_nonzero_delay() {
    let waveform = stdp_waveform(&stdp_params(1.0, StdpType::Depression));
    assert_eq!(waveform.equivalent.len(), 10);
}

#[test]
fn stdp_equivalent_collapses_to_eight_points_for_zero_delay() {
    let with_delay = stdp_waveform(&stdp_params(1.0, StdpType::Depression));
    let without_delay = stdp_waveform(&stdp_params(0.0, StdpType::Depression));
    assert_eq!(without_delay.equivalent.len(), 8);
    assert_eq!(
        with_delay.equivalent.len() - without_delay.equivalent.len(),
        2,
        "dropping the cutting plateau removes exactly two points"
    );
}

#[test]
fn stdp_zero_delay_scenario_is_flat_zero_with_duration_six() {
    // amplitude 6, pulse 4, delay 0, wait 1 -> constantVHigh = 0
    let waveform = stdp_waveform(&stdp_params(0.0, StdpType::Depression));
    let equivalent = &waveform.equivalent;
    assert_eq!(equivalent.len(), 8);
    for point in equivalent {
        assert_eq!(point.voltage, 0.0, "plateaus collapse to zero volts");
    }
    let duration = equivalent.last().unwrap().time;
    assert!(
        approx_eq!(f64, duration, 6.0, ulps = 4),
        "total duration should be 2*wait + delay + pulse = 6, got {duration}"
    );
}

#[test]
fn stdp_equivalent_plateau_voltages_follow_the_construction() {
    // amplitude 6, pulse 4, delay 1: constantVHigh = 1.5, cutting plateau at -4.5
    let waveform = stdp_waveform(&stdp_params(1.0, StdpType::Depression));
    let voltages: Vec<f64> = waveform.equivalent.iter().map(|p| p.voltage).collect();
    let expected = [0.0, 0.0, 1.5, 1.5, -4.5, -4.5, 1.5, 1.5, 0.0, 0.0];
    assert_eq!(voltages.len(), expected.len());
    for (got, want) in voltages.iter().zip(expected) {
        assert!(approx_eq!(f64, *got, want, ulps = 4), "got {got}, want {want}");
    }
}

#[test]
fn stdp_types_mirror_each_other() {
    let depression = stdp_waveform(&stdp_params(0.5, StdpType::Depression));
    let potenciation = stdp_waveform(&stdp_params(0.5, StdpType::Potenciation));
    assert_eq!(depression.equivalent.len(), potenciation.equivalent.len());
    for (d, p) in depression.equivalent.iter().zip(&potenciation.equivalent) {
        assert_eq!(d.time, p.time);
        assert!(
            approx_eq!(f64, d.voltage, -p.voltage, ulps = 4),
            "voltages must be exact sign mirrors: {} vs {}",
            d.voltage,
            p.voltage
        );
    }
}

#[test]
fn stdp_parents_span_the_same_total_duration() {
    let waveform = stdp_waveform(&stdp_params(0.75, StdpType::Depression));
    // A carries one trailing alignment point on top of the 6-point template.
    assert_eq!(waveform.waveform_a.len(), 7);
    assert_eq!(waveform.waveform_b.len(), 6);
    let end_a = waveform.waveform_a.last().unwrap().time;
    let end_b = waveform.waveform_b.last().unwrap().time;
    assert!(approx_eq!(f64, end_a, end_b, ulps = 4));
}

#[test]
fn stdp_parent_swings_half_amplitude_both_ways() {
    let params = stdp_params(0.5, StdpType::Depression);
    let waveform = stdp_waveform(&params);
    let voltages: Vec<f64> = waveform.waveform_b.iter().map(|p| p.voltage).collect();
    assert_eq!(voltages, vec![0.0, 0.0, 3.0, -3.0, 0.0, 0.0]);
}

#[test]
fn stdp_slider_bounds_match_the_construction_sign() {
    let params = stdp_params(1.0, StdpType::Depression);
    // constantVHigh = 1.5, constantVlow = -4.5
    assert!(approx_eq!(f64, max_v(&params), 1.5, ulps = 4));
    assert!(approx_eq!(f64, min_v(&params), -4.5, ulps = 4));

    let params = stdp_params(1.0, StdpType::Potenciation);
    assert!(approx_eq!(f64, max_v(&params), 4.5, ulps = 4));
    assert!(approx_eq!(f64, min_v(&params), -1.5, ulps = 4));
}

#[test]
fn noisy_equivalent_is_resampled_to_n_points() {
    let mut params = stdp_params(1.0, StdpType::Depression);
    params.noise = true;
    params.noise_std = 0.1;
    params.n_points = 250;
    let mut rng = StdRng::seed_from_u64(7);
    let waveform = stdp_waveform_with_rng(&params, &mut rng);
    assert_eq!(waveform.equivalent.len(), 250);
    // Parents are never resampled.
    assert_eq!(waveform.waveform_a.len(), 7);
    assert_eq!(waveform.waveform_b.len(), 6);
    let total = 2.0 * params.wait_time + params.delay + params.pulse_duration;
    let last = waveform.equivalent.last().unwrap().time;
    assert!(approx_eq!(f64, last, total, ulps = 4));
}

#[test]
fn seeded_noise_is_reproducible() {
    let mut params = stdp_params(0.5, StdpType::Depression);
    params.noise = true;
    params.noise_std = 0.05;
    params.n_points = 64;
    let a = stdp_waveform_with_rng(&params, &mut StdRng::seed_from_u64(42));
    let b = stdp_waveform_with_rng(&params, &mut StdRng::seed_from_u64(42));
    assert_eq!(a.equivalent, b.equivalent, "same seed, same waveform");
    let c = stdp_waveform_with_rng(&params, &mut StdRng::seed_from_u64(43));
    assert_ne!(a.equivalent, c.equivalent, "different seed, different noise");
}

#[test]
fn resampling_without_noise_interpolates_linearly() {
    let breakpoints = vec![
        VoltagePoint { time: 0.0, voltage: 0.0 },
        VoltagePoint { time: 1.0, voltage: 1.0 },
        VoltagePoint { time: 2.0, voltage: 1.0 },
    ];
    let mut rng = StdRng::seed_from_u64(0);
    let resampled = resample_with_noise(&breakpoints, 5, 2.0, 0.0, &mut rng);
    let voltages: Vec<f64> = resampled.iter().map(|p| p.voltage).collect();
    assert_eq!(voltages, vec![0.0, 0.5, 1.0, 1.0, 1.0]);
    let times: Vec<f64> = resampled.iter().map(|p| p.time).collect();
    assert_eq!(times, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
}

#[test]
fn resampling_degenerate_inputs_pass_through() {
    let single = vec![VoltagePoint { time: 0.0, voltage: 1.0 }];
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(resample_with_noise(&single, 10, 1.0, 0.1, &mut rng), single);
}
