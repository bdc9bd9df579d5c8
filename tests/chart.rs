use float_cmp::approx_eq;

use wavelab::chart::scale::{extent_or_zero, LinearScale};
use wavelab::chart::scene::{Scene, Shape};
use wavelab::chart::style::{
    axis_style, series_style, AxisRole, SeriesRole, ACCENT_CYAN, ACCENT_ORANGE, SERIES_GREEN,
};
use wavelab::chart::{stdp_collection, voltage, ChartData, Dimensions, Margin, Movement, Parameters};
use wavelab::measurement::{
    MeasurementPoint, StdpCollectionEntry, StdpCollectionMeasurement, StdpMeasurement,
};
use wavelab::waveform::{pulse_train, PulseTrainParams, VoltagePoint};

fn dimensions() -> Dimensions {
    Dimensions {
        width: 600.0,
        height: 400.0,
        margin: Margin { top: 20.0, right: 90.0, bottom: 90.0, left: 90.0 },
    }
}

fn seconds_waveform() -> Vec<VoltagePoint> {
    pulse_train(&PulseTrainParams {
        v_high: 1.0,
        v_low: 0.0,
        n_pulses: 2,
        duty_cycle: 50.0,
        cycle_time: 10.0,
        n_points_high: 10,
        n_points_low: 10,
    })
}

fn collection(base: f64, pairs: &[(f64, f64)]) -> StdpCollectionMeasurement {
    StdpCollectionMeasurement {
        base_conductance: base,
        collection: pairs
            .iter()
            .map(|(delay, conductance)| StdpCollectionEntry {
                stdp_measurement: StdpMeasurement { conductance: *conductance, iv: Vec::new() },
                delay: *delay,
            })
            .collect(),
    }
}

#[test]
fn linear_scale_maps_and_inverts() {
    let scale = LinearScale::new([0.0, 10.0], [0.0, 600.0]);
    assert_eq!(scale.scale(0.0), 0.0);
    assert_eq!(scale.scale(10.0), 600.0);
    assert_eq!(scale.scale(5.0), 300.0);
    assert!(approx_eq!(f64, scale.invert(300.0), 5.0, ulps = 4));
}

#[test]
fn linear_scale_degenerate_domain_maps_to_mid_range() {
    let scale = LinearScale::new([3.0, 3.0], [0.0, 100.0]);
    assert_eq!(scale.scale(3.0), 50.0);
    assert_eq!(scale.scale(99.0), 50.0);
}

#[test]
fn linear_scale_ticks_use_round_steps() {
    let scale = LinearScale::new([0.0, 10.0], [0.0, 600.0]);
    let ticks = scale.ticks(10);
    assert_eq!(ticks, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
}

#[test]
fn extent_skips_non_finite_values() {
    assert_eq!(extent_or_zero([1.0, f64::NAN, 3.0].into_iter()), [1.0, 3.0]);
    assert_eq!(extent_or_zero([f64::NAN, f64::INFINITY].into_iter()), [0.0, 0.0]);
    assert_eq!(extent_or_zero(std::iter::empty()), [0.0, 0.0]);
}

#[test]
fn voltage_parameters_compute_extents_and_labels() {
    let plot = voltage::parameters(&seconds_waveform(), &dimensions());
    assert_eq!(plot.x_extent_time, [0.0, 20.0]);
    assert_eq!(plot.y_extent_voltage, [0.0, 1.0]);
    assert_eq!(plot.time_scaling.scaling_factor, 1.0);
    assert_eq!(plot.bottom_axis_label, "Time (s)");
    assert_eq!(plot.left_axis_label, "Voltage (V)");
    // 2% time margin, 5% value margin
    assert!(approx_eq!(f64, plot.x_time.domain[0], -0.4, ulps = 4));
    assert!(approx_eq!(f64, plot.x_time.domain[1], 20.4, ulps = 4));
    assert!(approx_eq!(f64, plot.y_voltage.domain[0], -0.05, ulps = 4));
    assert!(approx_eq!(f64, plot.y_voltage.domain[1], 1.05, ulps = 4));
}

#[test]
fn voltage_parameters_scale_micro_second_data() {
    let data = vec![
        VoltagePoint { time: 0.0, voltage: 0.0 },
        VoltagePoint { time: 2e-5, voltage: 1.0 },
    ];
    let plot = voltage::parameters(&data, &dimensions());
    assert_eq!(plot.time_scaling.scaling_factor, 1_000_000.0);
    assert_eq!(plot.bottom_axis_label, "Time (µs)");
    assert!(approx_eq!(f64, plot.x_extent_time[1], 20.0, ulps = 4));
}

#[test]
fn empty_dataset_defaults_to_zero_extents() {
    let plot = voltage::parameters(&Vec::new(), &dimensions());
    assert_eq!(plot.x_extent_time, [0.0, 0.0]);
    assert_eq!(plot.y_extent_voltage, [0.0, 0.0]);
    // Rendering an empty chart must not panic.
    let parameters = Parameters::compute(&ChartData::Voltage(Vec::new()), &dimensions());
    let mut scene = Scene::new();
    parameters.append_axes(&mut scene);
    parameters.append_paths(&mut scene);
}

#[test]
fn iv_parameters_scale_current_by_magnitude() {
    let data = vec![
        MeasurementPoint { time: 0.0, voltage: 0.0, current: -3e-6 },
        MeasurementPoint { time: 1e-3, voltage: 1.0, current: 2e-6 },
    ];
    let parameters = Parameters::compute(&ChartData::IvMeasurement(data), &dimensions());
    let Parameters::IvMeasurement(plot) = parameters else {
        panic!("expected iv parameters");
    };
    assert_eq!(plot.current_scaling.scaling_factor, 1_000_000.0);
    assert_eq!(plot.right_axis_label, "Current (µA)");
    // Extent keeps the sign after scaling.
    assert!(approx_eq!(f64, plot.y_extent_current[0], -3.0, ulps = 4));
    assert!(approx_eq!(f64, plot.y_extent_current[1], 2.0, ulps = 4));
    assert_eq!(plot.bottom_axis_label, "Time (ms)");
}

#[test]
fn collection_ratios_all_zero_force_unit_extent() {
    let measurement = collection(1e-4, &[(-1e-6, 1e-4), (0.0, 1e-4), (1e-6, 1e-4)]);
    let plot = stdp_collection::parameters(&measurement, &dimensions());
    assert!(plot.data.iter().all(|p| p.conductance_ratio == 0.0));
    assert_eq!(plot.y_extent_ratio, [-1.0, 1.0]);
}

#[test]
fn collection_extents_are_mirrored_about_zero() {
    let measurement = collection(1e-4, &[(1e-6, 1.5e-4), (2e-6, 0.5e-4)]);
    let plot = stdp_collection::parameters(&measurement, &dimensions());
    // Delays are all positive, the x extent still spans both signs.
    assert!(approx_eq!(f64, plot.x_extent_delay[0], -2.0, ulps = 4));
    assert!(approx_eq!(f64, plot.x_extent_delay[1], 2.0, ulps = 4));
    assert_eq!(plot.delay_scaling.scale_unit, "µs");
    // Ratios 0.5 and -0.5 mirror to [-0.5, 0.5].
    assert!(approx_eq!(f64, plot.y_extent_ratio[0], -0.5, ulps = 4));
    assert!(approx_eq!(f64, plot.y_extent_ratio[1], 0.5, ulps = 4));
}

#[test]
fn collection_dots_color_depends_on_delay_signs() {
    let all_positive = collection(1e-4, &[(1e-6, 1.5e-4), (2e-6, 1.2e-4)]);
    let plot = stdp_collection::parameters(&all_positive, &dimensions());
    let mut scene = Scene::new();
    stdp_collection::append_paths(&plot, &mut scene);
    let dot_fill = scene.series.iter().find_map(|shape| match shape {
        Shape::Circle { fill, .. } => Some(*fill),
        _ => None,
    });
    assert_eq!(dot_fill, Some(ACCENT_CYAN), "positive-only sweeps use the accent");

    let mixed = collection(1e-4, &[(-1e-6, 1.5e-4), (2e-6, 1.2e-4)]);
    let plot = stdp_collection::parameters(&mixed, &dimensions());
    let mut scene = Scene::new();
    stdp_collection::append_paths(&plot, &mut scene);
    let dot_fill = scene.series.iter().find_map(|shape| match shape {
        Shape::Circle { fill, .. } => Some(*fill),
        _ => None,
    });
    assert_eq!(dot_fill, Some(ACCENT_ORANGE));
}

#[test]
fn collection_draws_dots_and_two_reference_lines() {
    let measurement = collection(1e-4, &[(-1e-6, 1.5e-4), (1e-6, 0.7e-4)]);
    let plot = stdp_collection::parameters(&measurement, &dimensions());
    let mut scene = Scene::new();
    stdp_collection::append_paths(&plot, &mut scene);
    let circles = scene
        .series
        .iter()
        .filter(|s| matches!(s, Shape::Circle { .. }))
        .count();
    let paths = scene
        .series
        .iter()
        .filter(|s| matches!(s, Shape::Path { .. }))
        .count();
    assert_eq!(circles, 2);
    assert_eq!(paths, 2, "delay = 0 and ratio = 0 reference lines");
}

#[test]
fn stdp_chart_draws_three_series() {
    let params = wavelab::waveform::StdpParams {
        delay: 5e-7,
        amplitude: 3.0,
        pulse_duration: 2e-6,
        wait_time: 1e-6,
        stdp_type: wavelab::waveform::StdpType::Depression,
        noise: false,
        noise_std: 0.0,
        n_points: 400,
    };
    let waveform = wavelab::waveform::stdp_waveform(&params);
    let parameters = Parameters::compute(&ChartData::Stdp(waveform), &dimensions());
    let mut scene = Scene::new();
    parameters.append_paths(&mut scene);
    let roles: Vec<_> = scene
        .series
        .iter()
        .filter_map(|shape| match shape {
            Shape::Path { role, .. } => *role,
            _ => None,
        })
        .collect();
    assert_eq!(
        roles,
        vec![SeriesRole::WaveformA, SeriesRole::WaveformB, SeriesRole::Equivalent]
    );
}

#[test]
fn zoom_with_full_width_selection_keeps_the_domain() {
    let plot = voltage::parameters(&seconds_waveform(), &dimensions());
    let movement = Movement::default();
    let zoomed = voltage::zoomed(&plot, &movement, [0.0, 600.0]);
    assert!(approx_eq!(f64, zoomed.x_time.domain[0], plot.x_time.domain[0], epsilon = 1e-9));
    assert!(approx_eq!(f64, zoomed.x_time.domain[1], plot.x_time.domain[1], epsilon = 1e-9));
}

#[test]
fn zoom_compensates_the_pan_offset() {
    let plot = voltage::parameters(&seconds_waveform(), &dimensions());
    let panned = Movement { k: 1.0, x: 60.0, y: 0.0 };
    let zoomed = voltage::zoomed(&plot, &panned, [60.0, 660.0]);
    // Shifting both selection and offset by the same amount is a no-op.
    assert!(approx_eq!(f64, zoomed.x_time.domain[0], plot.x_time.domain[0], epsilon = 1e-9));
    assert!(approx_eq!(f64, zoomed.x_time.domain[1], plot.x_time.domain[1], epsilon = 1e-9));
}

#[test]
fn restore_returns_to_the_raw_extent_regardless_of_zoom() {
    let plot = voltage::parameters(&seconds_waveform(), &dimensions());
    let movement = Movement::default();
    let zoomed = voltage::zoomed(&plot, &movement, [100.0, 200.0]);
    assert!(zoomed.x_time.domain[1] - zoomed.x_time.domain[0] < 21.0);
    let restored = voltage::restored(&zoomed);
    assert_eq!(restored.x_time.domain, plot.x_extent_time);
}

#[test]
fn immutable_snapshots_leave_the_original_untouched() {
    let plot = voltage::parameters(&seconds_waveform(), &dimensions());
    let before = plot.x_time.domain;
    let _zoomed = voltage::zoomed(&plot, &Movement::default(), [100.0, 200.0]);
    assert_eq!(plot.x_time.domain, before, "zoom must not mutate the source");
}

#[test]
fn style_table_is_the_single_source_of_series_colors() {
    assert_eq!(series_style(SeriesRole::WaveformA).color, SERIES_GREEN);
    assert_eq!(series_style(SeriesRole::WaveformB).color, ACCENT_ORANGE);
    assert_eq!(series_style(SeriesRole::Equivalent).color, ACCENT_CYAN);
    assert_eq!(series_style(SeriesRole::Voltage).color, ACCENT_CYAN);
    assert_eq!(series_style(SeriesRole::Current).color, ACCENT_ORANGE);
    assert_eq!(series_style(SeriesRole::Voltage).stroke_width, 2.0);
}

#[test]
fn axis_style_table_matches_the_label_contract() {
    assert_eq!(axis_style(AxisRole::Left).label_color, ACCENT_CYAN);
    assert_eq!(axis_style(AxisRole::Right).label_color, ACCENT_ORANGE);
    assert_eq!(axis_style(AxisRole::Bottom).label_color, egui::Color32::WHITE);
    for role in [AxisRole::Left, AxisRole::Right, AxisRole::Bottom] {
        assert_eq!(axis_style(role).label_em, 2.0);
        assert_eq!(axis_style(role).tick_em, 1.0);
    }
}
