use std::sync::mpsc::channel;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use wavelab::backend::{
    spawn_poller_with_interval, MeasurementBackend, PollEvent, SharedBackend, SimBackend,
};
use wavelab::measurement::{
    MeasurementPayload, MeasurementStatus, PulseRequest, StdpCollectionRequest, StdpRequest,
};
use wavelab::waveform::StdpType;

fn pulse_request() -> PulseRequest {
    PulseRequest {
        v_high: 1.0,
        v_low: 0.0,
        cycle_time: 1e-5,
        duty_cycle: 0.5,
        n_pulses: 10,
        n_points_high: 10,
        n_points_low: 10,
        avg_time: 1e-8,
        noise: false,
        noise_std: 0.0,
    }
}

fn stdp_request() -> StdpRequest {
    StdpRequest {
        amplitude: 3.0,
        delay: 5e-7,
        wait_time: 1e-6,
        pulse_duration: 2e-6,
        n_points: 400,
        stdp_type: StdpType::Depression,
        avg_time: 1e-8,
        noise: false,
        noise_std: 0.0,
    }
}

#[test]
fn sim_backend_completes_after_its_latency() {
    let mut backend = SimBackend::new(Duration::ZERO);
    let reference = backend.submit_pulse(&pulse_request()).expect("submit");
    let measurement = backend.fetch(reference.id).expect("fetch");
    assert_eq!(measurement.status, MeasurementStatus::Done);
    let Some(MeasurementPayload::Points(points)) = measurement.data else {
        panic!("expected a point payload");
    };
    assert_eq!(points.len(), 40, "4 points per cycle for 10 pulses");
}

#[test]
fn sim_backend_reports_in_progress_before_latency() {
    let mut backend = SimBackend::new(Duration::from_secs(60));
    let reference = backend.submit_pulse(&pulse_request()).expect("submit");
    let measurement = backend.fetch(reference.id).expect("fetch");
    assert_eq!(measurement.status, MeasurementStatus::InProgress);
    assert!(measurement.data.is_none(), "no payload until the job is done");
}

#[test]
fn sim_backend_rejects_unknown_ids() {
    let mut backend = SimBackend::new(Duration::ZERO);
    assert!(backend.fetch(999).is_err());
}

#[test]
fn sim_collection_sweeps_the_delay_window() {
    let mut backend = SimBackend::new(Duration::ZERO);
    let request = StdpCollectionRequest {
        amplitude: 3.0,
        delay_points: 5,
        wait_time: 1e-6,
        pulse_duration: 2e-6,
        stdp_type: StdpType::Depression,
        n_points: 400,
        avg_time: 1e-8,
        noise: false,
        noise_std: 0.0,
    };
    let reference = backend.submit_stdp_collection(&request).expect("submit");
    let measurement = backend.fetch(reference.id).expect("fetch");
    let Some(MeasurementPayload::StdpCollection(collection)) = measurement.data else {
        panic!("expected a collection payload");
    };
    assert_eq!(collection.collection.len(), 5);
    let first = collection.collection.first().unwrap().delay;
    let last = collection.collection.last().unwrap().delay;
    assert!((first + 1e-6).abs() < 1e-12, "sweep starts at -T/2");
    assert!((last - 1e-6).abs() < 1e-12, "sweep ends at +T/2");
}

#[test]
fn poller_streams_updates_then_exactly_one_terminal() {
    let backend: SharedBackend = Arc::new(Mutex::new(SimBackend::new(Duration::from_millis(50))));
    let id = backend
        .lock()
        .unwrap()
        .submit_stdp(&stdp_request())
        .expect("submit")
        .id;

    let (tx, rx) = channel();
    let handle = spawn_poller_with_interval(backend, id, tx, Duration::from_millis(10));

    let mut in_progress = 0usize;
    let mut terminal = 0usize;
    while let Ok(event) = rx.recv_timeout(Duration::from_secs(5)) {
        match event {
            PollEvent::Update(measurement) => {
                if measurement.status.is_terminal() {
                    terminal += 1;
                    assert!(measurement.data.is_some());
                } else {
                    in_progress += 1;
                }
            }
            PollEvent::Failed(message) => panic!("unexpected failure: {message}"),
        }
    }
    handle.join().expect("poller thread");
    assert!(in_progress >= 1, "at least one InProgress update before the result");
    assert_eq!(terminal, 1, "the stream ends on the first terminal record");
}

#[test]
fn poller_reports_backend_errors_and_stops() {
    let backend: SharedBackend = Arc::new(Mutex::new(SimBackend::new(Duration::ZERO)));
    let (tx, rx) = channel();
    let handle = spawn_poller_with_interval(backend, 12345, tx, Duration::from_millis(10));
    let event = rx.recv_timeout(Duration::from_secs(5)).expect("one event");
    assert!(matches!(event, PollEvent::Failed(_)));
    assert!(rx.recv().is_err(), "the channel closes after a failure");
    handle.join().expect("poller thread");
}

#[test]
fn requests_serialize_with_camel_case_wire_names() {
    let json = serde_json::to_value(pulse_request()).unwrap();
    for key in ["vHigh", "vLow", "cycleTime", "dutyCycle", "nPulses", "avgTime", "noiseStd"] {
        assert!(json.get(key).is_some(), "missing wire field {key}");
    }
    let json = serde_json::to_value(stdp_request()).unwrap();
    assert_eq!(json["stdpType"], "Depression");

    let mut request = stdp_request();
    request.stdp_type = StdpType::Potenciation;
    let json = serde_json::to_value(request).unwrap();
    assert_eq!(
        json["stdpType"], "Potenciation",
        "the historical wire spelling must survive"
    );
}

#[test]
fn measurement_payload_distinguishes_points_from_collections() {
    let points: MeasurementPayload =
        serde_json::from_str(r#"[{"time": 0.0, "voltage": 1.0, "current": 1e-6}]"#).unwrap();
    assert!(matches!(points, MeasurementPayload::Points(_)));

    let collection: MeasurementPayload = serde_json::from_str(
        r#"{
            "baseConductance": 1e-4,
            "collection": [
                {"stdpMeasurement": {"conductance": 1.5e-4}, "delay": 1e-6}
            ]
        }"#,
    )
    .unwrap();
    assert!(matches!(collection, MeasurementPayload::StdpCollection(_)));

    let single: MeasurementPayload = serde_json::from_str(
        r#"{"conductance": 1.5e-4, "iv": [{"time": 0.0, "voltage": 1.0, "current": 1e-6}]}"#,
    )
    .unwrap();
    assert!(matches!(single, MeasurementPayload::Stdp(_)));
}
