//! The submit/poll boundary to the instrument-control backend.
//!
//! The real backend lives behind the [`MeasurementBackend`] trait (four
//! submit endpoints plus `fetch`). Submitted measurements are watched by a
//! polling worker that fetches the record every [`POLL_INTERVAL`] and streams
//! [`PollEvent`]s over an mpsc channel until a terminal status arrives.
//!
//! [`SimBackend`] is a process-local stand-in used by the demo binary and
//! the poller tests; it synthesizes plausible data from the request itself.

use std::collections::HashMap;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use chrono::Utc;
use log::{info, warn};
use rand::Rng;
use thiserror::Error;

use crate::measurement::{
    conductance_ratios, ConductanceReading, Measurement, MeasurementCategory, MeasurementData,
    MeasurementPayload, MeasurementPoint, MeasurementRef, MeasurementStatus, PulseRequest,
    StdpCollectionEntry, StdpCollectionMeasurement, StdpCollectionRequest, StdpMeasurement,
    StdpRequest,
};
use crate::waveform::{
    pulse_train, stdp_waveform, PulseTrainParams, StdpParams, StdpType, VoltagePoint,
};

/// Interval between two status fetches of the polling worker.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Endpoint paths a transport implementation submits to.
pub const PULSE_ENDPOINT: &str = "measurements/pulse";
pub const STDP_ENDPOINT: &str = "measurements/stdp";
pub const STDP_COLLECTION_ENDPOINT: &str = "measurements/stdp-collection";
pub const CONDUCTANCE_ENDPOINT: &str = "measurements/conductance";
/// Polling fetches `measurements/{id}` relative to this path.
pub const MEASUREMENT_ENDPOINT: &str = "measurements/";

/// Failure talking to the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend rejected the request: {0}")]
    Rejected(String),
    #[error("no measurement with id {0}")]
    UnknownMeasurement(u64),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// The narrow request/poll contract of the measurement backend.
pub trait MeasurementBackend: Send {
    fn submit_pulse(&mut self, request: &PulseRequest) -> Result<MeasurementRef, BackendError>;
    fn submit_stdp(&mut self, request: &StdpRequest) -> Result<MeasurementRef, BackendError>;
    fn submit_stdp_collection(
        &mut self,
        request: &StdpCollectionRequest,
    ) -> Result<MeasurementRef, BackendError>;
    fn measure_conductance(&mut self) -> Result<ConductanceReading, BackendError>;
    fn fetch(&mut self, id: u64) -> Result<Measurement, BackendError>;
}

/// Shared handle to a backend, as held by the UI and the polling workers.
pub type SharedBackend = Arc<Mutex<dyn MeasurementBackend>>;

/// Updates streamed by the polling worker.
#[derive(Debug)]
pub enum PollEvent {
    /// A fetched measurement record; terminal records end the stream.
    Update(Measurement),
    /// The poll loop died on a backend error.
    Failed(String),
}

/// Spawn a worker that polls `id` until a terminal status.
pub fn spawn_poller(backend: SharedBackend, id: u64, tx: Sender<PollEvent>) -> thread::JoinHandle<()> {
    spawn_poller_with_interval(backend, id, tx, POLL_INTERVAL)
}

/// [`spawn_poller`] with an explicit interval (tests use a short one).
pub fn spawn_poller_with_interval(
    backend: SharedBackend,
    id: u64,
    tx: Sender<PollEvent>,
    interval: Duration,
) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        let fetched = match backend.lock() {
            Ok(mut backend) => backend.fetch(id),
            Err(poisoned) => Err(BackendError::Unavailable(poisoned.to_string())),
        };
        match fetched {
            Ok(measurement) => {
                let terminal = measurement.status.is_terminal();
                if tx.send(PollEvent::Update(measurement)).is_err() {
                    // Receiver dropped, nobody is watching anymore.
                    break;
                }
                if terminal {
                    break;
                }
            }
            Err(err) => {
                warn!("polling measurement {id} failed: {err}");
                let _ = tx.send(PollEvent::Failed(err.to_string()));
                break;
            }
        }
        thread::sleep(interval);
    })
}

/// A simulated instrument backend.
///
/// Each submission is recorded as `InProgress` and flips to `Done` once
/// [`SimBackend::latency`] has elapsed, so the polling path behaves as it
/// does against the real service. Data is synthesized from the request:
/// pulse/STDP measurements replay the corresponding waveform through a
/// resistive load, collections follow an exponential plasticity curve in
/// the delay.
pub struct SimBackend {
    latency: Duration,
    load_resistance: f64,
    base_conductance: f64,
    next_id: u64,
    jobs: HashMap<u64, Job>,
}

struct Job {
    submitted: Instant,
    category: MeasurementCategory,
    parameters: serde_json::Value,
    payload: MeasurementPayload,
}

impl SimBackend {
    pub fn new(latency: Duration) -> SimBackend {
        SimBackend {
            latency,
            load_resistance: 10_000.0,
            base_conductance: 1e-4,
            next_id: 1,
            jobs: HashMap::new(),
        }
    }

    fn record(
        &mut self,
        category: MeasurementCategory,
        parameters: serde_json::Value,
        payload: MeasurementPayload,
    ) -> MeasurementRef {
        let id = self.next_id;
        self.next_id += 1;
        self.jobs.insert(
            id,
            Job {
                submitted: Instant::now(),
                category,
                parameters,
                payload,
            },
        );
        MeasurementRef { id }
    }

    /// Sample an IV trace by pushing a voltage waveform through the load.
    fn trace_from_waveform(&self, waveform: &[VoltagePoint], noise_std: f64) -> MeasurementData {
        let mut rng = rand::thread_rng();
        waveform
            .iter()
            .map(|point| {
                let noise = if noise_std > 0.0 {
                    rng.gen_range(-noise_std..noise_std)
                } else {
                    0.0
                };
                MeasurementPoint {
                    time: point.time,
                    voltage: point.voltage + noise,
                    current: (point.voltage + noise) / self.load_resistance,
                }
            })
            .collect()
    }

    /// Toy plasticity curve: ratio decays exponentially with |delay| and
    /// follows the protocol sign.
    fn plasticity_ratio(stdp_type: StdpType, delay: f64, pulse_duration: f64) -> f64 {
        let tau = (pulse_duration / 4.0).max(f64::MIN_POSITIVE);
        stdp_type.multiplier() * (-delay.abs() / tau).exp()
    }
}

impl Default for SimBackend {
    fn default() -> Self {
        SimBackend::new(Duration::from_millis(1500))
    }
}

impl MeasurementBackend for SimBackend {
    fn submit_pulse(&mut self, request: &PulseRequest) -> Result<MeasurementRef, BackendError> {
        if request.cycle_time <= 0.0 {
            return Err(BackendError::Rejected("cycleTime must be positive".into()));
        }
        let params = PulseTrainParams {
            v_high: request.v_high,
            v_low: request.v_low,
            n_pulses: request.n_pulses,
            // The wire carries a fraction, the generator takes percent.
            duty_cycle: request.duty_cycle * 100.0,
            cycle_time: request.cycle_time,
            n_points_high: request.n_points_high,
            n_points_low: request.n_points_low,
        };
        let noise_std = if request.noise { request.noise_std } else { 0.0 };
        let trace = self.trace_from_waveform(&pulse_train(&params), noise_std);
        info!("simulating pulse measurement, {} points", trace.len());
        let parameters = serde_json::to_value(request).unwrap_or_default();
        Ok(self.record(
            MeasurementCategory::Pulse,
            parameters,
            MeasurementPayload::Points(trace),
        ))
    }

    fn submit_stdp(&mut self, request: &StdpRequest) -> Result<MeasurementRef, BackendError> {
        let params = StdpParams {
            delay: request.delay,
            amplitude: request.amplitude,
            pulse_duration: request.pulse_duration,
            wait_time: request.wait_time,
            stdp_type: request.stdp_type,
            noise: request.noise,
            noise_std: request.noise_std,
            n_points: request.n_points,
        };
        let waveform = stdp_waveform(&params);
        let iv = self.trace_from_waveform(&waveform.equivalent, 0.0);
        let ratio = Self::plasticity_ratio(request.stdp_type, request.delay, request.pulse_duration);
        let conductance = self.base_conductance * (1.0 + ratio);
        info!("simulating stdp measurement at delay {}", request.delay);
        let parameters = serde_json::to_value(request).unwrap_or_default();
        Ok(self.record(
            MeasurementCategory::Stdp,
            parameters,
            MeasurementPayload::Stdp(StdpMeasurement { conductance, iv }),
        ))
    }

    fn submit_stdp_collection(
        &mut self,
        request: &StdpCollectionRequest,
    ) -> Result<MeasurementRef, BackendError> {
        if request.delay_points == 0 {
            return Err(BackendError::Rejected("delayPoints must be at least 1".into()));
        }
        // Delays sweep the full [-T/2, T/2] window.
        let half = request.pulse_duration / 2.0;
        let collection: Vec<StdpCollectionEntry> = (0..request.delay_points)
            .map(|i| {
                let fraction = if request.delay_points == 1 {
                    0.0
                } else {
                    i as f64 / (request.delay_points - 1) as f64
                };
                let delay = -half + fraction * request.pulse_duration;
                let ratio = Self::plasticity_ratio(request.stdp_type, delay, request.pulse_duration);
                StdpCollectionEntry {
                    stdp_measurement: StdpMeasurement {
                        conductance: self.base_conductance * (1.0 + ratio),
                        iv: Vec::new(),
                    },
                    delay,
                }
            })
            .collect();
        let payload = StdpCollectionMeasurement {
            base_conductance: self.base_conductance,
            collection,
        };
        info!(
            "simulating stdp collection, {} delays",
            conductance_ratios(&payload).len()
        );
        let parameters = serde_json::to_value(request).unwrap_or_default();
        Ok(self.record(
            MeasurementCategory::StdpCollection,
            parameters,
            MeasurementPayload::StdpCollection(payload),
        ))
    }

    fn measure_conductance(&mut self) -> Result<ConductanceReading, BackendError> {
        Ok(ConductanceReading {
            conductance: self.base_conductance,
        })
    }

    fn fetch(&mut self, id: u64) -> Result<Measurement, BackendError> {
        let job = self
            .jobs
            .get(&id)
            .ok_or(BackendError::UnknownMeasurement(id))?;
        let done = job.submitted.elapsed() >= self.latency;
        Ok(Measurement {
            id,
            status: if done {
                MeasurementStatus::Done
            } else {
                MeasurementStatus::InProgress
            },
            date: Utc::now(),
            category: job.category,
            parameters: job.parameters.clone(),
            data: done.then(|| job.payload.clone()),
        })
    }
}
