//! WaveLab crate root: re-exports and module wiring.
//!
//! WaveLab is an interactive front-end for pulsed and STDP instrument
//! measurements: parametrize a waveform, preview it, submit it to the
//! instrument-control backend, poll until the measurement completes, and
//! explore the returned time series with pan/zoom charts.
//!
//! The crate splits into:
//! - `units`: SI-prefix scaling and quantity parsing
//! - `waveform`: pulse-train and STDP generators plus noise resampling
//! - `measurement`: the JSON wire contract and collection reduction
//! - `backend`: the submit/poll boundary and the polling worker
//! - `chart`: scales, axes, the four plot kinds and the interactive view
//! - `persistence`: parameter presets on disk
//! - `app` / `panels`: the eframe application and its parameter forms

pub mod app;
pub mod backend;
pub mod chart;
pub mod measurement;
pub mod panels;
pub mod persistence;
pub mod units;
pub mod waveform;

// Public re-exports for a compact external API
pub use app::{run_wavelab, WaveLabApp};
pub use backend::{spawn_poller, MeasurementBackend, PollEvent, SharedBackend, SimBackend};
pub use chart::view::{ChartView, ViewState};
pub use chart::{ChartData, Dimensions, Margin, Movement, Parameters};
pub use measurement::{Measurement, MeasurementStatus};
pub use units::{get_scaling, parse_quantity, Quantity, Scaling};
pub use waveform::{
    pulse_train, stdp_waveform, PulseTrainParams, StdpParams, StdpType, StdpWaveform,
    VoltagePoint, VoltageWaveform,
};
