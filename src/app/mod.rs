//! The WaveLab eframe application.
//!
//! Thin glue: parameter forms on the left, the chart in the center. Form
//! edits regenerate the preview waveform; submit hands a request to the
//! backend and starts a polling worker whose updates are drained at the top
//! of every frame.

mod run;

pub use run::run_wavelab;

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

use log::{info, warn};

use crate::backend::{spawn_poller, PollEvent, SharedBackend};
use crate::chart::view::ChartView;
use crate::chart::{ChartData, Dimensions, Margin};
use crate::measurement::{Measurement, MeasurementPayload, MeasurementStatus};
use crate::panels::{parse_with_unit, PulseForm, StdpForm};
use crate::persistence::{load_presets, save_presets, Presets};
use crate::waveform::{pulse_train, stdp_waveform};

/// Which parameter page is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlsPage {
    Pulse,
    Stdp,
}

/// Pixel margins reserved for axis chrome around the plot area.
const CHART_MARGIN: Margin = Margin {
    top: 20.0,
    right: 90.0,
    bottom: 90.0,
    left: 90.0,
};

const PRESET_FILE: &str = "wavelab_presets.json";

pub struct WaveLabApp {
    backend: SharedBackend,
    pulse: PulseForm,
    stdp: StdpForm,
    page: ControlsPage,
    avg_time: String,
    /// Show the synthesized waveform instead of the last measurement.
    preview: bool,
    /// Cached preview so the noise path is only re-sampled on edits.
    preview_data: Option<ChartData>,
    chart: Option<ChartView>,
    poll_rx: Option<Receiver<PollEvent>>,
    last_measurement: Option<Measurement>,
    measured_conductance: Option<f64>,
    status: String,
    preset_path: PathBuf,
}

impl WaveLabApp {
    pub fn new(backend: SharedBackend) -> WaveLabApp {
        let presets = Presets::default();
        let mut app = WaveLabApp {
            backend,
            pulse: presets.pulse,
            stdp: presets.stdp,
            page: ControlsPage::Pulse,
            avg_time: presets.avg_time,
            preview: true,
            preview_data: None,
            chart: None,
            poll_rx: None,
            last_measurement: None,
            measured_conductance: None,
            status: String::new(),
            preset_path: PathBuf::from(PRESET_FILE),
        };
        app.regenerate_preview();
        app
    }

    /// Rebuild the preview dataset from the active page's parameters.
    fn regenerate_preview(&mut self) {
        self.preview_data = match self.page {
            ControlsPage::Pulse => self
                .pulse
                .params()
                .map(|params| ChartData::Voltage(pulse_train(&params))),
            ControlsPage::Stdp => self
                .stdp
                .params()
                .map(|params| ChartData::Stdp(stdp_waveform(&params))),
        };
    }

    fn avg_time_value(&self) -> Option<f64> {
        parse_with_unit(&self.avg_time, &["s"]).filter(|t| *t > 0.0)
    }

    /// The dataset the chart should show this frame.
    fn chart_data(&self) -> Option<ChartData> {
        if self.preview {
            return self.preview_data.clone();
        }
        let measurement = self.last_measurement.as_ref()?;
        match measurement.data.as_ref()? {
            MeasurementPayload::Points(points) => Some(ChartData::IvMeasurement(points.clone())),
            MeasurementPayload::Stdp(stdp) => Some(ChartData::IvMeasurement(stdp.iv.clone())),
            MeasurementPayload::StdpCollection(collection) => {
                Some(ChartData::StdpCollection(collection.clone()))
            }
        }
    }

    fn drain_poll_events(&mut self) {
        let Some(rx) = self.poll_rx.take() else {
            return;
        };
        let mut finished = false;
        while let Ok(event) = rx.try_recv() {
            match event {
                PollEvent::Update(measurement) => {
                    if measurement.status.is_terminal() {
                        finished = true;
                        self.preview = false;
                        self.status = match measurement.status {
                            MeasurementStatus::Error => {
                                format!("measurement {} failed", measurement.id)
                            }
                            _ => format!("measurement {} done", measurement.id),
                        };
                    } else {
                        self.status = format!("measurement {} in progress…", measurement.id);
                    }
                    self.last_measurement = Some(measurement);
                }
                PollEvent::Failed(message) => {
                    warn!("poll failed: {message}");
                    self.status = message;
                    finished = true;
                }
            }
        }
        if !finished {
            self.poll_rx = Some(rx);
        }
    }

    fn watch(&mut self, id: u64) {
        let (tx, rx) = channel();
        spawn_poller(self.backend.clone(), id, tx);
        self.poll_rx = Some(rx);
        self.status = format!("measurement {id} submitted");
    }

    fn submit_active_page(&mut self) {
        let Some(avg_time) = self.avg_time_value() else {
            self.status = "invalid averaging time".into();
            return;
        };
        let submitted = match self.page {
            ControlsPage::Pulse => {
                let Some(request) = self.pulse.request(avg_time) else {
                    self.status = "invalid pulse parameters".into();
                    return;
                };
                self.backend
                    .lock()
                    .map_err(|e| e.to_string())
                    .and_then(|mut backend| backend.submit_pulse(&request).map_err(|e| e.to_string()))
            }
            ControlsPage::Stdp => {
                let Some(request) = self.stdp.request(avg_time) else {
                    self.status = "invalid STDP parameters".into();
                    return;
                };
                self.backend
                    .lock()
                    .map_err(|e| e.to_string())
                    .and_then(|mut backend| backend.submit_stdp(&request).map_err(|e| e.to_string()))
            }
        };
        match submitted {
            Ok(reference) => self.watch(reference.id),
            Err(message) => self.status = message,
        }
    }

    fn submit_collection(&mut self) {
        let Some(avg_time) = self.avg_time_value() else {
            self.status = "invalid averaging time".into();
            return;
        };
        let Some(request) = self.stdp.collection_request(avg_time) else {
            self.status = "invalid STDP sweep parameters".into();
            return;
        };
        let submitted = self
            .backend
            .lock()
            .map_err(|e| e.to_string())
            .and_then(|mut backend| {
                backend
                    .submit_stdp_collection(&request)
                    .map_err(|e| e.to_string())
            });
        match submitted {
            Ok(reference) => self.watch(reference.id),
            Err(message) => self.status = message,
        }
    }

    fn read_conductance(&mut self) {
        let reading = self
            .backend
            .lock()
            .map_err(|e| e.to_string())
            .and_then(|mut backend| backend.measure_conductance().map_err(|e| e.to_string()));
        match reading {
            Ok(reading) => {
                self.measured_conductance = Some(reading.conductance);
                self.status = String::new();
            }
            Err(message) => self.status = message,
        }
    }

    fn save_presets(&mut self) {
        let presets = Presets::new(self.pulse.clone(), self.stdp.clone(), self.avg_time.clone());
        match save_presets(&self.preset_path, &presets) {
            Ok(()) => {
                info!("presets saved to {}", self.preset_path.display());
                self.status = "presets saved".into();
            }
            Err(err) => self.status = err.to_string(),
        }
    }

    fn load_presets(&mut self) {
        match load_presets(&self.preset_path) {
            Ok(presets) => {
                self.pulse = presets.pulse;
                self.stdp = presets.stdp;
                self.avg_time = presets.avg_time;
                self.regenerate_preview();
                self.status = "presets loaded".into();
            }
            Err(err) => self.status = err.to_string(),
        }
    }

    fn controls_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("WaveLab");
        let mut edited = false;
        ui.horizontal(|ui| {
            edited |= ui
                .selectable_value(&mut self.page, ControlsPage::Pulse, "Pulsed")
                .changed();
            edited |= ui
                .selectable_value(&mut self.page, ControlsPage::Stdp, "STDP")
                .changed();
        });
        ui.separator();

        edited |= match self.page {
            ControlsPage::Pulse => self.pulse.ui(ui),
            ControlsPage::Stdp => self.stdp.ui(ui),
        };
        if edited {
            self.preview = true;
            self.regenerate_preview();
        }

        ui.separator();
        egui::Grid::new("avg_time_row").num_columns(2).show(ui, |ui| {
            let avg_time_ok = self.avg_time_value().is_some();
            crate::panels::quantity_field(
                ui,
                "Avg time",
                &mut self.avg_time,
                avg_time_ok,
            );
        });
        if ui.checkbox(&mut self.preview, "Preview waveform").changed() && self.preview {
            self.regenerate_preview();
        }

        ui.separator();
        let polling = self.poll_rx.is_some();
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!polling, egui::Button::new("Measure"))
                .clicked()
            {
                self.submit_active_page();
            }
            if self.page == ControlsPage::Stdp
                && ui
                    .add_enabled(!polling, egui::Button::new("Sweep delays"))
                    .clicked()
            {
                self.submit_collection();
            }
        });
        ui.horizontal(|ui| {
            if ui.button("Read conductance").clicked() {
                self.read_conductance();
            }
            if let Some(conductance) = self.measured_conductance {
                ui.label(format!("{conductance:.3e} S"));
            }
        });

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Save presets").clicked() {
                self.save_presets();
            }
            if ui.button("Load presets").clicked() {
                self.load_presets();
            }
        });

        if !self.status.is_empty() {
            ui.separator();
            ui.label(&self.status);
        }
    }

    fn chart_panel(&mut self, ui: &mut egui::Ui) {
        let available = ui.available_size();
        let dimensions = Dimensions {
            width: (available.x as f64 - CHART_MARGIN.left - CHART_MARGIN.right).max(0.0),
            height: (available.y as f64 - CHART_MARGIN.top - CHART_MARGIN.bottom).max(0.0),
            margin: CHART_MARGIN,
        };
        let Some(data) = self.chart_data() else {
            ui.centered_and_justified(|ui| ui.label("no data"));
            return;
        };
        match &mut self.chart {
            Some(chart) => {
                chart.set_dimensions(dimensions);
                if *chart.data() != data {
                    chart.set_data(data);
                }
            }
            None => self.chart = Some(ChartView::new(data, dimensions)),
        }
        if let Some(chart) = &mut self.chart {
            chart.ui(ui);
        }
    }
}

impl eframe::App for WaveLabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_poll_events();

        egui::SidePanel::left("controls")
            .resizable(false)
            .min_width(260.0)
            .show(ctx, |ui| self.controls_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.chart_panel(ui));

        if self.poll_rx.is_some() {
            // Keep polling visible without waiting for input events.
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
