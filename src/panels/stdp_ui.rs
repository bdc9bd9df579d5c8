//! STDP pulse-pair and delay-sweep parameter form.

use egui::Ui;
use serde::{Deserialize, Serialize};

use crate::measurement::{StdpCollectionRequest, StdpRequest};
use crate::waveform::{StdpParams, StdpType};

use super::{integer_field, parse_with_unit, quantity_field};

/// Raw operator input for STDP measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StdpForm {
    pub delay: String,
    pub amplitude: String,
    pub pulse_duration: String,
    pub wait_time: String,
    pub stdp_type: StdpType,
    pub n_points: String,
    pub noise: bool,
    pub noise_std: String,
    /// Number of delays of a collection sweep.
    pub delay_points: String,
}

impl Default for StdpForm {
    fn default() -> Self {
        StdpForm {
            delay: "500 ns".into(),
            amplitude: "3 V".into(),
            pulse_duration: "2 us".into(),
            wait_time: "1 us".into(),
            stdp_type: StdpType::Depression,
            n_points: "400".into(),
            noise: false,
            noise_std: "0 mV".into(),
            delay_points: "5".into(),
        }
    }
}

impl StdpForm {
    fn amplitude(&self) -> Option<f64> {
        parse_with_unit(&self.amplitude, &["V"])
    }

    fn pulse_duration(&self) -> Option<f64> {
        parse_with_unit(&self.pulse_duration, &["s"]).filter(|t| *t > 0.0)
    }

    /// The delay is bounded by half the pulse duration; beyond that the
    /// construction would fold back on itself.
    fn delay(&self) -> Option<f64> {
        let delay = parse_with_unit(&self.delay, &["s"])?;
        let half = self.pulse_duration()? / 2.0;
        (0.0..=half).contains(&delay).then_some(delay)
    }

    fn wait_time(&self) -> Option<f64> {
        parse_with_unit(&self.wait_time, &["s"]).filter(|t| *t >= 0.0)
    }

    fn n_points(&self) -> Option<usize> {
        self.n_points.trim().parse().ok()
    }

    fn delay_points(&self) -> Option<u32> {
        self.delay_points.trim().parse::<u32>().ok().filter(|n| *n > 0)
    }

    fn noise_std(&self) -> Option<f64> {
        parse_with_unit(&self.noise_std, &["V"]).filter(|v| *v >= 0.0)
    }

    /// Generator parameters, `None` while any field is invalid.
    pub fn params(&self) -> Option<StdpParams> {
        Some(StdpParams {
            delay: self.delay()?,
            amplitude: self.amplitude()?,
            pulse_duration: self.pulse_duration()?,
            wait_time: self.wait_time()?,
            stdp_type: self.stdp_type,
            noise: self.noise,
            noise_std: if self.noise { self.noise_std()? } else { 0.0 },
            n_points: self.n_points()?,
        })
    }

    /// Wire request for a single pulse pair.
    pub fn request(&self, avg_time: f64) -> Option<StdpRequest> {
        let params = self.params()?;
        Some(StdpRequest {
            amplitude: params.amplitude,
            delay: params.delay,
            wait_time: params.wait_time,
            pulse_duration: params.pulse_duration,
            n_points: params.n_points,
            stdp_type: params.stdp_type,
            avg_time,
            noise: params.noise,
            noise_std: params.noise_std,
        })
    }

    /// Wire request for a delay-sweep collection.
    pub fn collection_request(&self, avg_time: f64) -> Option<StdpCollectionRequest> {
        let params = self.params()?;
        Some(StdpCollectionRequest {
            amplitude: params.amplitude,
            delay_points: self.delay_points()?,
            wait_time: params.wait_time,
            pulse_duration: params.pulse_duration,
            stdp_type: params.stdp_type,
            n_points: params.n_points,
            avg_time,
            noise: params.noise,
            noise_std: params.noise_std,
        })
    }

    /// Render the form; returns `true` when any field changed.
    pub fn ui(&mut self, ui: &mut Ui) -> bool {
        let mut changed = false;
        egui::Grid::new("stdp_form")
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                let amplitude_ok = self.amplitude().is_some();
                changed |= quantity_field(ui, "Amplitude", &mut self.amplitude, amplitude_ok);
                let pulse_duration_ok = self.pulse_duration().is_some();
                changed |= quantity_field(
                    ui,
                    "Pulse duration",
                    &mut self.pulse_duration,
                    pulse_duration_ok,
                );
                let delay_ok = self.delay().is_some();
                changed |= quantity_field(ui, "Delay", &mut self.delay, delay_ok);
                let wait_time_ok = self.wait_time().is_some();
                changed |= quantity_field(ui, "Wait time", &mut self.wait_time, wait_time_ok);
                let n_points_ok = self.n_points().is_some();
                changed |= integer_field(ui, "Points", &mut self.n_points, n_points_ok);
                let delay_points_ok = self.delay_points().is_some();
                changed |= integer_field(
                    ui,
                    "Delay points",
                    &mut self.delay_points,
                    delay_points_ok,
                );
            });
        ui.horizontal(|ui| {
            ui.label("Type:");
            changed |= ui
                .selectable_value(&mut self.stdp_type, StdpType::Depression, "Depression")
                .changed();
            changed |= ui
                .selectable_value(&mut self.stdp_type, StdpType::Potenciation, "Potenciation")
                .changed();
        });
        ui.horizontal(|ui| {
            changed |= ui.checkbox(&mut self.noise, "Noise").changed();
            if self.noise {
                let valid = self.noise_std().is_some();
                let mut edit = egui::TextEdit::singleline(&mut self.noise_std).desired_width(70.0);
                if !valid {
                    edit = edit.text_color(egui::Color32::LIGHT_RED);
                }
                changed |= ui.add(edit).changed();
            }
        });
        changed
    }
}
