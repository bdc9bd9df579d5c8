//! Pulse train parameter form.

use egui::Ui;
use serde::{Deserialize, Serialize};

use crate::measurement::PulseRequest;
use crate::waveform::PulseTrainParams;

use super::{integer_field, parse_with_unit, quantity_field};

/// Preview never replicates more than this many cycles.
const MAX_PREVIEW_PULSES: u32 = 100;

/// Raw operator input for a pulse train.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PulseForm {
    pub v_high: String,
    pub v_low: String,
    pub n_pulses: String,
    pub cycle_time: String,
    pub duty_cycle: String,
    pub n_points_high: String,
    pub n_points_low: String,
    pub noise: bool,
    pub noise_std: String,
}

impl Default for PulseForm {
    fn default() -> Self {
        PulseForm {
            v_high: "1 V".into(),
            v_low: "0 V".into(),
            n_pulses: "10".into(),
            cycle_time: "10 us".into(),
            duty_cycle: "50".into(),
            n_points_high: "10".into(),
            n_points_low: "10".into(),
            noise: false,
            noise_std: "0 mV".into(),
        }
    }
}

impl PulseForm {
    fn v_high(&self) -> Option<f64> {
        parse_with_unit(&self.v_high, &["V"])
    }

    fn v_low(&self) -> Option<f64> {
        parse_with_unit(&self.v_low, &["V"])
    }

    fn cycle_time(&self) -> Option<f64> {
        parse_with_unit(&self.cycle_time, &["s"]).filter(|t| *t > 0.0)
    }

    fn duty_cycle(&self) -> Option<f64> {
        let value: f64 = self.duty_cycle.trim().parse().ok()?;
        (0.0..=100.0).contains(&value).then_some(value)
    }

    fn n_pulses(&self) -> Option<u32> {
        self.n_pulses.trim().parse().ok()
    }

    fn n_points_high(&self) -> Option<u32> {
        self.n_points_high.trim().parse().ok()
    }

    fn n_points_low(&self) -> Option<u32> {
        self.n_points_low.trim().parse().ok()
    }

    fn noise_std(&self) -> Option<f64> {
        parse_with_unit(&self.noise_std, &["V"]).filter(|v| *v >= 0.0)
    }

    /// Generator parameters, `None` while any field is invalid. The pulse
    /// count is capped for the preview.
    pub fn params(&self) -> Option<PulseTrainParams> {
        Some(PulseTrainParams {
            v_high: self.v_high()?,
            v_low: self.v_low()?,
            n_pulses: self.n_pulses()?.min(MAX_PREVIEW_PULSES),
            duty_cycle: self.duty_cycle()?,
            cycle_time: self.cycle_time()?,
            n_points_high: self.n_points_high()?,
            n_points_low: self.n_points_low()?,
        })
    }

    /// Wire request, `None` while any field is invalid. The wire carries
    /// the duty cycle as a fraction.
    pub fn request(&self, avg_time: f64) -> Option<PulseRequest> {
        Some(PulseRequest {
            v_high: self.v_high()?,
            v_low: self.v_low()?,
            cycle_time: self.cycle_time()?,
            duty_cycle: self.duty_cycle()? / 100.0,
            n_pulses: self.n_pulses()?,
            n_points_high: self.n_points_high()?,
            n_points_low: self.n_points_low()?,
            avg_time,
            noise: self.noise,
            noise_std: if self.noise { self.noise_std()? } else { 0.0 },
        })
    }

    /// Render the form; returns `true` when any field changed.
    pub fn ui(&mut self, ui: &mut Ui) -> bool {
        let mut changed = false;
        egui::Grid::new("pulse_form")
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                let v_high_ok = self.v_high().is_some();
                changed |= quantity_field(ui, "V high", &mut self.v_high, v_high_ok);
                let v_low_ok = self.v_low().is_some();
                changed |= quantity_field(ui, "V low", &mut self.v_low, v_low_ok);
                let n_pulses_ok = self.n_pulses().is_some();
                changed |= integer_field(ui, "Pulses", &mut self.n_pulses, n_pulses_ok);
                let cycle_time_ok = self.cycle_time().is_some();
                changed |= quantity_field(
                    ui,
                    "Cycle time",
                    &mut self.cycle_time,
                    cycle_time_ok,
                );
                let duty_cycle_ok = self.duty_cycle().is_some();
                changed |= quantity_field(
                    ui,
                    "Duty cycle (%)",
                    &mut self.duty_cycle,
                    duty_cycle_ok,
                );
                let n_points_high_ok = self.n_points_high().is_some();
                changed |= integer_field(
                    ui,
                    "Points high",
                    &mut self.n_points_high,
                    n_points_high_ok,
                );
                let n_points_low_ok = self.n_points_low().is_some();
                changed |= integer_field(
                    ui,
                    "Points low",
                    &mut self.n_points_low,
                    n_points_low_ok,
                );
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
