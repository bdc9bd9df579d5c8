//! Parameter forms: operator-facing string fields with unit validation.
//!
//! Forms keep the raw strings the operator typed ("10 us", "3 V"); parsing
//! happens on every edit and a failed parse only flags the field as invalid,
//! it never reaches the generators.

pub mod pulse_ui;
pub mod stdp_ui;

pub use pulse_ui::PulseForm;
pub use stdp_ui::StdpForm;

use egui::{Color32, Ui};

use crate::units::parse_quantity;

/// A single-line edit for a quantity string, tinted red while invalid.
///
/// Returns `true` when the text changed.
pub fn quantity_field(ui: &mut Ui, label: &str, value: &mut String, valid: bool) -> bool {
    ui.label(label);
    let mut edit = egui::TextEdit::singleline(value).desired_width(90.0);
    if !valid {
        edit = edit.text_color(Color32::LIGHT_RED);
    }
    let response = ui.add(edit);
    ui.end_row();
    response.changed()
}

/// A single-line edit for an integer string.
pub fn integer_field(ui: &mut Ui, label: &str, value: &mut String, valid: bool) -> bool {
    quantity_field(ui, label, value, valid)
}

/// Parse a quantity string, expecting one of the given base units.
pub fn parse_with_unit(input: &str, expected: &[&str]) -> Option<f64> {
    let quantity = parse_quantity(input).ok()?;
    if quantity.unit.is_empty() && !expected.contains(&"") {
        return None;
    }
    if !quantity.unit.is_empty() && !expected.contains(&quantity.unit.as_str()) {
        return None;
    }
    Some(quantity.value)
}
