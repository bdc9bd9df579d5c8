//! SI-prefix scaling and quantity parsing.
//!
//! Axis labels want values in a friendly range ("120 µs", not "0.00012 s").
//! This module picks the best-fit SI prefix for a value, derives the per-axis
//! [`Scaling`] used by the chart engine, and parses operator input strings
//! such as `"10 us"` or `"3 V"` into base-SI values.

use thiserror::Error;

/// Significant digits used when formatting a value for prefix selection.
pub const FORMAT_PRECISION: u32 = 5;

/// SI prefixes from femto to tera, in ascending exponent order.
const PREFIXES: &[(i32, &str)] = &[
    (-15, "f"),
    (-12, "p"),
    (-9, "n"),
    (-6, "µ"),
    (-3, "m"),
    (0, ""),
    (3, "k"),
    (6, "M"),
    (9, "G"),
    (12, "T"),
];

/// A power-of-ten SI prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiPrefix {
    /// Decimal exponent, always a multiple of 3 within [-15, 12].
    pub exponent: i32,
    /// Prefix letter, empty for the base unit.
    pub symbol: &'static str,
}

impl SiPrefix {
    /// The multiplicative value of the prefix (`milli` -> 1e-3).
    pub fn multiplier(&self) -> f64 {
        10f64.powi(self.exponent)
    }

    /// Best-fit prefix keeping the mantissa of `value` in `[1, 1000)`.
    ///
    /// Zero and non-finite values map to the empty prefix.
    pub fn best_fit(value: f64) -> SiPrefix {
        if value == 0.0 || !value.is_finite() {
            return SiPrefix { exponent: 0, symbol: "" };
        }
        let exponent = value.abs().log10().floor() as i32;
        let mut steps = (exponent as f64 / 3.0).floor() as i32 * 3;
        steps = steps.clamp(PREFIXES[0].0, PREFIXES[PREFIXES.len() - 1].0);
        let (exponent, symbol) = PREFIXES
            .iter()
            .copied()
            .find(|(e, _)| *e == steps)
            .unwrap_or((0, ""));
        SiPrefix { exponent, symbol }
    }
}

/// A value rendered against its best-fit prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedQuantity {
    /// Value divided by the prefix multiplier, rounded to [`FORMAT_PRECISION`].
    pub mantissa: f64,
    pub prefix: SiPrefix,
    /// Prefixed unit string, e.g. `"ms"` or `"µA"`.
    pub unit: String,
}

/// Round `x` to `n` significant digits.
pub(crate) fn round_to_significant_digits(x: f64, n: u32) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        let order = x.abs().log10().floor();
        let scale = 10f64.powf((n as f64) - 1.0 - order);
        (x * scale).round() / scale
    }
}

/// Format `value` (in base SI units) with its best-fit prefix.
pub fn format_si(value: f64, base_unit: &str) -> FormattedQuantity {
    let prefix = SiPrefix::best_fit(value);
    let mantissa = round_to_significant_digits(value / prefix.multiplier(), FORMAT_PRECISION);
    FormattedQuantity {
        mantissa,
        prefix,
        unit: format!("{}{}", prefix.symbol, base_unit),
    }
}

/// Axis scaling: a multiplicative factor applied to raw data values and the
/// prefixed unit string to print next to the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Scaling {
    pub scaling_factor: f64,
    pub scale_unit: String,
}

impl Scaling {
    /// Identity scaling with a fixed unit label.
    pub fn identity(unit: &str) -> Scaling {
        Scaling {
            scaling_factor: 1.0,
            scale_unit: unit.to_string(),
        }
    }
}

/// Derive the [`Scaling`] for one axis of a dataset.
///
/// The maximum of `getter` over `data` (plain maximum, not magnitude: callers
/// that want magnitude scaling pre-apply `abs`) is pushed through the prefix
/// engine; the scaling factor is `ceil(1 / prefix)`, never below 1 so values
/// are never scaled down.
pub fn get_scaling<T>(data: &[T], base_unit: &str, getter: impl Fn(&T) -> f64) -> Scaling {
    if data.is_empty() {
        return Scaling::identity(base_unit);
    }
    let max = data.iter().map(&getter).fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return Scaling::identity(base_unit);
    }
    let formatted = format_si(max, base_unit);
    let mut scaling_factor = (1.0 / formatted.prefix.multiplier()).ceil();
    if scaling_factor < 1.0 {
        scaling_factor = 1.0;
    }
    Scaling {
        scaling_factor,
        scale_unit: formatted.unit,
    }
}

/// Error parsing an operator quantity string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitError {
    #[error("invalid number in quantity '{0}'")]
    InvalidNumber(String),
    #[error("unknown unit '{0}'")]
    UnknownUnit(String),
}

/// A parsed quantity: value in base SI units plus the base unit string.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
}

/// Base units accepted from operator input.
const BASE_UNITS: &[&str] = &["s", "V", "A", "S"];

/// Parse a quantity string such as `"10 us"`, `"3V"` or `"-0.5 mV"`.
///
/// The ASCII `u` is accepted as a spelling of `µ`. A bare number parses as a
/// dimensionless quantity with an empty unit.
pub fn parse_quantity(input: &str) -> Result<Quantity, UnitError> {
    let trimmed = input.trim();
    let split = trimmed
        .char_indices()
        .find(|&(_, c)| !c.is_ascii_digit() && !matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    // "1e-6 s" style exponents keep their sign glued to the 'e'; the first
    // non-numeric char found above can not sit inside the mantissa.
    let (number_str, unit_str) = trimmed.split_at(split);
    let number: f64 = number_str
        .trim()
        .parse()
        .map_err(|_| UnitError::InvalidNumber(trimmed.to_string()))?;

    let unit_str = unit_str.trim();
    if unit_str.is_empty() {
        return Ok(Quantity {
            value: number,
            unit: String::new(),
        });
    }

    if BASE_UNITS.contains(&unit_str) {
        return Ok(Quantity {
            value: number,
            unit: unit_str.to_string(),
        });
    }

    let mut chars = unit_str.chars();
    let Some(prefix_char) = chars.next() else {
        return Err(UnitError::UnknownUnit(unit_str.to_string()));
    };
    let rest: String = chars.collect();
    if !BASE_UNITS.contains(&rest.as_str()) {
        return Err(UnitError::UnknownUnit(unit_str.to_string()));
    }
    let exponent = match prefix_char {
        'f' => -15,
        'p' => -12,
        'n' => -9,
        'u' | 'µ' => -6,
        'm' => -3,
        'k' => 3,
        'M' => 6,
        'G' => 9,
        'T' => 12,
        _ => return Err(UnitError::UnknownUnit(unit_str.to_string())),
    };
    Ok(Quantity {
        value: number * 10f64.powi(exponent),
        unit: rest,
    })
}
