//! Parameter preset persistence: save and load the form state as JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::panels::{PulseForm, StdpForm};

/// Everything worth keeping between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presets {
    #[serde(default)]
    pub pulse: PulseForm,
    #[serde(default)]
    pub stdp: StdpForm,
    #[serde(default = "default_avg_time")]
    pub avg_time: String,
}

fn default_avg_time() -> String {
    "10 ns".into()
}

impl Default for Presets {
    fn default() -> Self {
        Presets {
            pulse: PulseForm::default(),
            stdp: StdpForm::default(),
            avg_time: default_avg_time(),
        }
    }
}

impl Presets {
    pub fn new(pulse: PulseForm, stdp: StdpForm, avg_time: String) -> Presets {
        Presets { pulse, stdp, avg_time }
    }
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("preset io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("preset parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write presets as pretty JSON.
pub fn save_presets(path: &Path, presets: &Presets) -> Result<(), PersistenceError> {
    let json = serde_json::to_string_pretty(presets)?;
    fs::write(path, json)?;
    Ok(())
}

/// Read presets back from a JSON file.
pub fn load_presets(path: &Path) -> Result<Presets, PersistenceError> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}
