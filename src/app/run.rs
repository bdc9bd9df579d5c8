//! Top-level entry point for running WaveLab as a native window.

use eframe::egui;

use crate::backend::SharedBackend;

use super::WaveLabApp;

/// Launch the WaveLab application against a backend.
///
/// Opens a native window and blocks until it is closed.
pub fn run_wavelab(backend: SharedBackend) -> eframe::Result<()> {
    let mut options = eframe::NativeOptions::default();
    options.viewport = egui::ViewportBuilder::default().with_inner_size([1400.0, 900.0]);
    eframe::run_native(
        "WaveLab",
        options,
        Box::new(|_cc| Ok(Box::new(WaveLabApp::new(backend)))),
    )
}
