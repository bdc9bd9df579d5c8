use std::sync::{Arc, Mutex};

use wavelab::backend::{SharedBackend, SimBackend};

fn main() -> eframe::Result<()> {
    env_logger::init();
    let backend: SharedBackend = Arc::new(Mutex::new(SimBackend::default()));
    wavelab::run_wavelab(backend)
}
