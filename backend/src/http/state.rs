//! Application state for the HTTP server.

use std::sync::Arc;

use crate::emulator::Emulator;
use crate::services::resources::FormOptionsDocument;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Emulator used for every run request
    pub emulator: Arc<dyn Emulator>,
    /// Form options loaded at startup
    pub form_options: Arc<FormOptionsDocument>,
}

impl AppState {
    pub fn new(emulator: Arc<dyn Emulator>, form_options: FormOptionsDocument) -> Self {
        Self {
            emulator,
            form_options: Arc::new(form_options),
        }
    }
}
