//! The single "currently displayed" weather slot.

use skyview_weather::WeatherView;

use crate::AppError;

/// Display state owned by exactly one loop.
///
/// Results are applied in the order they arrive, so when several fetches
/// overlap the last one to complete is what stays on screen.
#[derive(Debug, Default)]
pub struct Dashboard {
    view: Option<WeatherView>,
    error: Option<String>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> Option<&WeatherView> {
        self.view.as_ref()
    }

    /// User-facing message from the most recent failure, cleared on success
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Apply a fetch outcome. Failures keep whatever view is already shown.
    pub fn apply(&mut self, result: Result<WeatherView, AppError>) {
        match result {
            Ok(view) => self.show(view),
            Err(e) => self.fail(&e),
        }
    }

    pub fn show(&mut self, view: WeatherView) {
        self.view = Some(view);
        self.error = None;
    }

    pub fn fail(&mut self, error: &AppError) {
        self.error = Some(error.user_message());
    }

    /// Drop the current view and show `error` alone.
    pub fn clear(&mut self, error: &AppError) {
        self.view = None;
        self.fail(error);
    }
}
