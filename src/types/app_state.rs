use std::path::PathBuf;

use super::annotation::ClickMode;
use super::preferences::UserPreferences;

/// A user request produced by a widget during a frame and applied by the app
/// in the same frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    OpenImage,
    LoadImage { path: PathBuf },
    SaveImage,
    Quit,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    ToGrayscale,
    Blur,
    SetClickMode(ClickMode),
    CancelClickMode,
    SetShader { name: String },
    CanvasClicked { x: u32, y: u32 },
    ShowAbout,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

pub struct AppState {
    pub click_mode: ClickMode,
    pub preferences: UserPreferences,
    last_preferences: UserPreferences,
    pub status: Option<StatusMessage>,
    pub show_about: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_preferences(UserPreferences::load())
    }
}

impl AppState {
    pub fn with_preferences(preferences: UserPreferences) -> Self {
        Self {
            click_mode: ClickMode::None,
            last_preferences: preferences.clone(),
            preferences,
            status: None,
            show_about: false,
        }
    }

    pub fn check_and_save_preferences(&mut self) {
        if self.preferences_changed() {
            self.last_preferences = self.preferences.clone();
            if let Err(e) = self.preferences.save() {
                log::error!("Failed to save preferences: {e}");
            }
        }
    }

    pub fn preferences_changed(&self) -> bool {
        self.preferences != self.last_preferences
    }

    pub fn remember_directory(&mut self, path: &std::path::Path) {
        if let Some(parent) = path.parent() {
            self.preferences.last_directory = Some(parent.to_path_buf());
        }
    }

    pub fn report_error(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::error!("{text}");
        self.status = Some(StatusMessage::error(text));
    }

    pub fn report_info(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::info!("{text}");
        self.status = Some(StatusMessage::info(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HoverMode;

    #[test]
    fn preference_edits_are_tracked() {
        let mut state = AppState::with_preferences(UserPreferences::default());
        assert!(!state.preferences_changed());

        state.preferences.hover_mode = HoverMode::PixelValue;
        assert!(state.preferences_changed());
    }

    #[test]
    fn remember_directory_stores_parent() {
        let mut state = AppState::with_preferences(UserPreferences::default());
        state.remember_directory(std::path::Path::new("/photos/trip/beach.png"));
        assert_eq!(
            state.preferences.last_directory,
            Some(PathBuf::from("/photos/trip"))
        );
    }

    #[test]
    fn errors_become_status_messages() {
        let mut state = AppState::with_preferences(UserPreferences::default());
        state.report_error("could not open");
        assert_eq!(state.status, Some(StatusMessage::error("could not open")));
    }
}
