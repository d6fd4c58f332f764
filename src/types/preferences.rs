use std::path::{Path, PathBuf};

use super::annotation::{HoverMode, ShapeStyle};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub hover_mode: HoverMode,
    pub shape_style: ShapeStyle,
    pub last_directory: Option<PathBuf>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            hover_mode: HoverMode::None,
            shape_style: ShapeStyle::default(),
            last_directory: None,
        }
    }
}

impl UserPreferences {
    pub fn config_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("ImageCanvas").join("preferences.json")
        } else {
            PathBuf::from("preferences.json")
        }
    }

    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&content) {
            Ok(prefs) => prefs,
            Err(e) => {
                log::warn!("Ignoring unreadable preferences {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Directory file dialogs should start in.
    pub fn dialog_directory(&self) -> Option<&Path> {
        self.last_directory.as_deref().filter(|dir| dir.is_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("image_canvas_prefs_{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn save_and_load_round_trip() {
        let path = temp_path("preferences.json");
        let prefs = UserPreferences {
            hover_mode: HoverMode::PixelValue,
            shape_style: ShapeStyle {
                radius: 42,
                has_fill: false,
                ..ShapeStyle::default()
            },
            last_directory: Some(PathBuf::from("/tmp")),
        };

        prefs.save_to(&path).unwrap();
        let loaded = UserPreferences::load_from(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, prefs);
    }

    #[test]
    fn missing_or_corrupt_file_falls_back_to_defaults() {
        assert_eq!(
            UserPreferences::load_from(&temp_path("missing.json")),
            UserPreferences::default()
        );

        let path = temp_path("corrupt.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(UserPreferences::load_from(&path), UserPreferences::default());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let loaded: UserPreferences =
            serde_json::from_str(r#"{ "hover_mode": "ImageSubset" }"#).unwrap();
        assert_eq!(loaded.hover_mode, HoverMode::ImageSubset);
        assert_eq!(loaded.shape_style, ShapeStyle::default());
    }
}
