use std::path::{Path, PathBuf};

use super::ShaderKey;

/// Environment variable overriding the assets directory.
pub const ASSETS_ENV_VAR: &str = "IMAGE_CANVAS_ASSETS";
const DEFAULT_ASSETS_DIR: &str = "assets";

/// Fixed layout of the assets directory (shaders and bundled images).
#[derive(Clone, Debug, PartialEq)]
pub struct AssetPaths {
    root: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self::new(DEFAULT_ASSETS_DIR)
    }
}

impl AssetPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_env() -> Self {
        match std::env::var_os(ASSETS_ENV_VAR) {
            Some(root) => {
                let assets = Self::new(root);
                log::info!("Using assets from {}", assets.root().display());
                assets
            }
            None => Self::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn vertex_shader(&self) -> PathBuf {
        self.root.join("shaders").join("basic.vert")
    }

    pub fn fragment_shader(&self, key: ShaderKey) -> PathBuf {
        self.root.join("shaders").join(key.fragment_file())
    }

    pub fn default_image(&self) -> PathBuf {
        self.root.join("images").join("default.png")
    }

    pub fn logo_image(&self) -> PathBuf {
        self.root.join("images").join("logo.png")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_rooted_in_assets_dir() {
        let assets = AssetPaths::new("/opt/canvas");
        assert_eq!(
            assets.vertex_shader(),
            PathBuf::from("/opt/canvas/shaders/basic.vert")
        );
        assert_eq!(
            assets.fragment_shader(ShaderKey::Monochrome),
            PathBuf::from("/opt/canvas/shaders/monochrome.frag")
        );
        assert_eq!(
            assets.default_image(),
            PathBuf::from("/opt/canvas/images/default.png")
        );
    }

    #[test]
    fn default_root_is_relative_assets() {
        assert_eq!(AssetPaths::default().root(), Path::new("assets"));
    }
}
