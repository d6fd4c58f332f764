pub mod annotation;
pub mod app_state;
pub mod assets;
pub mod preferences;
pub mod shader;

// Re-export all public types for convenience
pub use annotation::{ClickMode, HoverMode, ShapeStyle};
pub use app_state::{AppState, Command, StatusMessage};
pub use assets::AssetPaths;
pub use preferences::UserPreferences;
pub use shader::ShaderKey;
