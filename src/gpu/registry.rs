use std::collections::HashMap;

use eframe::glow;

use super::program::{ShaderProgram, ShaderSource};
use crate::error::ShaderError;
use crate::types::{AssetPaths, ShaderKey};

/// Every display effect's compiled program, keyed by [`ShaderKey`]. Views keep
/// a key and look the program up on use.
#[derive(Debug, Default)]
pub struct ProgramRegistry {
    programs: HashMap<ShaderKey, ShaderProgram>,
}

impl ProgramRegistry {
    /// Compiles one program per [`ShaderKey`], all sharing `basic.vert`. The
    /// first failure aborts and releases what was already built.
    pub fn load(gl: &glow::Context, assets: &AssetPaths) -> Result<Self, ShaderError> {
        let mut registry = Self::default();
        for &key in ShaderKey::all() {
            let built = ShaderSource::load(&assets.vertex_shader(), &assets.fragment_shader(key))
                .and_then(|source| ShaderProgram::compile(gl, &source));
            match built {
                Ok(program) => {
                    log::debug!("Compiled '{}' shader program", key.name());
                    registry.programs.insert(key, program);
                }
                Err(e) => {
                    log::error!("Shader program '{}' failed: {e}", key.name());
                    registry.destroy_all(gl);
                    return Err(e);
                }
            }
        }
        Ok(registry)
    }

    pub(crate) fn from_programs(programs: HashMap<ShaderKey, ShaderProgram>) -> Self {
        Self { programs }
    }

    pub fn contains(&self, key: ShaderKey) -> bool {
        self.programs.get(&key).is_some_and(ShaderProgram::is_live)
    }

    /// Maps a program name to its key, failing unless a live program exists
    /// for it.
    pub fn resolve(&self, name: &str) -> Result<ShaderKey, ShaderError> {
        ShaderKey::from_name(name)
            .filter(|key| self.contains(*key))
            .ok_or_else(|| ShaderError::UnknownProgram(name.to_string()))
    }

    pub fn program(&self, key: ShaderKey) -> Result<glow::Program, ShaderError> {
        self.programs
            .get(&key)
            .and_then(ShaderProgram::raw)
            .ok_or_else(|| ShaderError::UnknownProgram(key.name().to_string()))
    }

    pub fn destroy_all(&mut self, gl: &glow::Context) {
        for program in self.programs.values_mut() {
            program.destroy(gl);
        }
    }

    #[cfg(test)]
    pub(crate) fn release_raw(&mut self, key: ShaderKey) -> Option<glow::Program> {
        self.programs.get_mut(&key).and_then(ShaderProgram::take_raw)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::num::NonZeroU32;

    pub(crate) fn fake_registry(keys: &[ShaderKey]) -> ProgramRegistry {
        let programs = keys
            .iter()
            .enumerate()
            .map(|(i, key)| {
                let raw = glow::NativeProgram(NonZeroU32::new(i as u32 + 1).unwrap());
                (*key, ShaderProgram::from_raw(raw))
            })
            .collect();
        ProgramRegistry::from_programs(programs)
    }

    #[test]
    fn resolve_known_name() {
        let registry = fake_registry(ShaderKey::all());
        assert_eq!(registry.resolve("grayscale").unwrap(), ShaderKey::Grayscale);
    }

    #[test]
    fn resolve_unknown_name_fails() {
        let registry = fake_registry(ShaderKey::all());
        let err = registry.resolve("sepia").unwrap_err();
        assert!(matches!(err, ShaderError::UnknownProgram(ref name) if name == "sepia"));
    }

    #[test]
    fn resolve_fails_for_key_missing_from_collection() {
        let registry = fake_registry(&[ShaderKey::Color]);
        assert!(matches!(
            registry.resolve("monochrome"),
            Err(ShaderError::UnknownProgram(_))
        ));
        assert!(registry.program(ShaderKey::Monochrome).is_err());
    }

    #[test]
    fn released_program_is_no_longer_selectable() {
        let mut registry = fake_registry(ShaderKey::all());
        assert!(registry.release_raw(ShaderKey::Color).is_some());
        assert!(registry.release_raw(ShaderKey::Color).is_none());

        assert!(!registry.contains(ShaderKey::Color));
        assert!(registry.resolve("color").is_err());
        assert!(registry.contains(ShaderKey::Grayscale));
    }
}
