/// Display effect applied by the canvas when drawing its texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShaderKey {
    #[default]
    Color,
    Grayscale,
    Monochrome,
}

impl ShaderKey {
    pub fn name(&self) -> &'static str {
        match self {
            ShaderKey::Color => "color",
            ShaderKey::Grayscale => "grayscale",
            ShaderKey::Monochrome => "monochrome",
        }
    }

    pub fn from_name(name: &str) -> Option<ShaderKey> {
        Self::all().iter().copied().find(|key| key.name() == name)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ShaderKey::Color => "Color",
            ShaderKey::Grayscale => "Grayscale",
            ShaderKey::Monochrome => "Monochrome",
        }
    }

    pub fn fragment_file(&self) -> &'static str {
        match self {
            ShaderKey::Color => "color.frag",
            ShaderKey::Grayscale => "grayscale.frag",
            ShaderKey::Monochrome => "monochrome.frag",
        }
    }

    pub fn all() -> &'static [ShaderKey] {
        &[ShaderKey::Color, ShaderKey::Grayscale, ShaderKey::Monochrome]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_back_to_keys() {
        for key in ShaderKey::all() {
            assert_eq!(ShaderKey::from_name(key.name()), Some(*key));
        }
        assert_eq!(ShaderKey::from_name("sepia"), None);
    }
}
