//! Generator configuration (spec §4.E).

use crate::error::TpegError;

/// The options enumerated in spec §4.E, and nothing else — unknown
/// keys reaching [`GeneratorConfig::from_options`] are rejected rather
/// than silently ignored (spec §6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub name_prefix: String,
    pub include_imports: bool,
    pub include_types: bool,
    pub combinator_module: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            name_prefix: String::new(),
            include_imports: true,
            include_types: true,
            combinator_module: "tpeg::combinator".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Builds a config from a dynamic key/value map — the shape a CLI
    /// flag parser or a deserialized file hands the generator, as
    /// opposed to a plain struct literal a host written in Rust would
    /// use directly.
    pub fn from_options(
        options: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, TpegError> {
        let mut config = Self::default();
        for (key, value) in options {
            match key.as_str() {
                "namePrefix" => config.name_prefix = value,
                "includeImports" => config.include_imports = parse_bool(&key, &value)?,
                "includeTypes" => config.include_types = parse_bool(&key, &value)?,
                "combinatorModule" => config.combinator_module = value,
                _ => return Err(TpegError::InvalidConfiguration { key }),
            }
        }
        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, TpegError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(TpegError::InvalidConfiguration {
            key: key.to_string(),
        }),
    }
}
