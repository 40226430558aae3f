//! Shared configuration loader for the quill toolchain.
//!
//! `defaults/quill.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`QuillConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use quill_babel::{RenderOptions, SerializeOptions};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/quill.default.toml");

/// Top-level configuration consumed by quill applications.
#[derive(Debug, Clone, Deserialize)]
pub struct QuillConfig {
    pub render: RenderConfig,
    pub serialize: SerializeConfig,
    pub logging: LoggingConfig,
}

/// Markdown → HTML knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub class_prefix: String,
    pub max_heading_level: u8,
    pub strip_frontmatter: bool,
}

impl From<RenderConfig> for RenderOptions {
    fn from(config: RenderConfig) -> Self {
        RenderOptions {
            class_prefix: config.class_prefix,
            strip_frontmatter: config.strip_frontmatter,
            ..RenderOptions::default()
        }
        .with_max_heading_level(config.max_heading_level)
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        config.clone().into()
    }
}

/// HTML → Markdown knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct SerializeConfig {
    pub bullet_marker: char,
    pub emphasis_marker: char,
}

impl From<SerializeConfig> for SerializeOptions {
    fn from(config: SerializeConfig) -> Self {
        SerializeOptions {
            bullet_marker: config.bullet_marker,
            emphasis_marker: config.emphasis_marker,
        }
    }
}

impl From<&SerializeConfig> for SerializeOptions {
    fn from(config: &SerializeConfig) -> Self {
        config.clone().into()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing-subscriber` filter directive used when `QUILL_LOG` is unset.
    pub filter: String,
}

impl QuillConfig {
    /// Reject values the converters cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=6).contains(&self.render.max_heading_level) {
            return Err(ConfigError::Message(format!(
                "render.max_heading_level must be between 1 and 6, got {}",
                self.render.max_heading_level
            )));
        }
        if !matches!(self.serialize.bullet_marker, '-' | '*' | '+') {
            return Err(ConfigError::Message(format!(
                "serialize.bullet_marker must be one of '-', '*', '+', got {:?}",
                self.serialize.bullet_marker
            )));
        }
        if !matches!(self.serialize.emphasis_marker, '*' | '_') {
            return Err(ConfigError::Message(format!(
                "serialize.emphasis_marker must be '*' or '_', got {:?}",
                self.serialize.emphasis_marker
            )));
        }
        Ok(())
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder, deserialize and validate the resulting configuration.
    pub fn build(self) -> Result<QuillConfig, ConfigError> {
        let config: QuillConfig = self.builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<QuillConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.render.class_prefix, "md");
        assert_eq!(config.render.max_heading_level, 3);
        assert!(config.render.strip_frontmatter);
        assert_eq!(config.serialize.bullet_marker, '-');
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn defaults_match_library_defaults() {
        let config = load_defaults().expect("defaults to deserialize");
        let render: RenderOptions = config.render.into();
        let serialize: SerializeOptions = config.serialize.into();
        assert_eq!(render, RenderOptions::default());
        assert_eq!(serialize, SerializeOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("render.class_prefix", "doc")
            .expect("override to apply")
            .set_override("serialize.emphasis_marker", "_")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.render.class_prefix, "doc");
        assert_eq!(config.serialize.emphasis_marker, '_');
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = Loader::new()
            .set_override("render.max_heading_level", 9i64)
            .expect("override to apply")
            .build()
            .expect_err("level 9 is invalid");
        assert!(err.to_string().contains("max_heading_level"));

        let err = Loader::new()
            .set_override("serialize.bullet_marker", "x")
            .expect("override to apply")
            .build()
            .expect_err("x is not a bullet");
        assert!(err.to_string().contains("bullet_marker"));
    }

    #[test]
    fn layers_files_over_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("quill.toml");
        let mut file = std::fs::File::create(&path).expect("config file");
        writeln!(file, "[render]\nmax_heading_level = 5").expect("write config");

        let config = Loader::new()
            .with_optional_file(dir.path().join("missing.toml"))
            .with_file(&path)
            .build()
            .expect("config to build");
        assert_eq!(config.render.max_heading_level, 5);
        assert_eq!(config.render.class_prefix, "md");
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new()
            .with_file("/definitely/not/here/quill.toml")
            .build();
        assert!(result.is_err());
    }
}
