use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Limits used by the analyzers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Wall-clock budget for prime factorization, in seconds
    pub factorization_timeout_secs: u64,
    /// Rows shown in "Character Frequency"
    pub most_common_limit: usize,
    /// Rows shown in "Number Frequency"
    pub number_frequency_limit: usize,
    /// Rows shown in "Repeated sequences detection"
    pub repeated_sequence_limit: usize,
    /// Numbers listed by "Extract Num" before eliding
    pub extract_display_limit: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            factorization_timeout_secs: 5,
            most_common_limit: 20,
            number_frequency_limit: 15,
            repeated_sequence_limit: 15,
            extract_display_limit: 20,
        }
    }
}

impl AnalysisSettings {
    pub fn factorization_timeout(&self) -> Duration {
        Duration::from_secs(self.factorization_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    pub format: OutputFormat,
    /// Decimal places for floating-point statistics
    pub float_precision: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            float_precision: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CipherSettings {
    /// Affine key used when the caller passes none, as "a,b"
    pub affine_default_key: String,
}

impl Default for CipherSettings {
    fn default() -> Self {
        Self {
            affine_default_key: "5,8".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    pub max_length: usize,
    pub max_count: usize,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            max_length: 100_000,
            max_count: 10_000,
        }
    }
}

/// Read-only configuration injected into the dispatcher and renderer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub ciphers: CipherSettings,
    #[serde(default)]
    pub generators: GeneratorSettings,
}

/// A partially-specified settings file. Absent keys leave the base value alone.
#[derive(Debug, Default, Deserialize)]
struct SettingsOverride {
    #[serde(default)]
    analysis: AnalysisOverride,
    #[serde(default)]
    render: RenderOverride,
    #[serde(default)]
    ciphers: CipherOverride,
    #[serde(default)]
    generators: GeneratorOverride,
}

#[derive(Debug, Default, Deserialize)]
struct AnalysisOverride {
    factorization_timeout_secs: Option<u64>,
    most_common_limit: Option<usize>,
    number_frequency_limit: Option<usize>,
    repeated_sequence_limit: Option<usize>,
    extract_display_limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct RenderOverride {
    format: Option<OutputFormat>,
    float_precision: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct CipherOverride {
    affine_default_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct GeneratorOverride {
    max_length: Option<usize>,
    max_count: Option<usize>,
}

fn apply<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

impl Settings {
    /// Parses a complete settings file. Missing sections take their defaults.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads the settings bundled with the library.
    pub fn load_default() -> Result<Self, Box<dyn std::error::Error>> {
        let content = include_str!("../../toolkit.toml");
        Ok(Self::from_toml(content)?)
    }

    /// Loads the bundled settings, then applies the file at `path` on top.
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings = Self::load_default()?;
        settings.merge_file(path)?;
        Ok(settings)
    }

    /// Loads settings with user overrides from standard locations.
    ///
    /// Searches in priority order:
    /// 1. Built-in settings (from library)
    /// 2. `~/.config/alterm/toolkit.toml` (user overrides)
    /// 3. `./toolkit.toml` (project-local overrides)
    ///
    /// Later files override earlier ones key by key.
    pub fn load_with_overrides() -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings = Self::load_default()?;

        if let Some(config_dir) = dirs::config_dir() {
            let user_path = config_dir.join("alterm").join("toolkit.toml");
            if user_path.exists() {
                if let Err(e) = settings.merge_file(&user_path) {
                    tracing::warn!("Failed to load user config from {:?}: {}", user_path, e);
                }
            }
        }

        let local_path = Path::new("toolkit.toml");
        if local_path.exists() {
            if let Err(e) = settings.merge_file(local_path) {
                tracing::warn!("Failed to load local config from {:?}: {}", local_path, e);
            }
        }

        Ok(settings)
    }

    /// Applies the keys present in a TOML override document.
    pub fn merge_toml(&mut self, content: &str) -> Result<(), toml::de::Error> {
        let other: SettingsOverride = toml::from_str(content)?;
        self.merge(other);
        Ok(())
    }

    fn merge_file(&mut self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        self.merge_toml(&content)?;
        tracing::debug!("merged settings from {:?}", path);
        Ok(())
    }

    fn merge(&mut self, other: SettingsOverride) {
        let a = other.analysis;
        apply(
            &mut self.analysis.factorization_timeout_secs,
            a.factorization_timeout_secs,
        );
        apply(&mut self.analysis.most_common_limit, a.most_common_limit);
        apply(
            &mut self.analysis.number_frequency_limit,
            a.number_frequency_limit,
        );
        apply(
            &mut self.analysis.repeated_sequence_limit,
            a.repeated_sequence_limit,
        );
        apply(
            &mut self.analysis.extract_display_limit,
            a.extract_display_limit,
        );

        apply(&mut self.render.format, other.render.format);
        apply(&mut self.render.float_precision, other.render.float_precision);

        apply(
            &mut self.ciphers.affine_default_key,
            other.ciphers.affine_default_key,
        );

        apply(&mut self.generators.max_length, other.generators.max_length);
        apply(&mut self.generators.max_count, other.generators.max_count);
    }
}
