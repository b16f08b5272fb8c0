//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.nur/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::Engine;
use crate::api::hadith::DEFAULT_HADITH_BASE_URL;
use crate::api::quran::DEFAULT_QURAN_BASE_URL;
use crate::core::model::TranslationLang;
use crate::inference::providers::gemini::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_INSIGHT_MODEL, DEFAULT_ISNAD_MODEL,
};
use crate::inference::providers::ollama::{DEFAULT_OLLAMA_BASE_URL, DEFAULT_OLLAMA_MODEL};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NurConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_engine: Option<Engine>,
    pub target_language: Option<TranslationLang>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub insight_model: Option<String>,
    pub isnad_model: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OllamaConfig {
    pub base_url: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SourcesConfig {
    pub quran_base_url: Option<String>,
    pub hadith_base_url: Option<String>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub engine: Engine,
    pub language: TranslationLang,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_insight_model: String,
    pub gemini_isnad_model: String,
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub quran_base_url: String,
    pub hadith_base_url: String,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides {
    pub engine: Option<Engine>,
    pub language: Option<TranslationLang>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.nur/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".nur").join("config.toml"))
}

/// Load config from `~/.nur/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `NurConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<NurConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(NurConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<NurConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(NurConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: NurConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    // Debug output would leak the API key into nur.log
    debug!(
        "Config: engine={:?}, language={:?}, gemini key set={}",
        config.general.default_engine,
        config.general.target_language,
        config.gemini.api_key.is_some()
    );
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Nur Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_engine = "gemini"          # "gemini" or "ollama"
# target_language = "english"        # "english" or "tamil"

# [gemini]
# api_key = "..."                    # Or set GEMINI_API_KEY env var
# base_url = "https://generativelanguage.googleapis.com/v1beta"
# insight_model = "gemini-3-flash-preview"
# isnad_model = "gemini-3-pro-preview"

# [ollama]
# base_url = "http://localhost:11434"
# model = "llama3"

# [sources]
# quran_base_url = "https://api.alquran.cloud/v1"
# hadith_base_url = "https://cdn.jsdelivr.net/gh/fawazahmed0/hadith-api@1"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

fn env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &NurConfig, cli: CliOverrides) -> ResolvedConfig {
    // Engine: CLI → env → config → default
    let engine = cli
        .engine
        .or_else(|| {
            env("NUR_ENGINE").and_then(|s| match s.to_lowercase().as_str() {
                "gemini" => Some(Engine::Gemini),
                "ollama" => Some(Engine::Ollama),
                other => {
                    warn!("Ignoring unknown NUR_ENGINE value: {other}");
                    None
                }
            })
        })
        .or(config.general.default_engine)
        .unwrap_or_default();

    let language = cli
        .language
        .or(config.general.target_language)
        .unwrap_or_default();

    // Gemini API key: env → config
    let gemini_api_key = env("GEMINI_API_KEY")
        .or_else(|| env("API_KEY"))
        .or_else(|| config.gemini.api_key.clone());

    let gemini_base_url = env("GEMINI_BASE_URL")
        .or_else(|| config.gemini.base_url.clone())
        .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());

    let ollama_base_url = env("OLLAMA_BASE_URL")
        .or_else(|| config.ollama.base_url.clone())
        .unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.to_string());

    let ollama_model = env("OLLAMA_MODEL")
        .or_else(|| config.ollama.model.clone())
        .unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string());

    let quran_base_url = env("QURAN_API_BASE_URL")
        .or_else(|| config.sources.quran_base_url.clone())
        .unwrap_or_else(|| DEFAULT_QURAN_BASE_URL.to_string());

    let hadith_base_url = env("HADITH_API_BASE_URL")
        .or_else(|| config.sources.hadith_base_url.clone())
        .unwrap_or_else(|| DEFAULT_HADITH_BASE_URL.to_string());

    ResolvedConfig {
        engine,
        language,
        gemini_api_key,
        gemini_base_url,
        gemini_insight_model: config
            .gemini
            .insight_model
            .clone()
            .unwrap_or_else(|| DEFAULT_INSIGHT_MODEL.to_string()),
        gemini_isnad_model: config
            .gemini
            .isnad_model
            .clone()
            .unwrap_or_else(|| DEFAULT_ISNAD_MODEL.to_string()),
        ollama_base_url,
        ollama_model,
        quran_base_url,
        hadith_base_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = NurConfig::default();
        assert!(config.general.default_engine.is_none());
        assert!(config.gemini.api_key.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = NurConfig::default();
        let resolved = resolve(&config, CliOverrides::default());
        assert_eq!(resolved.gemini_insight_model, DEFAULT_INSIGHT_MODEL);
        assert_eq!(resolved.gemini_isnad_model, DEFAULT_ISNAD_MODEL);
        assert_eq!(resolved.language, TranslationLang::English);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = NurConfig {
            general: GeneralConfig {
                default_engine: None,
                target_language: Some(TranslationLang::Tamil),
            },
            gemini: GeminiConfig {
                insight_model: Some("gemini-2.5-flash".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, CliOverrides::default());
        assert_eq!(resolved.language, TranslationLang::Tamil);
        assert_eq!(resolved.gemini_insight_model, "gemini-2.5-flash");
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = NurConfig {
            general: GeneralConfig {
                default_engine: Some(Engine::Gemini),
                target_language: Some(TranslationLang::Tamil),
            },
            ..Default::default()
        };
        let resolved = resolve(
            &config,
            CliOverrides {
                engine: Some(Engine::Ollama),
                language: Some(TranslationLang::English),
            },
        );
        assert_eq!(resolved.engine, Engine::Ollama);
        assert_eq!(resolved.language, TranslationLang::English);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
default_engine = "ollama"
target_language = "tamil"

[gemini]
api_key = "test-key-123"
isnad_model = "gemini-2.5-pro"

[ollama]
base_url = "http://192.168.1.100:11434"
model = "qwen2.5"

[sources]
hadith_base_url = "http://mirror.local/hadith"
"#;
        let config: NurConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.default_engine, Some(Engine::Ollama));
        assert_eq!(config.general.target_language, Some(TranslationLang::Tamil));
        assert_eq!(config.gemini.api_key.as_deref(), Some("test-key-123"));
        assert_eq!(config.ollama.model.as_deref(), Some("qwen2.5"));
        assert_eq!(
            config.sources.hadith_base_url.as_deref(),
            Some("http://mirror.local/hadith")
        );
        assert!(config.sources.quran_base_url.is_none());
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only one override, the rest stays default
        let toml_str = r#"
[ollama]
model = "mistral"
"#;
        let config: NurConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.ollama.model.as_deref(), Some("mistral"));
        assert!(config.general.default_engine.is_none());
        assert!(config.ollama.base_url.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("nur-config-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[general\ndefault_engine = ").unwrap();

        let result = load_config_from(&path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_generates_default() {
        let dir = std::env::temp_dir().join(format!("nur-config-gen-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let config = load_config_from(&path).unwrap();

        assert!(config.general.default_engine.is_none());
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Nur Configuration"));
        // The generated file is all comments, so it parses back to defaults.
        let reparsed: NurConfig = toml::from_str(&written).unwrap();
        assert!(reparsed.gemini.api_key.is_none());
        fs::remove_dir_all(&dir).unwrap();
    }
}
