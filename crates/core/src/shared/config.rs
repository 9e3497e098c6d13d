use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::constants::{GROQ_BASE_URL, LMSTUDIO_BASE_URL, OLLAMA_BASE_URL, OPENAI_BASE_URL};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize config: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("missing API key for provider '{0}'")]
    MissingApiKey(Provider),
    #[error("diarization requires 'diarization.endpoint' and 'diarization.api_token' in the config")]
    MissingDiarization,
}

/// Chat completion provider, selected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Groq,
    Lmstudio,
    Ollama,
    Openai,
}

impl Provider {
    pub const ALL: &[Provider] = &[
        Provider::Groq,
        Provider::Lmstudio,
        Provider::Ollama,
        Provider::Openai,
    ];
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Groq => write!(f, "groq"),
            Provider::Lmstudio => write!(f, "lmstudio"),
            Provider::Ollama => write!(f, "ollama"),
            Provider::Openai => write!(f, "openai"),
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "groq" => Ok(Provider::Groq),
            "lmstudio" => Ok(Provider::Lmstudio),
            "ollama" => Ok(Provider::Ollama),
            "openai" => Ok(Provider::Openai),
            other => Err(format!(
                "unknown provider '{other}', expected one of: groq, lmstudio, ollama, openai"
            )),
        }
    }
}

/// Connection settings for one chat provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatProviderConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    /// Overrides the provider's default endpoint when set.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiarizationConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub provider: Provider,
    /// Language hint for transcription; None means auto-detect.
    #[serde(default)]
    pub language: Option<String>,
    /// Explicit whisper model path; None resolves via the model cache.
    #[serde(default)]
    pub whisper_model: Option<PathBuf>,
    #[serde(default)]
    pub summarize: bool,
    #[serde(default)]
    pub diarization: DiarizationConfig,
    #[serde(default)]
    pub openai: ChatProviderConfig,
    #[serde(default)]
    pub groq: ChatProviderConfig,
    #[serde(default)]
    pub lmstudio: ChatProviderConfig,
    #[serde(default)]
    pub ollama: ChatProviderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: Provider::Ollama,
            language: None,
            whisper_model: None,
            summarize: false,
            diarization: DiarizationConfig::default(),
            openai: ChatProviderConfig {
                model: "gpt-4o-mini".to_string(),
                ..Default::default()
            },
            groq: ChatProviderConfig {
                model: "llama-3.1-8b-instant".to_string(),
                temperature: Some(0.7),
                ..Default::default()
            },
            lmstudio: ChatProviderConfig::default(),
            ollama: ChatProviderConfig {
                model: "llama3.1".to_string(),
                ..Default::default()
            },
        }
    }
}

impl Config {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("MeetingScribe").join("config.json"))
    }

    /// Load from the platform config directory, falling back to defaults
    /// when the file is missing or unreadable.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    /// Load from an explicitly requested file. Unlike `load`, failures are
    /// reported instead of silently replaced with defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write this config as pretty JSON, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(ConfigError::Encode)?;
        fs::write(path, json).map_err(|e| ConfigError::Write {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write to the platform config directory, returning the written path.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Connection settings for the currently selected provider.
    pub fn active_provider(&self) -> &ChatProviderConfig {
        match self.provider {
            Provider::Openai => &self.openai,
            Provider::Groq => &self.groq,
            Provider::Lmstudio => &self.lmstudio,
            Provider::Ollama => &self.ollama,
        }
    }

    /// The provider's endpoint, falling back to its well-known default.
    pub fn provider_base_url(&self) -> String {
        let default = match self.provider {
            Provider::Openai => OPENAI_BASE_URL,
            Provider::Groq => GROQ_BASE_URL,
            Provider::Lmstudio => LMSTUDIO_BASE_URL,
            Provider::Ollama => OLLAMA_BASE_URL,
        };
        self.active_provider()
            .base_url
            .clone()
            .unwrap_or_else(|| default.to_string())
    }
}
