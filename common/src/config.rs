use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Which hosted model family generates decks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Gemini,
    OpenAi,
    /// Canned deck, no network.
    Stub,
}

impl Provider {
    pub fn default_model(self) -> &'static str {
        match self {
            Provider::Gemini => "gemini-2.5-flash",
            Provider::OpenAi => "gpt-4o-mini",
            Provider::Stub => "stub",
        }
    }

    /// Environment variables consulted for the credential, in order.
    pub fn api_key_vars(self) -> &'static [&'static str] {
        match self {
            Provider::Gemini => &["GEMINI_API_KEY", "API_KEY"],
            Provider::OpenAi => &["OPENAI_API_KEY"],
            Provider::Stub => &[],
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(Provider::Gemini),
            "openai" => Ok(Provider::OpenAi),
            "stub" => Ok(Provider::Stub),
            other => Err(ConfigError::InvalidValue {
                field: "provider".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// What happens when a generation resolves after a newer one was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SupersedePolicy {
    /// Every resolution is applied; whichever settles last wins.
    #[default]
    LastResolved,
    /// Only the most recently submitted request may update the state.
    LatestOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideConfig {
    pub provider: Provider,
    /// Falls back to the provider's default when unset.
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub output_dir: PathBuf,
    pub log_path: Option<PathBuf>,
    pub supersede_policy: SupersedePolicy,
    pub request_timeout_secs: u64,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            model: None,
            api_key: None,
            api_base: None,
            output_dir: PathBuf::from("slides"),
            log_path: None,
            supersede_policy: SupersedePolicy::default(),
            request_timeout_secs: 120,
        }
    }
}

impl SlideConfig {
    /// `<config_dir>/slide/config.toml`
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("slide").join("config.toml"))
    }

    /// Load from the default location, then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from_file(&path)?,
            _ => {
                tracing::info!("Using default configuration");
                Self::default()
            }
        };
        config.apply_env(|k| std::env::var(k).ok())?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Environment wins over the file. `lookup` is injected so tests need not
    /// touch the process environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());

        if let Some(provider) = get("SLIDE_PROVIDER") {
            self.switch_provider(provider.parse()?, &lookup);
        }
        if let Some(model) = get("SLIDE_MODEL") {
            self.model = Some(model);
        }
        if let Some(dir) = get("SLIDE_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(path) = get("SLIDE_LOG_PATH") {
            self.log_path = Some(PathBuf::from(path));
        }
        if self.api_key.is_none() {
            self.api_key = self.provider.api_key_vars().iter().find_map(|k| get(k));
        }
        Ok(())
    }

    /// Change provider. A key loaded for the previous provider is dropped and
    /// the new provider's key is looked up instead.
    pub fn switch_provider<F>(&mut self, provider: Provider, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if provider == self.provider {
            return;
        }
        tracing::info!(from = ?self.provider, to = ?provider, "switching provider");
        self.provider = provider;
        self.api_key = provider
            .api_key_vars()
            .iter()
            .find_map(|k| lookup(k).filter(|v| !v.trim().is_empty()));
    }

    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_path
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("slide.log"))
    }
}
