//! Resolver configuration from `icdwiki.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── resolver   # [resolver]
//! │   └── wiki       # [wiki]
//! ├── error          # ConfigError
//! └── mod.rs         # ResolverConfig (this file)
//! ```
//!
//! # Precedence
//!
//! Built-in defaults, then the TOML file, then `ICDWIKI_*` environment
//! variables. The CLI applies its own flags last.
//!
//! | Variable                          | Field                     |
//! |-----------------------------------|---------------------------|
//! | `ICDWIKI_WIKI_LANGUAGE`           | `wiki.language`           |
//! | `ICDWIKI_WIKI_HOST`               | `wiki.host`               |
//! | `ICDWIKI_WIKI_USER_AGENT`         | `wiki.user_agent`         |
//! | `ICDWIKI_WIKI_TIMEOUT_SECS`       | `wiki.timeout_secs`       |
//! | `ICDWIKI_RESOLVER_CACHE_CAPACITY` | `resolver.cache_capacity` |
//! | `ICDWIKI_RESOLVER_CODE_SPACES`    | `resolver.code_spaces`    |

mod error;
pub mod section;

pub use error::ConfigError;
pub use section::{CHAPTER_PLACEHOLDER, ResolverSectionConfig, WikiConfig};

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::code::{RangeTable, TableError};
use crate::log;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "icdwiki.toml";

/// Prefix of environment overrides.
const ENV_PREFIX: &str = "ICDWIKI_";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing icdwiki.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Path of the loaded file (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Content API settings
    #[serde(default)]
    pub wiki: WikiConfig,

    /// Resolution settings
    #[serde(default)]
    pub resolver: ResolverSectionConfig,
}

impl ResolverConfig {
    /// Load defaults, the optional file, and environment overrides.
    ///
    /// Not validated: callers apply their own overrides, then call [`validate`](Self::validate).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse TOML content without file context.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            log!("warning"; "unknown fields in {}, ignoring: {}", path.display(), ignored.join(", "));
        }

        // Relative table paths are relative to the config file
        if let Some(table) = &config.resolver.code_spaces
            && table.is_relative()
            && let Some(dir) = path.parent()
        {
            config.resolver.code_spaces = Some(dir.join(table));
        }

        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Apply `ICDWIKI_*` overrides read through `lookup`.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let var = |name: &str| {
            let key = format!("{ENV_PREFIX}{name}");
            lookup(&key).map(|value| (key, value))
        };

        if let Some((_, value)) = var("WIKI_LANGUAGE") {
            self.wiki.language = value;
        }
        if let Some((_, value)) = var("WIKI_HOST") {
            self.wiki.host = value;
        }
        if let Some((_, value)) = var("WIKI_USER_AGENT") {
            self.wiki.user_agent = value;
        }
        if let Some((key, value)) = var("WIKI_TIMEOUT_SECS") {
            self.wiki.timeout_secs = parse_env(key, value)?;
        }
        if let Some((key, value)) = var("RESOLVER_CACHE_CAPACITY") {
            self.resolver.cache_capacity = parse_env(key, value)?;
        }
        if let Some((_, value)) = var("RESOLVER_CODE_SPACES") {
            self.resolver.code_spaces = Some(PathBuf::from(value));
        }
        Ok(())
    }

    /// Reject values the resolver cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Validation(msg.to_string()));

        if self.wiki.language.trim().is_empty() {
            return invalid("wiki.language must not be empty");
        }
        if self.wiki.host.trim().is_empty() {
            return invalid("wiki.host must not be empty");
        }
        if !self.wiki.api_path.starts_with('/') {
            return invalid("wiki.api_path must start with `/`");
        }
        if self.resolver.cache_capacity == 0 {
            return invalid("resolver.cache_capacity must be at least 1");
        }
        if !self.resolver.search_template.contains(CHAPTER_PLACEHOLDER) {
            return invalid("resolver.search_template must contain `{}`");
        }
        Ok(())
    }

    /// Load the configured code space table, or the bundled one.
    pub fn code_space_table(&self) -> Result<RangeTable, TableError> {
        match &self.resolver.code_spaces {
            Some(path) => RangeTable::from_path(path),
            None => RangeTable::embedded(),
        }
    }
}

fn parse_env<T: FromStr>(key: String, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Env { key, value })
}

/// Parse a config snippet, failing on unknown fields.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> ResolverConfig {
    let (parsed, ignored) = ResolverConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
