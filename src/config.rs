use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Deserializer};
use tracing::{debug, info};

use crate::builtin;
use crate::catalog::{Catalog, Strictness};
use crate::error::Result;
use crate::session::{DEFAULT_REPLY_DELAY, DEFAULT_TIME_FORMAT, SessionOptions};

pub const CONFIG_DIR_NAME: &str = "faqbot";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TOML catalog to load instead of the built-in one.
    pub catalog: Option<PathBuf>,
    /// Reject catalogs whose keywords point at missing entries.
    pub strict: bool,
    /// Humantime string, e.g. `1200ms` or `1s`.
    #[serde(deserialize_with = "deserialize_duration")]
    pub reply_delay: Duration,
    pub greeting: String,
    pub time_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: None,
            strict: true,
            reply_delay: DEFAULT_REPLY_DELAY,
            greeting: builtin::GREETING.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

impl Config {
    /// Reads `explicit` if given, else the per-user config file when present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => {
                    debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
            },
        };
        Self::from_path(&path)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        info!(path = %path.display(), "loaded config");
        Ok(config.relative_to(path))
    }

    // Catalog paths in a config file are relative to that file.
    fn relative_to(mut self, config_path: &Path) -> Self {
        if let (Some(catalog), Some(base)) = (&self.catalog, config_path.parent())
            && catalog.is_relative()
        {
            self.catalog = Some(base.join(catalog));
        }
        self
    }

    pub fn strictness(&self) -> Strictness {
        if self.strict {
            Strictness::Strict
        } else {
            Strictness::Lenient
        }
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog {
            Some(path) => Catalog::load(path, self.strictness()),
            None => Catalog::builtin(),
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            reply_delay: self.reply_delay,
            greeting: self.greeting.clone(),
            time_format: self.time_format.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FaqError;

    #[test]
    fn defaults_match_widget_behaviour() {
        let config = Config::default();
        assert!(config.strict);
        assert_eq!(config.reply_delay, Duration::from_millis(1200));
        assert_eq!(config.time_format, "%H:%M");
        assert!(config.catalog.is_none());
    }

    #[test]
    fn parses_partial_file() {
        let config: Config = toml::from_str("reply_delay = \"250ms\"\nstrict = false\n").expect("toml");
        assert_eq!(config.reply_delay, Duration::from_millis(250));
        assert_eq!(config.strictness(), Strictness::Lenient);
        assert_eq!(config.greeting, builtin::GREETING);
    }

    #[test]
    fn rejects_bad_duration() {
        let err = toml::from_str::<Config>("reply_delay = \"soon\"\n").expect_err("bad duration");
        assert!(err.to_string().contains("reply_delay") || err.to_string().contains("soon"));
    }

    #[test]
    fn catalog_path_is_relative_to_config_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "catalog = \"faq.toml\"\n").expect("write");

        let config = Config::from_path(&path).expect("config");
        assert_eq!(config.catalog, Some(dir.path().join("faq.toml")));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = Config::load(Some(&dir.path().join("nope.toml"))).expect_err("missing");
        assert!(matches!(err, FaqError::Io(_)));
    }
}
