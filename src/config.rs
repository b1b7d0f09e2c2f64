use anyhow::{anyhow, bail, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, str::FromStr};

pub const CONFIG_ENV: &str = "MORTGAGE_CALC_CONFIG";
pub const LOG_ENV: &str = "MORTGAGE_CALC_LOG";

/// calculator settings, read from a JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub currency_symbol: String,
    /// prefilled term, restored by Clear All
    pub default_term_years: String,
    /// prefilled rate, restored by Clear All
    pub default_interest_rate: String,
    pub log_level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: "£".to_string(),
            default_term_years: String::new(),
            default_interest_rate: String::new(),
            log_level: None,
        }
    }
}

impl Settings {
    /// Loads settings from `MORTGAGE_CALC_CONFIG` if set, then applies the
    /// `MORTGAGE_CALC_LOG` override.
    pub fn load() -> Result<Self> {
        let mut settings = match env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        if let Ok(level) = env::var(LOG_ENV) {
            settings.log_level = Some(level);
        }
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing settings in {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Log level to use when stderr is or isn't the terminal the form draws on.
    /// Logging to that terminal would scribble over the form, so it is refused.
    pub fn log_level_for(&self, stderr_is_terminal: bool) -> Result<Option<LevelFilter>> {
        let level = self.log_level()?;
        if level.is_some() && stderr_is_terminal {
            bail!("logging writes to stderr; redirect it, e.g. `2>mortgage-calc.log`");
        }
        Ok(level)
    }

    /// configured log level, `None` when logging is off
    pub fn log_level(&self) -> Result<Option<LevelFilter>> {
        match &self.log_level {
            None => Ok(None),
            Some(level) => {
                let level = LevelFilter::from_str(level.trim())
                    .map_err(|_| anyhow!("unknown log level {level:?}"))?;
                Ok(Some(level))
            }
        }
    }
}
