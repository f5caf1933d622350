use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use twig_host::HtmlOptions;

pub const DEFAULT_CONFIG_NAME: &str = "twig.config.json";

/// Twig configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Print one node per line
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Indentation used by pretty output
    #[serde(default = "default_indent")]
    pub indent: String,

    /// Fallback log filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Demo used when no --demo flag is given
    #[serde(default = "default_demo")]
    pub demo: String,
}

fn default_pretty() -> bool {
    true
}

fn default_indent() -> String {
    "  ".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_demo() -> String {
    "showcase".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Cannot read {}", config_path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid {}", DEFAULT_CONFIG_NAME))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Serializer options, with `compact` forcing single-line output
    pub fn html_options(&self, compact: bool) -> HtmlOptions {
        HtmlOptions {
            pretty: self.pretty && !compact,
            indent: self.indent.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
            indent: default_indent(),
            log_level: default_log_level(),
            demo: default_demo(),
        }
    }
}
