use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_API_URL;

/// Default TTL applied by `set` when none is given
pub const DEFAULT_TTL: u32 = 120;

/// Optional user settings read from `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub api_url: String,
    pub default_ttl: u32,
    pub color: ColorChoice,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            default_ttl: DEFAULT_TTL,
            color: ColorChoice::Auto,
        }
    }
}
