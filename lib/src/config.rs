use serde::Deserialize;

use crate::Error;

pub const DEFAULT_PATH: &str = "/etc/mandrill/mandrill.toml";
const ENV_PREFIX: &str = "MANDRILL";

// Request timeout, in seconds
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Settings the client needs before it can send anything.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,

    /// Sender used when a message has no `from_email` of its own
    pub default_from: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            default_from: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    pub fn new(api_key: &str, default_from: &str) -> Self {
        Self {
            api_key: Some(api_key.to_string()),
            default_from: Some(default_from.to_string()),
            ..Default::default()
        }
    }

    /// Configured API key, treating an empty string as unset
    pub(crate) fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }
}

/// Loads Mandrill config from filesystem and merges it with any
/// environment variables prefixed with MANDRILL_ (e.g. MANDRILL_API_KEY,
/// MANDRILL_DEFAULT_FROM).
///
/// A missing file is only an error when `path` was given explicitly.
pub fn load_config(path: Option<&str>) -> Result<Config, Error> {
    let file = ::config::File::with_name(path.unwrap_or(DEFAULT_PATH)).required(path.is_some());

    let settings = ::config::Config::builder()
        .add_source(file)
        .add_source(::config::Environment::with_prefix(ENV_PREFIX))
        .build()?;

    Ok(settings.try_deserialize::<Config>()?)
}
