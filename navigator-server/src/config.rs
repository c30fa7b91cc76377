//! Server configuration from environment variables.
//!
//! | Variable                    | Default          |
//! |-----------------------------|------------------|
//! | `NAVIGATOR_ADDR`            | `127.0.0.1:3000` |
//! | `NAVIGATOR_NETWORK`         | built-in sample  |
//! | `NAVIGATOR_TICK_MS`         | `1000`           |
//! | `NAVIGATOR_MAX_SUGGESTIONS` | `3`              |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);
const DEFAULT_TICK_MS: u64 = 1000;
const DEFAULT_MAX_SUGGESTIONS: usize = 3;

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but can't be parsed
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Process-level configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub addr: SocketAddr,

    /// JSON network file; `None` uses the built-in sample.
    pub network_file: Option<PathBuf>,

    /// Time between simulation ticks.
    pub tick_interval: Duration,

    /// Maximum number of route suggestions per query.
    pub max_suggestions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(DEFAULT_ADDR),
            network_file: None,
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset or empty variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let addr = match get("NAVIGATOR_ADDR") {
            Some(v) => parse("NAVIGATOR_ADDR", &v)?,
            None => defaults.addr,
        };

        let network_file = get("NAVIGATOR_NETWORK").map(PathBuf::from);

        let tick_interval = match get("NAVIGATOR_TICK_MS") {
            Some(v) => {
                let ms: u64 = parse("NAVIGATOR_TICK_MS", &v)?;
                if ms == 0 {
                    return Err(ConfigError::Invalid {
                        name: "NAVIGATOR_TICK_MS",
                        value: v,
                        reason: "must be positive".to_string(),
                    });
                }
                Duration::from_millis(ms)
            }
            None => defaults.tick_interval,
        };

        let max_suggestions = match get("NAVIGATOR_MAX_SUGGESTIONS") {
            Some(v) => {
                let cap: usize = parse("NAVIGATOR_MAX_SUGGESTIONS", &v)?;
                if cap == 0 {
                    return Err(ConfigError::Invalid {
                        name: "NAVIGATOR_MAX_SUGGESTIONS",
                        value: v,
                        reason: "must be positive".to_string(),
                    });
                }
                cap
            }
            None => defaults.max_suggestions,
        };

        Ok(Self {
            addr,
            network_file,
            tick_interval,
            max_suggestions,
        })
    }
}

fn parse<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
