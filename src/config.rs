//! Server configuration from environment variables
//!
//! | variable | default |
//! |---|---|
//! | `MCP_HOST` | `0.0.0.0` |
//! | `MCP_PORT` | `8000` |
//! | `MCP_API_KEY` | unset (no authentication) |
//! | `MCP_RATE_LIMIT` | `100/minute` |
//! | `MCP_LOG_RETENTION` | `1000` |
//! | `MCP_DATA_DIR` | unset (memory only) |
//! | `MCP_RATE_LIMIT_IDLE_WINDOWS` | `2` |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::logs::DEFAULT_RETENTION_LIMIT;
use crate::rate_limit::RateLimit;
use crate::types::{McpError, McpResult};

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_key: Option<String>,
    pub rate_limit: RateLimit,
    pub log_retention: usize,
    pub data_dir: Option<PathBuf>,
    pub idle_windows: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            api_key: None,
            rate_limit: RateLimit::default(),
            log_retention: DEFAULT_RETENTION_LIMIT,
            data_dir: None,
            idle_windows: 2,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> McpResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read configuration through `lookup`; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> McpResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let log_retention = parse_var(&get, "MCP_LOG_RETENTION")?.unwrap_or(defaults.log_retention);
        if log_retention == 0 {
            return Err(McpError::invalid_input("MCP_LOG_RETENTION must be at least 1"));
        }

        Ok(Self {
            host: get("MCP_HOST").unwrap_or(defaults.host),
            port: parse_var(&get, "MCP_PORT")?.unwrap_or(defaults.port),
            api_key: get("MCP_API_KEY"),
            rate_limit: parse_var(&get, "MCP_RATE_LIMIT")?.unwrap_or(defaults.rate_limit),
            log_retention,
            data_dir: get("MCP_DATA_DIR").map(PathBuf::from),
            idle_windows: parse_var(&get, "MCP_RATE_LIMIT_IDLE_WINDOWS")?
                .unwrap_or(defaults.idle_windows),
        })
    }

    /// `host:port` for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T, G>(get: &G, name: &str) -> McpResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    get(name)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| McpError::invalid_input(format!("Invalid {} '{}': {}", name, raw, e)))
        })
        .transpose()
}
