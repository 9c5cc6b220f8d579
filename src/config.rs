// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runtime settings.
//!
//! Layers, later wins: built-in defaults, an optional TOML file, `FLIGHTDOCS_*` environment
//! variables. CLI flags are applied by the binary on top.

use std::fs;
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::outline::{RootMargin, DEFAULT_HEADING_SETTLE};
use crate::playback::DEFAULT_AUTOPLAY_INTERVAL;

pub const DEFAULT_CONFIG_FILE: &str = "flightdocs.toml";
pub const DEFAULT_LOG_FILE: &str = "flightdocs.log";
pub const DEFAULT_UPSTREAM_URL: &str = "http://localhost:4001/graphql";
pub const DEFAULT_PROXY_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_START_PAGE: &str = "/docs/introduction/overview";

pub const ENV_UPSTREAM_URL: &str = "FLIGHTDOCS_UPSTREAM_URL";
pub const ENV_PROXY_BIND: &str = "FLIGHTDOCS_PROXY_BIND";
pub const ENV_AUTOPLAY_INTERVAL_MS: &str = "FLIGHTDOCS_AUTOPLAY_INTERVAL_MS";
pub const ENV_LOG_FILE: &str = "FLIGHTDOCS_LOG_FILE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },
    #[error("invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub upstream_url: String,
    pub proxy_bind: String,
    pub start_page: String,
    pub autoplay_interval_ms: u64,
    pub heading_settle_ms: u64,
    pub toc_top_offset_rows: usize,
    pub toc_bottom_margin_percent: u8,
    pub log_file: Option<PathBuf>,
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl ToString) -> Self {
        Self::Invalid {
            field,
            reason: reason.to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        let margin = RootMargin::default();
        Self {
            upstream_url: DEFAULT_UPSTREAM_URL.to_owned(),
            proxy_bind: DEFAULT_PROXY_BIND.to_owned(),
            start_page: DEFAULT_START_PAGE.to_owned(),
            autoplay_interval_ms: millis(DEFAULT_AUTOPLAY_INTERVAL),
            heading_settle_ms: millis(DEFAULT_HEADING_SETTLE),
            toc_top_offset_rows: margin.top_rows,
            toc_bottom_margin_percent: margin.bottom_percent,
            log_file: None,
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl Settings {
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }

    pub fn heading_settle(&self) -> Duration {
        Duration::from_millis(self.heading_settle_ms)
    }

    pub fn root_margin(&self) -> RootMargin {
        RootMargin {
            top_rows: self.toc_top_offset_rows,
            bottom_percent: self.toc_bottom_margin_percent,
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_FILE))
    }

    pub fn proxy_addr(&self) -> Result<SocketAddr, ConfigError> {
        match self.proxy_bind.parse::<SocketAddr>() {
            Ok(addr) => Ok(addr),
            Err(err) => {
                let reason = format!("{err} ({:?})", self.proxy_bind);
                Err(ConfigError::invalid("proxy_bind", reason))
            }
        }
    }

    /// Keeps the bind host and replaces the port.
    pub fn with_proxy_port(mut self, port: u16) -> Result<Self, ConfigError> {
        let mut addr = self.proxy_addr()?;
        addr.set_port(port);
        self.proxy_bind = addr.to_string();
        Ok(self)
    }

    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup(ENV_UPSTREAM_URL) {
            self.upstream_url = value;
        }
        if let Some(value) = lookup(ENV_PROXY_BIND) {
            self.proxy_bind = value;
        }
        if let Some(value) = lookup(ENV_AUTOPLAY_INTERVAL_MS) {
            self.autoplay_interval_ms = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv {
                    name: ENV_AUTOPLAY_INTERVAL_MS,
                    value,
                })?;
        }
        if let Some(value) = lookup(ENV_LOG_FILE) {
            self.log_file = Some(PathBuf::from(value)).filter(|path| !path.as_os_str().is_empty());
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let upstream = reqwest::Url::parse(&self.upstream_url)
            .map_err(|err| ConfigError::invalid("upstream_url", err))?;
        if !matches!(upstream.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                field: "upstream_url",
                reason: format!("unsupported scheme {:?}", upstream.scheme()),
            });
        }
        self.proxy_addr()?;
        if self.autoplay_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "autoplay_interval_ms",
                reason: "must be greater than zero".to_owned(),
            });
        }
        if self.toc_bottom_margin_percent > 100 {
            return Err(ConfigError::Invalid {
                field: "toc_bottom_margin_percent",
                reason: format!("{} is above 100", self.toc_bottom_margin_percent),
            });
        }
        if !self.start_page.starts_with('/') {
            return Err(ConfigError::Invalid {
                field: "start_page",
                reason: format!("{:?} is not an absolute href", self.start_page),
            });
        }
        Ok(())
    }
}

/// Loads settings from the process environment.
///
/// `explicit` must exist; without it `flightdocs.toml` in the working directory is used when
/// present.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    let lookup = |name: &str| std::env::var(name).ok();
    load_settings_with(explicit, Path::new(DEFAULT_CONFIG_FILE), lookup)
}

pub fn load_settings_with(
    explicit: Option<&Path>,
    default_path: &Path,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Settings, ConfigError> {
    let file = match explicit {
        Some(path) => Some(read_config(path)?),
        None => match fs::read_to_string(default_path) {
            Ok(raw) => Some((default_path.to_path_buf(), raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(source) => {
                return Err(ConfigError::Read {
                    path: default_path.to_path_buf(),
                    source,
                })
            }
        },
    };

    let mut settings = match file {
        Some((path, raw)) => {
            Settings::from_toml_str(&raw).map_err(|source| ConfigError::Parse { path, source })?
        }
        None => Settings::default(),
    };
    settings.apply_env_overrides(lookup)?;
    settings.validate()?;
    Ok(settings)
}

fn read_config(path: &Path) -> Result<(PathBuf, String), ConfigError> {
    fs::read_to_string(path)
        .map(|raw| (path.to_path_buf(), raw))
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })
}
