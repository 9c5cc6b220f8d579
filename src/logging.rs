// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Global `tracing` subscriber setup.
//!
//! The TUI owns the terminal, so interactive runs log to a file. Headless runs log to stderr.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file {}: {source}", .path.display())]
    OpenFile { path: PathBuf, source: io::Error },
    #[error("failed to install log subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Filter directives from a `RUST_LOG`-style value, falling back to [`DEFAULT_FILTER`].
pub fn filter_directives(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_owned()
}

pub fn init(target: &LogTarget) -> Result<(), LoggingError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = EnvFilter::new(filter_directives(rust_log.as_deref()));

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(io::stderr))
                .try_init()?;
        }
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .try_init()?;
        }
    }
    Ok(())
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::OpenFile {
            path: path.to_path_buf(),
            source,
        })
}
