// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Flightdocs CLI entrypoint.
//!
//! By default this runs the docs shell and serves the content query proxy at
//! `http://<proxy_bind>/api/content` next to it.
//!
//! Use `--proxy-only` to run just the proxy (logging to stderr).

use std::error::Error;
use std::path::PathBuf;

use flightdocs::config::{load_settings, DEFAULT_PROXY_BIND};
use flightdocs::logging::{self, LogTarget};
use flightdocs::{proxy, tui};
use tokio::sync::oneshot;
use tracing::{error, info};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--config <file>] [--page <href>] [--proxy-port <port>] [--no-proxy]\n  {program} --proxy-only [--config <file>] [--proxy-port <port>]\n\nThe docs shell (default) serves the content query proxy on proxy_bind\n(default {DEFAULT_PROXY_BIND}); --proxy-port replaces only the port.\n--no-proxy runs the docs shell alone.\n\nSettings come from --config, else ./flightdocs.toml when present, then FLIGHTDOCS_* variables."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    config: Option<PathBuf>,
    page: Option<String>,
    proxy_port: Option<u16>,
    no_proxy: bool,
    proxy_only: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                if options.config.is_some() {
                    return Err(());
                }
                options.config = Some(PathBuf::from(args.next().ok_or(())?));
            }
            "--page" => {
                if options.page.is_some() {
                    return Err(());
                }
                let href = args.next().ok_or(())?;
                if !href.starts_with('/') {
                    return Err(());
                }
                options.page = Some(href);
            }
            "--proxy-port" => {
                if options.proxy_port.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let port: u16 = raw.parse().map_err(|_| ())?;
                options.proxy_port = Some(port);
            }
            "--no-proxy" => {
                if options.no_proxy {
                    return Err(());
                }
                options.no_proxy = true;
            }
            "--proxy-only" => {
                if options.proxy_only {
                    return Err(());
                }
                options.proxy_only = true;
            }
            _ => return Err(()),
        }
    }

    if options.proxy_only && (options.no_proxy || options.page.is_some()) {
        return Err(());
    }

    if options.no_proxy && options.proxy_port.is_some() {
        return Err(());
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "flightdocs".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let mut settings = load_settings(options.config.as_deref())?;
        if let Some(port) = options.proxy_port {
            settings = settings.with_proxy_port(port)?;
        }
        let start_page = options
            .page
            .clone()
            .unwrap_or_else(|| settings.start_page.clone());

        if options.proxy_only {
            logging::init(&LogTarget::Stderr)?;
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(async {
                let listener = proxy::bind(settings.proxy_addr()?).await?;
                proxy::serve(listener, &settings.upstream_url, async {
                    let _ = tokio::signal::ctrl_c().await;
                })
                .await?;
                Ok::<(), Box<dyn Error>>(())
            })?;
            info!("content proxy shut down");
            return Ok(());
        }

        logging::init(&LogTarget::File(settings.log_path()))?;

        if options.no_proxy {
            return tui::run(&settings, &start_page);
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(async move {
            let addr = settings.proxy_addr()?;
            let listener = proxy::bind(addr)
                .await
                .map_err(|err| -> Box<dyn Error> {
                    format!("{err} (pick another --proxy-port or pass --no-proxy)").into()
                })?;

            let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
            let upstream = settings.upstream_url.clone();
            let server_handle = tokio::spawn(async move {
                let shutdown = async move {
                    let _ = shutdown_rx.await;
                };
                if let Err(err) = proxy::serve(listener, &upstream, shutdown).await {
                    error!(%err, "content proxy error");
                }
            });

            let tui_join = tokio::task::spawn_blocking(move || {
                tui::run(&settings, &start_page).map_err(|err| err.to_string())
            })
            .await;

            let _ = shutdown_tx.send(());
            let _ = server_handle.await;

            let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
            tui_result.map_err(|err| -> Box<dyn Error> { err.into() })?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("flightdocs: {err}");
        std::process::exit(1);
    }
}
