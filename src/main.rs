// SPDX-FileCopyrightText: 2026 Nodewire Contributors
// SPDX-License-Identifier: MIT

//! Nodewire CLI entrypoint.
//!
//! Runs the TCP command service against a fresh in-memory document. The
//! listener answers line-delimited JSON commands until ctrl-c.

use std::error::Error;

use nodewire::doc::InMemoryDocument;
use nodewire::server::{self, ServerConfig};
use nodewire::service::{build_registry, DocumentExecutor, GraphService};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--bind <addr>] [--port <port>] [--max-connections <n>] [--log <filter>]\n\nDefaults: bind 127.0.0.1, port 8720, 32 concurrent connections.\n--log takes a tracing filter (e.g. `info` or `nodewire=debug`); the\nRUST_LOG environment variable is used when the flag is omitted."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    bind: Option<String>,
    port: Option<u16>,
    max_connections: Option<usize>,
    log: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--bind" => {
                if options.bind.is_some() {
                    return Err(());
                }
                options.bind = Some(args.next().ok_or(())?);
            }
            "--port" => {
                if options.port.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.port = Some(raw.parse().map_err(|_| ())?);
            }
            "--max-connections" => {
                if options.max_connections.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let limit: usize = raw.parse().map_err(|_| ())?;
                if limit == 0 {
                    return Err(());
                }
                options.max_connections = Some(limit);
            }
            "--log" => {
                if options.log.is_some() {
                    return Err(());
                }
                options.log = Some(args.next().ok_or(())?);
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(filter) => tracing_subscriber::EnvFilter::new(filter),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "nodewire".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_tracing(options.log.as_deref());

        let mut config = ServerConfig::default();
        if let Some(bind) = options.bind {
            config.bind = bind;
        }
        if let Some(port) = options.port {
            config.port = port;
        }
        if let Some(limit) = options.max_connections {
            config.max_connections = limit;
        }

        let executor = DocumentExecutor::spawn(InMemoryDocument::new("untitled"))?;
        let registry = build_registry(GraphService::new(executor));

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        runtime.block_on(server::serve(config, registry))?;
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("nodewire: {err}");
        std::process::exit(1);
    }
}
