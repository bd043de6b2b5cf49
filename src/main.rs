// artichat — A terminal chat demo with inline artifacts
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use artichat::Cli;
use artichat::app::{App, AppOptions};
use artichat::error::AppError;
use artichat::search::{HttpSource, LocalSource, QueryContext, QuerySource};
use artichat::server::{self, ServerState};
use artichat::store::{ChatStore, FileStore, KeyValueStore, MemoryStore};
use clap::Parser;
use std::fs::OpenOptions;
use std::sync::Arc;

#[allow(clippy::exit)]
fn main() {
    if let Err(err) = run() {
        if let Some(app_error) = extract_app_error(&err) {
            eprintln!("{}", app_error.user_message());
            std::process::exit(app_error.exit_code());
        }
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        if let Some(addr) = cli.serve {
            let state = ServerState::new(Arc::new(LocalSource::default()));
            return server::serve(addr, state).await.map_err(|err| {
                tracing::error!("query server on {addr} failed: {err}");
                anyhow::Error::new(AppError::ServerBind)
            });
        }

        let store = ChatStore::new(open_storage(&cli)?);
        if let Some(path) = cli.export.as_ref() {
            return export_history(&store, path);
        }
        if let Some(path) = cli.import.as_ref() {
            return import_history(&store, path);
        }

        let (source, source_label) = query_source(&cli)?;
        let queries = Arc::new(QueryContext::new(source));
        let options = AppOptions { source_label, ..AppOptions::default() };
        let mut app = App::new(store, queries, options);
        artichat::app::run_tui(&mut app).await
    })
}

fn open_storage(cli: &Cli) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    if cli.memory {
        return Ok(Arc::new(MemoryStore::new()));
    }
    let Some(dir) = cli.resolved_data_dir() else {
        return Err(anyhow::Error::new(AppError::StorageUnavailable));
    };
    let store = FileStore::open(&dir).map_err(|err| {
        tracing::error!("failed to open data dir {}: {err}", dir.display());
        anyhow::Error::new(AppError::StorageUnavailable)
    })?;
    tracing::info!(data_dir = %dir.display(), "history storage opened");
    Ok(Arc::new(store))
}

/// The query source and the label the footer shows for it.
fn query_source(cli: &Cli) -> anyhow::Result<(Arc<dyn QuerySource>, String)> {
    let Some(endpoint) = cli.endpoint.as_deref() else {
        return Ok((Arc::new(LocalSource::default()), "local".to_owned()));
    };
    let valid_scheme = reqwest::Url::parse(endpoint)
        .is_ok_and(|url| matches!(url.scheme(), "http" | "https"));
    if !valid_scheme {
        return Err(anyhow::Error::new(AppError::InvalidEndpoint));
    }
    let source = HttpSource::new(endpoint).map_err(|err| {
        tracing::error!("failed to build query client for {endpoint}: {err}");
        anyhow::Error::new(AppError::InvalidEndpoint)
    })?;
    let label = source.base_url().to_owned();
    Ok((Arc::new(source), label))
}

fn export_history(store: &ChatStore, path: &std::path::Path) -> anyhow::Result<()> {
    let count = store.sessions().len();
    std::fs::write(path, store.export_history()).map_err(|err| {
        tracing::error!("failed to write export {}: {err}", path.display());
        anyhow::Error::new(AppError::ExportFailed)
    })?;
    eprintln!("Exported {count} chats to {}", path.display());
    Ok(())
}

fn import_history(store: &ChatStore, path: &std::path::Path) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    if !store.import_history(&json) {
        return Err(anyhow::Error::new(AppError::ImportRejected));
    }
    eprintln!("Imported {} chats from {}", store.sessions().len(), path.display());
    Ok(())
}

fn extract_app_error(err: &anyhow::Error) -> Option<AppError> {
    err.chain().find_map(|cause| cause.downcast_ref::<AppError>().cloned())
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let Some(path) = cli.log_file.as_ref() else {
        if std::env::var_os("RUST_LOG").is_some() {
            eprintln!(
                "RUST_LOG is set, but tracing is disabled without --log-file <PATH>. \
Use --log-file to enable diagnostics."
            );
        }
        return Ok(());
    };

    let directives = cli
        .log_filter
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_owned());
    let filter = tracing_subscriber::EnvFilter::try_new(directives.as_str())
        .map_err(|e| anyhow::anyhow!("invalid tracing filter `{directives}`: {e}"))?;

    let mut options = OpenOptions::new();
    options.create(true).write(true);
    if cli.log_append {
        options.append(true);
    } else {
        options.truncate(true);
    }
    let file = options
        .open(path)
        .map_err(|e| anyhow::anyhow!("failed to open log file {}: {e}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {e}"))?;

    tracing::info!(
        target: "diagnostics",
        version = env!("CARGO_PKG_VERSION"),
        log_file = %path.display(),
        log_filter = %directives,
        "tracing enabled"
    );

    Ok(())
}
