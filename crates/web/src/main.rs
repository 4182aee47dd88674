mod api;
mod assets;
mod page;

use api::{route, ApiResponse, AppState};
use gloomdeck_core::{Table, TableConfig};
use gloomdeck_data::{apply_env_overrides, config_path_from_env, load_catalog, load_config};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tiny_http::{Header, Method, Response, Server, StatusCode};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

const BIND_ENV: &str = "GLOOMDECK_BIND";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct WebConfig {
    bind: String,
    /// Root of the static files; card images live under `imgs/`.
    static_dir: PathBuf,
    #[serde(flatten)]
    table: TableConfig,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
            static_dir: PathBuf::from(assets::DEFAULT_STATIC_DIR),
            table: TableConfig::default(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let config_path = config_path_from_env();
    let mut config: WebConfig = load_config(config_path.as_deref())?;
    apply_env_overrides(&mut config.table)?;
    if let Ok(bind) = std::env::var(BIND_ENV) {
        config.bind = bind;
    }
    init_tracing(&config.table.log_level);
    match &config_path {
        Some(path) => info!(path = %path.display(), "config loaded"),
        None => info!("no config file, using defaults"),
    }

    let catalog = load_catalog(&config.table)?;
    let table = Table::new(&config.table, catalog)?;
    let state = Arc::new(Mutex::new(AppState::new(table)));
    let static_dir = config.static_dir.clone();

    let server = Server::http(&config.bind)
        .map_err(|err| anyhow::anyhow!("start server on {}: {err}", config.bind))?;
    info!(bind = %config.bind, static_dir = %static_dir.display(), "modifier deck server listening");
    for request in server.incoming_requests() {
        let state = state.clone();
        if let Err(err) = handle_request(request, state, &static_dir) {
            error!("request error: {err}");
        }
    }
    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn handle_request(
    mut request: tiny_http::Request,
    state: Arc<Mutex<AppState>>,
    static_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = request.url().to_string();
    let method = request.method().clone();
    if method == Method::Get {
        if let Some(path) = assets::asset_path(static_dir, &url) {
            return respond_with_file(request, &path);
        }
    }
    let mut guard = state
        .lock()
        .map_err(|_| "app state lock poisoned".to_string())?;
    if method == Method::Get && (url == "/" || url.starts_with("/?")) {
        let html = page::render_index(&guard.table.decks(), &guard.table.monster_types());
        drop(guard);
        let header = Header::from_bytes(&b"Content-Type"[..], &b"text/html; charset=utf-8"[..])
            .map_err(|_| "invalid header".to_string())?;
        request.respond(Response::from_string(html).with_header(header))?;
        return Ok(());
    }

    let mut body = String::new();
    request.as_reader().read_to_string(&mut body)?;
    let reply = route(&mut guard, &method, &url, &body);
    drop(guard);
    info!(method = %method, url = %url, status = reply.status, "request handled");
    respond_json(request, reply.status, &reply.body)
}

fn respond_with_file(
    request: tiny_http::Request,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = match std::fs::read(path) {
        Ok(content) => content,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "static file missing");
            request.respond(Response::from_string("not found").with_status_code(StatusCode(404)))?;
            return Ok(());
        }
    };
    let header = Header::from_bytes(&b"Content-Type"[..], assets::content_type(path))
        .map_err(|_| "invalid header".to_string())?;
    request.respond(Response::from_data(content).with_header(header))?;
    Ok(())
}

fn respond_json(
    request: tiny_http::Request,
    status: u16,
    response: &ApiResponse,
) -> Result<(), Box<dyn std::error::Error>> {
    let body = serde_json::to_vec_pretty(response)?;
    let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .map_err(|_| "invalid header".to_string())?;
    request.respond(
        Response::from_data(body)
            .with_status_code(StatusCode(status))
            .with_header(header),
    )?;
    Ok(())
}
