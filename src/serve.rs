//! Dev server with live reload.
//!
//! Serves the generated site on localhost and keeps browsers current: every
//! HTML response gets a small poller injected that watches the build counter
//! at [`VERSION_PATH`] and reloads the page when it changes. A recursive
//! watcher on the project root re-runs the affected tasks on change and
//! bumps the counter afterwards.
//!
//! The poller holds no connection: one GET against the local server every
//! `poll_ms`, reload when the counter moved.

use crate::config::PipelineConfig;
use crate::watch::{collect_tasks, run_task};
use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::fs;
use tokio::sync::mpsc;

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Watcher error: {0}")]
    Notify(#[from] notify::Error),
}

/// Path of the build-counter endpoint the injected poller watches.
pub const VERSION_PATH: &str = "/__pressroom/version";

#[derive(Clone)]
struct AppState {
    site_dir: PathBuf,
    serial: Arc<AtomicU64>,
    poll_ms: u64,
}

/// The reload poller injected into served HTML.
pub fn reload_script(poll_ms: u64) -> String {
    format!(
        r#"<script>(function () {{
  var seen = null;
  window.setInterval(function () {{
    fetch("{VERSION_PATH}").then(function (r) {{ return r.json(); }}).then(function (v) {{
      if (seen === null) {{ seen = v.serial; }}
      else if (v.serial !== seen) {{ window.location.reload(); }}
    }}).catch(function () {{}});
  }}, {poll_ms});
}})();</script>"#
    )
}

/// Inject the reload poller into an HTML document, before `</body>` when
/// present, appended otherwise. Documents that already carry the poller are
/// returned unchanged.
pub fn inject_reload_script(html: &str, poll_ms: u64) -> String {
    if html.contains(VERSION_PATH) {
        return html.to_string();
    }
    let script = reload_script(poll_ms);
    match html.to_ascii_lowercase().rfind("</body>") {
        Some(pos) => {
            let mut out = String::with_capacity(html.len() + script.len());
            out.push_str(&html[..pos]);
            out.push_str(&script);
            out.push_str(&html[pos..]);
            out
        }
        None => format!("{html}{script}"),
    }
}

fn content_type_for_path(path: &str) -> &'static str {
    match Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
        .as_str()
    {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "xml" => "application/xml; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

// ---- handlers ----

/// Current build counter, polled by the injected script.
async fn version(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "serial": state.serial.load(Ordering::SeqCst) }))
}

/// Serve `index.html` for the root path.
async fn serve_index(State(state): State<AppState>) -> Response {
    serve_file(&state, "index.html").await
}

/// Serve any other path, with directory-style fallback to `index.html`.
async fn serve_path(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/').to_string();
    serve_file(&state, &path).await
}

async fn serve_file(state: &AppState, rel: &str) -> Response {
    let mut file_path = state.site_dir.join(rel);
    if file_path.is_dir() {
        file_path = file_path.join("index.html");
    }

    let is_html = file_path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("html"))
        .unwrap_or(false);

    if is_html {
        match fs::read_to_string(&file_path).await {
            Ok(content) => {
                Html(inject_reload_script(&content, state.poll_ms)).into_response()
            }
            Err(_) => serve_404(state).await,
        }
    } else {
        match fs::read(&file_path).await {
            Ok(content) => Response::builder()
                .status(StatusCode::OK)
                .header("Content-Type", content_type_for_path(rel))
                .body(Body::from(content))
                .expect("static response builds"),
            Err(_) => serve_404(state).await,
        }
    }
}

/// The site's `404.html` when it exists, a plain 404 otherwise.
async fn serve_404(state: &AppState) -> Response {
    let not_found = state.site_dir.join("404.html");
    match fs::read_to_string(&not_found).await {
        Ok(content) => (
            StatusCode::NOT_FOUND,
            Html(inject_reload_script(&content, state.poll_ms)),
        )
            .into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
    }
}

fn router(state: AppState) -> Router {
    Router::new()
        .route(VERSION_PATH, get(version))
        .route("/", get(serve_index))
        .route("/{*path}", get(serve_path))
        .with_state(state)
}

/// Serve the generated site with live reload and watch sources.
///
/// Runs until the process is interrupted. The caller is expected to have
/// completed a full build first so there is a site to serve.
pub async fn dev(config: PipelineConfig, root: PathBuf) -> Result<(), ServeError> {
    let serial = Arc::new(AtomicU64::new(1));

    // Watcher feeding the rebuild loop
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut _watcher = RecommendedWatcher::new(
        move |res| {
            let _ = tx.send(res);
        },
        notify::Config::default(),
    )?;
    _watcher.watch(&root, RecursiveMode::Recursive)?;

    tokio::spawn({
        let config = config.clone();
        let root = root.clone();
        let serial = serial.clone();
        let debounce = Duration::from_millis(config.watch.debounce_ms);
        async move {
            while let Some(event) = rx.recv().await {
                let mut paths = Vec::new();
                match event {
                    Ok(ev) => paths.extend(ev.paths),
                    Err(err) => {
                        tracing::warn!("watcher error: {err}");
                        continue;
                    }
                }
                // Debounce: wait out the quiet period, then drain the burst
                tokio::time::sleep(debounce).await;
                while let Ok(more) = rx.try_recv() {
                    if let Ok(ev) = more {
                        paths.extend(ev.paths);
                    }
                }

                let tasks = collect_tasks(paths, &config, &root);
                if tasks.is_empty() {
                    continue;
                }

                let rebuilt = tokio::task::spawn_blocking({
                    let config = config.clone();
                    let root = root.clone();
                    move || {
                        let mut any = false;
                        for task in tasks {
                            tracing::info!("change detected → {task}");
                            match run_task(task, &config, &root, true) {
                                Ok(()) => any = true,
                                Err(err) => tracing::error!("{task} failed: {err}"),
                            }
                        }
                        any
                    }
                })
                .await;

                match rebuilt {
                    Ok(true) => {
                        let n = serial.fetch_add(1, Ordering::SeqCst) + 1;
                        tracing::info!("rebuild complete (serial {n})");
                    }
                    Ok(false) => {}
                    Err(err) => tracing::error!("rebuild task panicked: {err}"),
                }
            }
        }
    });

    let state = AppState {
        site_dir: config.site_dir(&root),
        serial,
        poll_ms: config.serve.poll_ms,
    };
    let app = router(state);

    let addr = format!("127.0.0.1:{}", config.serve.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("serving {} on http://{addr}", config.site_dir(&root).display());
    println!("\nServing at http://localhost:{}", config.serve.port);
    println!("   Press Ctrl+C to stop\n");

    axum::serve(listener, app).await?;
    Ok(())
}
