//! Source watching and change-to-task mapping.
//!
//! One recursive watcher on the project root feeds a debounce loop: the
//! first event opens a collection window, further events are drained until a
//! quiet period elapses, then the whole burst is classified into the set of
//! tasks that must re-run. Editors that write temp files and atomic-rename
//! produce several events per save; the window collapses them into one run.
//!
//! Classification mirrors the task graph:
//!
//! | Change | Task |
//! |--------|------|
//! | `*.scss` / `*.sass` under the source root | styles |
//! | `*.js` under the script source dir | scripts |
//! | image under the image source dir | images |
//! | generator input (`_posts/`, `_config.yml`, root `*.html`, …) | generator |
//!
//! Everything under the generated site and the asset staging directory is
//! ignored — those are our own outputs, and reacting to them would loop
//! forever. A failing task is logged and the loop keeps running.

use crate::config::PipelineConfig;
use crate::{generator, images, scripts, styles};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Watcher error: {0}")]
    Notify(#[from] notify::Error),
    #[error(transparent)]
    Styles(#[from] styles::StyleError),
    #[error(transparent)]
    Scripts(#[from] scripts::ScriptError),
    #[error(transparent)]
    Images(#[from] images::ImageError),
    #[error(transparent)]
    Generator(#[from] generator::GeneratorError),
}

/// A pipeline task the watcher can re-run. Ordering is execution order:
/// assets first, generator last, so a burst touching both ships fresh assets
/// into the rebuilt site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Task {
    Styles,
    Scripts,
    Images,
    Generate,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Task::Styles => "styles",
            Task::Scripts => "scripts",
            Task::Images => "images",
            Task::Generate => "generate",
        };
        f.write_str(name)
    }
}

const SASS_EXTENSIONS: &[&str] = &["scss", "sass"];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Map one changed path to the task that must re-run, if any.
pub fn classify(path: &Path, config: &PipelineConfig, root: &Path) -> Option<Task> {
    let rel = path.strip_prefix(root).ok()?;

    // Never react to our own outputs, or to hidden/VCS files
    if rel.starts_with(&config.paths.site) || rel.starts_with(&config.paths.assets) {
        return None;
    }
    if rel
        .components()
        .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
    {
        return None;
    }

    let ext = rel
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let ext = ext.as_deref();

    if let Ok(in_source) = rel.strip_prefix(&config.paths.source) {
        if ext.is_some_and(|e| SASS_EXTENSIONS.contains(&e)) {
            return Some(Task::Styles);
        }
        if in_source.starts_with(&config.scripts.source_dir) && ext == Some("js") {
            return Some(Task::Scripts);
        }
        if in_source.starts_with(&config.images.source_dir)
            && ext.is_some_and(|e| IMAGE_EXTENSIONS.contains(&e))
        {
            return Some(Task::Images);
        }
        return None;
    }

    if is_generator_input(rel, &config.generator.inputs) {
        return Some(Task::Generate);
    }
    None
}

/// Whether a root-relative path matches one of the generator input patterns.
///
/// A pattern is a path component (`"_posts"`), an exact filename
/// (`"_config.yml"`), or a root-level extension glob (`"*.html"`).
fn is_generator_input(rel: &Path, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| {
        if let Some(ext) = pattern.strip_prefix("*.") {
            rel.components().count() == 1
                && rel.extension().and_then(|e| e.to_str()) == Some(ext)
        } else {
            rel.components()
                .any(|c| c.as_os_str() == std::ffi::OsStr::new(pattern))
        }
    })
}

/// Classify a burst of changed paths into the ordered set of tasks to run.
pub fn collect_tasks<I>(paths: I, config: &PipelineConfig, root: &Path) -> BTreeSet<Task>
where
    I: IntoIterator<Item = PathBuf>,
{
    paths
        .into_iter()
        .filter_map(|p| classify(&p, config, root))
        .collect()
}

/// Run one task, logging a one-line summary.
pub fn run_task(
    task: Task,
    config: &PipelineConfig,
    root: &Path,
    use_cache: bool,
) -> Result<(), WatchError> {
    match task {
        Task::Styles => {
            let report = styles::compile(config, root)?;
            tracing::info!("styles: {} ({} bytes)", report.entry.display(), report.css_bytes);
        }
        Task::Scripts => {
            let report = scripts::bundle(config, root)?;
            tracing::info!(
                "scripts: {} sources → {} bytes",
                report.sources.len(),
                report.bundled_bytes
            );
        }
        Task::Images => {
            let report = images::optimize(config, root, use_cache)?;
            tracing::info!(
                "images: {} optimized, {} failed ({})",
                report.outcomes.len(),
                report.failures.len(),
                report.cache
            );
        }
        Task::Generate => {
            generator::run(&config.generator, root)?;
            tracing::info!("generate: {}", generator::command_line(&config.generator));
        }
    }
    Ok(())
}

/// Watch the project root and re-run tasks until the channel dies.
///
/// This is the standalone `watch` command; the dev server wires the same
/// classification into its own loop so it can bump the reload counter.
pub fn run(config: &PipelineConfig, root: &Path) -> Result<(), WatchError> {
    let (tx, rx) = mpsc::channel();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = tx.send(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(root, RecursiveMode::Recursive)?;

    tracing::info!("Watching {} (Ctrl+C to stop)", root.display());
    let debounce = Duration::from_millis(config.watch.debounce_ms);

    loop {
        let first = match rx.recv() {
            Ok(event) => event,
            Err(_) => return Ok(()), // watcher gone, nothing left to do
        };

        let mut paths = Vec::new();
        collect_event_paths(first, &mut paths);
        // Debounce: drain the burst until a quiet period elapses
        while let Ok(event) = rx.recv_timeout(debounce) {
            collect_event_paths(event, &mut paths);
        }

        let tasks = collect_tasks(paths, config, root);
        for task in tasks {
            tracing::info!("change detected → {task}");
            if let Err(err) = run_task(task, config, root, true) {
                tracing::error!("{task} failed: {err}");
            }
        }
    }
}

fn collect_event_paths(event: Result<notify::Event, notify::Error>, paths: &mut Vec<PathBuf>) {
    match event {
        Ok(ev) => paths.extend(ev.paths),
        Err(err) => tracing::warn!("watcher error: {err}"),
    }
}
