//! Script bundling.
//!
//! Walks the script source directory, concatenates every `.js` file in
//! stable path order, and minifies the result into a single bundle written
//! to both asset destinations.
//!
//! The bundle opens with a generated prelude exposing the chrome settings
//! (`window.PRESSROOM`), so the browser-side scripts read the same
//! thresholds, container names, and tracking id the
//! [`chrome`](crate::chrome) model is configured with.

use crate::config::{ChromeConfig, PipelineConfig};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Script source directory not found: {0}")]
    SourceDirNotFound(PathBuf),
    #[error("No script sources under {0}")]
    NoSources(PathBuf),
}

/// Report for one run of the scripts task.
#[derive(Debug)]
pub struct ScriptReport {
    /// Sources in bundle order, relative to the script source directory.
    pub sources: Vec<PathBuf>,
    pub raw_bytes: usize,
    pub bundled_bytes: usize,
    pub minified: bool,
    /// Files written, in destination order.
    pub dests: Vec<PathBuf>,
}

/// All script sources in bundle order: relative paths, sorted, so the
/// concatenation is deterministic regardless of directory-walk order.
pub fn source_files(config: &PipelineConfig, root: &Path) -> Result<Vec<PathBuf>, ScriptError> {
    let dir = config.scripts_dir(root);
    if !dir.is_dir() {
        return Err(ScriptError::SourceDirNotFound(dir));
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(&dir) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_js = entry
            .path()
            .extension()
            .map(|e| e.eq_ignore_ascii_case("js"))
            .unwrap_or(false);
        if is_js {
            let rel = entry
                .path()
                .strip_prefix(&dir)
                .expect("walked path is under its root")
                .to_path_buf();
            files.push(rel);
        }
    }
    files.sort();
    Ok(files)
}

/// The generated bundle prelude: chrome settings as `window.PRESSROOM`.
pub fn settings_prelude(chrome: &ChromeConfig) -> String {
    let settings = serde_json::json!({
        "scrollThreshold": chrome.scroll_threshold,
        "scrollDebounceMs": chrome.scroll_debounce_ms,
        "equalizeContainer": chrome.equalize_container,
        "equalizeTags": chrome.equalize_tags,
        "trackingId": chrome.tracking_id,
    });
    format!("window.PRESSROOM = {settings};\n")
}

/// Concatenate, minify, and write the bundle to both destinations.
pub fn bundle(config: &PipelineConfig, root: &Path) -> Result<ScriptReport, ScriptError> {
    let dir = config.scripts_dir(root);
    let sources = source_files(config, root)?;
    if sources.is_empty() {
        return Err(ScriptError::NoSources(dir));
    }

    let mut concatenated = settings_prelude(&config.chrome);
    for rel in &sources {
        let content = fs::read_to_string(dir.join(rel))?;
        concatenated.push_str(&content);
        if !content.ends_with('\n') {
            concatenated.push('\n');
        }
    }
    let raw_bytes = concatenated.len();

    let output = if config.scripts.minify {
        minifier::js::minify(&concatenated).to_string()
    } else {
        concatenated
    };

    let mut dests = Vec::new();
    for out_dir in config.asset_dests(root, &config.scripts.out_dir) {
        fs::create_dir_all(&out_dir)?;
        let out = out_dir.join(&config.scripts.bundle);
        fs::write(&out, &output)?;
        dests.push(out);
    }

    Ok(ScriptReport {
        sources,
        raw_bytes,
        bundled_bytes: output.len(),
        minified: config.scripts.minify,
        dests,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_script(root: &Path, config: &PipelineConfig, rel: &str, content: &str) {
        let path = config.scripts_dir(root).join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn sources_are_path_sorted() {
        let tmp = TempDir::new().unwrap();
        let config = PipelineConfig::default();
        write_script(tmp.path(), &config, "zmain.js", "var z = 1;");
        write_script(tmp.path(), &config, "app.js", "var a = 1;");
        write_script(tmp.path(), &config, "vendor/search.js", "var s = 1;");

        let sources = source_files(&config, tmp.path()).unwrap();
        assert_eq!(
            sources,
            vec![
                PathBuf::from("app.js"),
                PathBuf::from("vendor/search.js"),
                PathBuf::from("zmain.js"),
            ]
        );
    }

    #[test]
    fn bundle_concatenates_in_order_with_prelude_first() {
        let tmp = TempDir::new().unwrap();
        let mut config = PipelineConfig::default();
        config.scripts.minify = false;
        write_script(tmp.path(), &config, "b.js", "var second = 2;");
        write_script(tmp.path(), &config, "a.js", "var first = 1;");

        let report = bundle(&config, tmp.path()).unwrap();
        let out = fs::read_to_string(&report.dests[0]).unwrap();

        let prelude = out.find("window.PRESSROOM").unwrap();
        let first = out.find("var first").unwrap();
        let second = out.find("var second").unwrap();
        assert!(prelude < first && first < second);
    }

    #[test]
    fn prelude_carries_chrome_settings() {
        let mut chrome = ChromeConfig::default();
        chrome.tracking_id = Some("UA-000000-1".into());
        let prelude = settings_prelude(&chrome);

        assert!(prelude.starts_with("window.PRESSROOM = {"));
        assert!(prelude.contains("\"scrollThreshold\":300"));
        assert!(prelude.contains("\"scrollDebounceMs\":250"));
        assert!(prelude.contains("\"equalizeContainer\":\"recent\""));
        assert!(prelude.contains("\"trackingId\":\"UA-000000-1\""));
    }

    #[test]
    fn minification_strips_comments() {
        let tmp = TempDir::new().unwrap();
        let config = PipelineConfig::default();
        write_script(
            tmp.path(),
            &config,
            "app.js",
            "// a comment that must go away\nvar kept = 1;\n",
        );

        let report = bundle(&config, tmp.path()).unwrap();
        assert!(report.minified);
        assert!(report.bundled_bytes < report.raw_bytes);

        let out = fs::read_to_string(&report.dests[0]).unwrap();
        assert!(out.contains("kept"));
        assert!(!out.contains("comment that must go away"));
    }

    #[test]
    fn bundle_written_to_staging_and_site() {
        let tmp = TempDir::new().unwrap();
        let config = PipelineConfig::default();
        write_script(tmp.path(), &config, "app.js", "var a = 1;");

        bundle(&config, tmp.path()).unwrap();
        assert!(tmp.path().join("assets/js/main.js").exists());
        assert!(tmp.path().join("_site/assets/js/main.js").exists());
    }

    #[test]
    fn missing_source_dir_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let config = PipelineConfig::default();
        let result = bundle(&config, tmp.path());
        assert!(matches!(result, Err(ScriptError::SourceDirNotFound(_))));
    }

    #[test]
    fn empty_source_dir_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let config = PipelineConfig::default();
        fs::create_dir_all(config.scripts_dir(tmp.path())).unwrap();
        let result = bundle(&config, tmp.path());
        assert!(matches!(result, Err(ScriptError::NoSources(_))));
    }
}
