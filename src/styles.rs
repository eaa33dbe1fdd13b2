//! Stylesheet compilation.
//!
//! Compiles the Sass entrypoint with [grass](https://docs.rs/grass) and
//! writes the resulting CSS to both asset destinations: the staging
//! directory, where the generator picks it up on its next run, and straight
//! into the generated site, so a running dev server reflects style changes
//! without waiting for a generator rebuild.

use crate::config::PipelineConfig;
use grass::OutputStyle;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StyleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Sass entrypoint not found: {0}")]
    EntryNotFound(PathBuf),
    #[error("Sass compilation failed: {0}")]
    Compile(#[from] Box<grass::Error>),
}

/// Report for one run of the styles task.
#[derive(Debug)]
pub struct StyleReport {
    /// Entrypoint, relative to the source root.
    pub entry: PathBuf,
    pub css_bytes: usize,
    pub compressed: bool,
    /// Files written, in destination order.
    pub dests: Vec<PathBuf>,
}

/// Output filename for an entrypoint: its stem with a `.css` extension.
pub fn css_filename(entry: &Path) -> String {
    let stem = entry
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "main".to_string());
    format!("{stem}.css")
}

/// Compile the configured entrypoint and fan the CSS out to both
/// destinations.
pub fn compile(config: &PipelineConfig, root: &Path) -> Result<StyleReport, StyleError> {
    let entry = config.styles_entry(root);
    if !entry.is_file() {
        return Err(StyleError::EntryNotFound(entry));
    }

    let style = if config.styles.compressed {
        OutputStyle::Compressed
    } else {
        OutputStyle::Expanded
    };
    let options = grass::Options::default().style(style);
    let css = grass::from_path(&entry, &options)?;

    let filename = css_filename(&config.styles.entry);
    let mut dests = Vec::new();
    for dir in config.asset_dests(root, &config.styles.out_dir) {
        fs::create_dir_all(&dir)?;
        let out = dir.join(&filename);
        fs::write(&out, &css)?;
        dests.push(out);
    }

    Ok(StyleReport {
        entry: config.styles.entry.clone(),
        css_bytes: css.len(),
        compressed: config.styles.compressed,
        dests,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SCSS: &str = r#"
$accent: #336699;

.post {
    color: $accent;
    h2 { margin: 0; }
}
"#;

    fn write_entry(root: &Path, config: &PipelineConfig, content: &str) {
        let entry = config.styles_entry(root);
        fs::create_dir_all(entry.parent().unwrap()).unwrap();
        fs::write(entry, content).unwrap();
    }

    #[test]
    fn compiles_variables_and_nesting() {
        let tmp = TempDir::new().unwrap();
        let config = PipelineConfig::default();
        write_entry(tmp.path(), &config, SCSS);

        let report = compile(&config, tmp.path()).unwrap();
        assert_eq!(report.dests.len(), 2);

        let css = fs::read_to_string(&report.dests[0]).unwrap();
        assert!(css.contains("color: #336699"));
        assert!(css.contains(".post h2"));
    }

    #[test]
    fn writes_staging_and_site_copies() {
        let tmp = TempDir::new().unwrap();
        let config = PipelineConfig::default();
        write_entry(tmp.path(), &config, SCSS);

        let report = compile(&config, tmp.path()).unwrap();
        assert!(tmp.path().join("assets/css/main.css").exists());
        assert!(tmp.path().join("_site/assets/css/main.css").exists());

        let a = fs::read_to_string(&report.dests[0]).unwrap();
        let b = fs::read_to_string(&report.dests[1]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn compressed_output_is_single_line() {
        let tmp = TempDir::new().unwrap();
        let mut config = PipelineConfig::default();
        config.styles.compressed = true;
        write_entry(tmp.path(), &config, SCSS);

        let report = compile(&config, tmp.path()).unwrap();
        assert!(report.compressed);
        let css = fs::read_to_string(&report.dests[0]).unwrap();
        assert!(!css.trim_end().contains('\n'));
    }

    #[test]
    fn missing_entry_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let config = PipelineConfig::default();
        let result = compile(&config, tmp.path());
        assert!(matches!(result, Err(StyleError::EntryNotFound(_))));
    }

    #[test]
    fn invalid_sass_is_a_compile_error() {
        let tmp = TempDir::new().unwrap();
        let config = PipelineConfig::default();
        write_entry(tmp.path(), &config, ".broken { color: $undefined; }");

        let result = compile(&config, tmp.path());
        assert!(matches!(result, Err(StyleError::Compile(_))));
    }

    #[test]
    fn css_filename_follows_entry_stem() {
        assert_eq!(css_filename(Path::new("sass/main.scss")), "main.css");
        assert_eq!(css_filename(Path::new("style.scss")), "style.css");
    }
}
