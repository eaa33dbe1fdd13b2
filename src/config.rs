//! Pipeline configuration module.
//!
//! Handles loading, validating, and merging `pressroom.toml`. Configuration is
//! sparse: stock defaults cover a conventional Jekyll-style project layout and
//! user files only specify the values they want to override.
//!
//! ## Config File Location
//!
//! A single `pressroom.toml` at the project root:
//!
//! ```text
//! blog/
//! ├── pressroom.toml           # Pipeline config (optional)
//! ├── _config.yml              # Generator's own config — not ours
//! ├── _posts/                  # Generator input
//! ├── src/
//! │   ├── sass/main.scss       # Stylesheet entrypoint
//! │   ├── js/                  # Theme scripts, bundled in path order
//! │   └── img/                 # Image sources
//! ├── assets/                  # Staged pipeline output (committed)
//! └── _site/                   # Generated site (served, never committed)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [paths]
//! source = "src"            # Pipeline source root
//! site = "_site"            # Generator output directory
//! assets = "assets"         # Asset staging directory
//!
//! [styles]
//! entry = "sass/main.scss"  # Entrypoint, relative to paths.source
//! out_dir = "css"           # Destination, relative to the asset dirs
//! compressed = false        # Emit compressed CSS
//!
//! [scripts]
//! source_dir = "js"         # Script sources, relative to paths.source
//! out_dir = "js"
//! bundle = "main.js"        # Bundle filename
//! minify = true
//!
//! [images]
//! source_dir = "img"        # Image sources, relative to paths.source
//! out_dir = "img"
//! jpeg_quality = 85         # 1-100
//!
//! [generator]
//! command = "bundle"
//! args = ["exec", "jekyll", "build"]
//! inputs = ["_config.yml", "_includes", "_layouts", "_posts", "*.html"]
//!
//! [serve]
//! port = 4000
//! poll_ms = 800             # Reload poller interval
//!
//! [watch]
//! debounce_ms = 200         # Quiet period before re-running tasks
//!
//! [chrome]
//! scroll_threshold = 300    # px before the header shrinks
//! scroll_debounce_ms = 250
//! equalize_container = "recent"
//! equalize_tags = ["h2", "p"]
//! # tracking_id = "UA-000000-1"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Name of the config file within the project root.
pub const CONFIG_FILENAME: &str = "pressroom.toml";

/// Pipeline configuration loaded from `pressroom.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Project directory layout.
    pub paths: PathsConfig,
    /// Stylesheet compilation settings.
    pub styles: StylesConfig,
    /// Script bundling settings.
    pub scripts: ScriptsConfig,
    /// Image optimization settings.
    pub images: ImagesConfig,
    /// External site generator invocation.
    pub generator: GeneratorConfig,
    /// Dev server settings.
    pub serve: ServeConfig,
    /// Source watcher settings.
    pub watch: WatchConfig,
    /// Browser-chrome behavior settings shipped to the bundle prelude.
    pub chrome: ChromeConfig,
}

impl PipelineConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.images.jpeg_quality == 0 || self.images.jpeg_quality > 100 {
            return Err(ConfigError::Validation(
                "images.jpeg_quality must be 1-100".into(),
            ));
        }
        if self.styles.entry.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "styles.entry must not be empty".into(),
            ));
        }
        if self.scripts.bundle.is_empty() {
            return Err(ConfigError::Validation(
                "scripts.bundle must not be empty".into(),
            ));
        }
        if self.generator.command.is_empty() {
            return Err(ConfigError::Validation(
                "generator.command must not be empty".into(),
            ));
        }
        if self.chrome.equalize_tags.is_empty() {
            return Err(ConfigError::Validation(
                "chrome.equalize_tags must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Pipeline source root (`src/` by convention).
    pub fn source_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.source)
    }

    /// Generator output directory (`_site/` by convention).
    pub fn site_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.site)
    }

    /// Asset staging directory (`assets/` by convention).
    pub fn assets_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.assets)
    }

    /// Absolute path of the stylesheet entrypoint.
    pub fn styles_entry(&self, root: &Path) -> PathBuf {
        self.source_dir(root).join(&self.styles.entry)
    }

    /// Absolute path of the script source directory.
    pub fn scripts_dir(&self, root: &Path) -> PathBuf {
        self.source_dir(root).join(&self.scripts.source_dir)
    }

    /// Absolute path of the image source directory.
    pub fn images_dir(&self, root: &Path) -> PathBuf {
        self.source_dir(root).join(&self.images.source_dir)
    }

    /// The two destinations every asset task writes to: the staging directory
    /// (picked up by the next generator run) and the generated site itself
    /// (picked up by the running dev server without a generator rebuild).
    pub fn asset_dests(&self, root: &Path, out_dir: &str) -> [PathBuf; 2] {
        [
            self.assets_dir(root).join(out_dir),
            self.site_dir(root).join(&self.paths.assets).join(out_dir),
        ]
    }
}

/// Project directory layout, all relative to the project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Pipeline source root.
    pub source: PathBuf,
    /// Generator output directory.
    pub site: PathBuf,
    /// Asset staging directory.
    pub assets: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("src"),
            site: PathBuf::from("_site"),
            assets: PathBuf::from("assets"),
        }
    }
}

/// Stylesheet compilation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StylesConfig {
    /// Sass entrypoint, relative to `paths.source`.
    pub entry: PathBuf,
    /// Destination directory, relative to the asset dirs.
    pub out_dir: String,
    /// Emit compressed CSS instead of expanded.
    pub compressed: bool,
}

impl Default for StylesConfig {
    fn default() -> Self {
        Self {
            entry: PathBuf::from("sass/main.scss"),
            out_dir: "css".to_string(),
            compressed: false,
        }
    }
}

/// Script bundling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptsConfig {
    /// Script source directory, relative to `paths.source`.
    pub source_dir: String,
    /// Destination directory, relative to the asset dirs.
    pub out_dir: String,
    /// Bundle filename.
    pub bundle: String,
    /// Minify the bundle.
    pub minify: bool,
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            source_dir: "js".to_string(),
            out_dir: "js".to_string(),
            bundle: "main.js".to_string(),
            minify: true,
        }
    }
}

/// Image optimization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Image source directory, relative to `paths.source`.
    pub source_dir: String,
    /// Destination directory, relative to the asset dirs.
    pub out_dir: String,
    /// JPEG re-encode quality (1 = worst, 100 = best).
    pub jpeg_quality: u8,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            source_dir: "img".to_string(),
            out_dir: "img".to_string(),
            jpeg_quality: 85,
        }
    }
}

/// External site generator invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Command to spawn.
    pub command: String,
    /// Arguments passed to the command.
    pub args: Vec<String>,
    /// Generator input patterns the watcher maps to a re-run. A pattern is a
    /// path component (`"_posts"`), an exact filename (`"_config.yml"`), or a
    /// root-level extension glob (`"*.html"`).
    pub inputs: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            command: "bundle".to_string(),
            args: vec!["exec".into(), "jekyll".into(), "build".into()],
            inputs: vec![
                "_config.yml".into(),
                "_includes".into(),
                "_layouts".into(),
                "_posts".into(),
                "*.html".into(),
            ],
        }
    }
}

/// Dev server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServeConfig {
    /// Port to bind on 127.0.0.1.
    pub port: u16,
    /// Interval of the injected reload poller, in milliseconds.
    pub poll_ms: u64,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            port: 4000,
            poll_ms: 800,
        }
    }
}

/// Source watcher settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatchConfig {
    /// Quiet period before a burst of change events is acted on.
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: 200 }
    }
}

/// Browser-chrome behavior settings.
///
/// These feed the [`chrome`](crate::chrome) model and are emitted verbatim
/// into the script bundle prelude so the browser-side scripts share them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChromeConfig {
    /// Scroll offset in pixels past which the header shrinks.
    pub scroll_threshold: u32,
    /// Debounce delay before the scroll state is recomputed.
    pub scroll_debounce_ms: u64,
    /// Id of the container whose columns get equalized.
    pub equalize_container: String,
    /// Tags equalized within the container, in order.
    pub equalize_tags: Vec<String>,
    /// Analytics tracking id. Pageview beacons are disabled when absent.
    pub tracking_id: Option<String>,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: 300,
            scroll_debounce_ms: 250,
            equalize_container: "recent".to_string(),
            equalize_tags: vec!["h2".to_string(), "p".to_string()],
            tracking_id: None,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(PipelineConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `pressroom.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no config file exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<PipelineConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: PipelineConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `pressroom.toml` in the project root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<PipelineConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `pressroom.toml` with all keys documented.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Pressroom Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Project layout (relative to the project root)
# ---------------------------------------------------------------------------
[paths]
source = "src"       # Pipeline source root
site = "_site"       # Generator output directory (served by `pressroom serve`)
assets = "assets"    # Asset staging directory (input to the next generator run)

# ---------------------------------------------------------------------------
# Stylesheet compilation
# ---------------------------------------------------------------------------
[styles]
entry = "sass/main.scss"   # Entrypoint, relative to paths.source
out_dir = "css"            # Destination, relative to the asset dirs
compressed = false         # Emit compressed CSS

# ---------------------------------------------------------------------------
# Script bundling
# ---------------------------------------------------------------------------
[scripts]
source_dir = "js"    # Script sources, relative to paths.source
out_dir = "js"
bundle = "main.js"   # Bundle filename
minify = true

# ---------------------------------------------------------------------------
# Image optimization
# ---------------------------------------------------------------------------
[images]
source_dir = "img"   # Image sources, relative to paths.source
out_dir = "img"
jpeg_quality = 85    # JPEG re-encode quality (1-100)

# ---------------------------------------------------------------------------
# External site generator
# ---------------------------------------------------------------------------
[generator]
command = "bundle"
args = ["exec", "jekyll", "build"]
# Inputs the watcher maps to a generator re-run: a path component, an exact
# filename, or a root-level extension glob.
inputs = ["_config.yml", "_includes", "_layouts", "_posts", "*.html"]

# ---------------------------------------------------------------------------
# Dev server
# ---------------------------------------------------------------------------
[serve]
port = 4000
poll_ms = 800        # Reload poller interval (milliseconds)

# ---------------------------------------------------------------------------
# Watcher
# ---------------------------------------------------------------------------
[watch]
debounce_ms = 200    # Quiet period before re-running tasks

# ---------------------------------------------------------------------------
# Browser chrome (shared with the script bundle via the generated prelude)
# ---------------------------------------------------------------------------
[chrome]
scroll_threshold = 300       # px before the header shrinks
scroll_debounce_ms = 250
equalize_container = "recent"
equalize_tags = ["h2", "p"]
# Analytics tracking id. Pageview beacons are disabled when absent.
# tracking_id = "UA-000000-1"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_layout() {
        let config = PipelineConfig::default();
        assert_eq!(config.paths.source, PathBuf::from("src"));
        assert_eq!(config.paths.site, PathBuf::from("_site"));
        assert_eq!(config.paths.assets, PathBuf::from("assets"));
    }

    #[test]
    fn default_config_has_task_settings() {
        let config = PipelineConfig::default();
        assert_eq!(config.styles.entry, PathBuf::from("sass/main.scss"));
        assert_eq!(config.scripts.bundle, "main.js");
        assert!(config.scripts.minify);
        assert_eq!(config.images.jpeg_quality, 85);
        assert_eq!(config.generator.command, "bundle");
        assert_eq!(config.serve.port, 4000);
        assert_eq!(config.watch.debounce_ms, 200);
    }

    #[test]
    fn default_chrome_settings() {
        let config = PipelineConfig::default();
        assert_eq!(config.chrome.scroll_threshold, 300);
        assert_eq!(config.chrome.scroll_debounce_ms, 250);
        assert_eq!(config.chrome.equalize_container, "recent");
        assert_eq!(config.chrome.equalize_tags, vec!["h2", "p"]);
        assert!(config.chrome.tracking_id.is_none());
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[serve]
port = 9000
"#;
        let config: PipelineConfig = toml::from_str(toml).unwrap();
        // Overridden value
        assert_eq!(config.serve.port, 9000);
        // Default values preserved
        assert_eq!(config.serve.poll_ms, 800);
        assert_eq!(config.images.jpeg_quality, 85);
    }

    #[test]
    fn path_helpers_join_root() {
        let config = PipelineConfig::default();
        let root = Path::new("/blog");
        assert_eq!(config.source_dir(root), PathBuf::from("/blog/src"));
        assert_eq!(config.site_dir(root), PathBuf::from("/blog/_site"));
        assert_eq!(
            config.styles_entry(root),
            PathBuf::from("/blog/src/sass/main.scss")
        );
        assert_eq!(config.scripts_dir(root), PathBuf::from("/blog/src/js"));
        assert_eq!(config.images_dir(root), PathBuf::from("/blog/src/img"));
    }

    #[test]
    fn asset_dests_cover_staging_and_site() {
        let config = PipelineConfig::default();
        let dests = config.asset_dests(Path::new("/blog"), "css");
        assert_eq!(dests[0], PathBuf::from("/blog/assets/css"));
        assert_eq!(dests[1], PathBuf::from("/blog/_site/assets/css"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.serve.port, 4000);
        assert_eq!(config.scripts.bundle, "main.js");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r#"
[generator]
command = "zola"
args = ["build"]

[styles]
compressed = true
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.generator.command, "zola");
        assert_eq!(config.generator.args, vec!["build"]);
        assert!(config.styles.compressed);
        // Unspecified values should be defaults
        assert_eq!(config.styles.out_dir, "css");
        assert_eq!(
            config.generator.inputs,
            vec!["_config.yml", "_includes", "_layouts", "_posts", "*.html"]
        );
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r#"
[images]
jpeg_quality = 0
"#,
        )
        .unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"port = 4000"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"port = 9000"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("port").unwrap().as_integer(), Some(9000));
    }

    #[test]
    fn merge_toml_table_merge_preserves_base_keys() {
        let base: toml::Value = toml::from_str(
            r#"
[serve]
port = 4000
poll_ms = 800
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[serve]
port = 9000
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let serve = merged.get("serve").unwrap();
        assert_eq!(serve.get("port").unwrap().as_integer(), Some(9000));
        assert_eq!(serve.get("poll_ms").unwrap().as_integer(), Some(800));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str(
            r#"
[chrome]
scroll_threshold = 300
equalize_container = "recent"
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[chrome]
scroll_threshold = 120
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let chrome = merged.get("chrome").unwrap();
        assert_eq!(
            chrome.get("scroll_threshold").unwrap().as_integer(),
            Some(120)
        );
        assert_eq!(
            chrome.get("equalize_container").unwrap().as_str(),
            Some("recent")
        );
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[images]
jpg_quality = 85
"#;
        let result: Result<PipelineConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let toml_str = r#"
[imagez]
jpeg_quality = 85
"#;
        let result: Result<PipelineConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_quality_bounds() {
        let mut config = PipelineConfig::default();
        config.images.jpeg_quality = 100;
        assert!(config.validate().is_ok());

        config.images.jpeg_quality = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_empty_bundle_name() {
        let mut config = PipelineConfig::default();
        config.scripts.bundle = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("bundle"));
    }

    #[test]
    fn validate_empty_generator_command() {
        let mut config = PipelineConfig::default();
        config.generator.command = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_empty_equalize_tags() {
        let mut config = PipelineConfig::default();
        config.chrome.equalize_tags.clear();
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // resolve_config / load_raw_config tests
    // =========================================================================

    #[test]
    fn load_raw_config_returns_none_when_no_file() {
        let tmp = TempDir::new().unwrap();
        assert!(load_raw_config(tmp.path()).unwrap().is_none());
    }

    #[test]
    fn resolve_config_with_overlay() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str(
            r#"
[watch]
debounce_ms = 50
"#,
        )
        .unwrap();
        let config = resolve_config(base, Some(overlay)).unwrap();
        assert_eq!(config.watch.debounce_ms, 50);
        // Other fields preserved from defaults
        assert_eq!(config.serve.poll_ms, 800);
    }

    #[test]
    fn resolve_config_rejects_invalid_values() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str(
            r#"
[images]
jpeg_quality = 180
"#,
        )
        .unwrap();
        let result = resolve_config(base, Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let content = stock_config_toml();
        let _: toml::Value = toml::from_str(content).expect("stock config must be valid TOML");
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let content = stock_config_toml();
        let config: PipelineConfig = toml::from_str(content).unwrap();
        assert_eq!(config.serve.port, 4000);
        assert_eq!(config.images.jpeg_quality, 85);
        assert_eq!(config.chrome.scroll_threshold, 300);
        assert_eq!(config.styles.entry, PathBuf::from("sass/main.scss"));
        assert_eq!(config.generator.args, vec!["exec", "jekyll", "build"]);
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        for section in [
            "[paths]",
            "[styles]",
            "[scripts]",
            "[images]",
            "[generator]",
            "[serve]",
            "[watch]",
            "[chrome]",
        ] {
            assert!(content.contains(section), "missing {section}");
        }
    }
}
