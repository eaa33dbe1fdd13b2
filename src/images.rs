//! Image optimization.
//!
//! Re-encodes every `jpg`/`png`/`gif` under the image source directory into
//! the asset staging directory, in parallel via [rayon](https://docs.rs/rayon).
//! An optimized output is only kept when it is actually smaller than the
//! source; otherwise the source bytes are copied through unchanged, so the
//! task never inflates an already-tight file.
//!
//! ## Per-file error tolerance
//!
//! A corrupt or unreadable source must not kill a long-running watch loop,
//! so failures are collected into the report and the task carries on. The
//! task itself only fails on setup problems (destination not writable,
//! manifest not savable).
//!
//! ## Formats
//!
//! | Format | Re-encode |
//! |--------|-----------|
//! | JPEG | baseline at the configured quality, RGB |
//! | PNG | best compression, adaptive filtering |
//! | GIF | all frames re-encoded, animation preserved |
//!
//! Unchanged sources are skipped entirely via the content-addressed
//! [cache](crate::cache).

use crate::cache::{self, CacheManifest, CacheStats};
use crate::config::PipelineConfig;
use image::codecs::gif::{GifDecoder, GifEncoder, Repeat};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::{AnimationDecoder, DynamicImage, ExtendedColorType, ImageEncoder, ImageReader};
use rayon::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Extensions the task picks up, lowercase.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// What happened to one source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageAction {
    /// Re-encoded output was smaller and was written.
    Encoded,
    /// Re-encode didn't win; source bytes copied through.
    Copied,
    /// Skipped — cache hit with the output already on disk.
    Cached,
}

impl ImageAction {
    pub fn label(self) -> &'static str {
        match self {
            ImageAction::Encoded => "encoded",
            ImageAction::Copied => "copied",
            ImageAction::Cached => "cached",
        }
    }
}

/// One successfully handled source.
#[derive(Debug, Clone)]
pub struct ImageOutcome {
    /// Path relative to the image source directory.
    pub path: PathBuf,
    pub action: ImageAction,
    pub bytes_in: u64,
    pub bytes_out: u64,
}

/// One source the task gave up on.
#[derive(Debug, Clone)]
pub struct ImageFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Report for one run of the images task.
#[derive(Debug)]
pub struct ImageReport {
    pub outcomes: Vec<ImageOutcome>,
    pub failures: Vec<ImageFailure>,
    pub cache: CacheStats,
    /// Destination directory the outputs were written to.
    pub dest: PathBuf,
}

/// All image sources under the configured directory, relative paths in
/// stable (sorted) order. An absent directory yields an empty list — a
/// project without images is not an error.
pub fn source_files(config: &PipelineConfig, root: &Path) -> Result<Vec<PathBuf>, ImageError> {
    let dir = config.images_dir(root);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(&dir) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_image = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if is_image {
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

/// Optimize all image sources into the staging directory.
///
/// The generator copies staged assets into the site on its next run, so
/// unlike styles and scripts this task has a single destination.
pub fn optimize(
    config: &PipelineConfig,
    root: &Path,
    use_cache: bool,
) -> Result<ImageReport, ImageError> {
    let source_dir = config.images_dir(root);
    let dest_dir = config.assets_dir(root).join(&config.images.out_dir);
    std::fs::create_dir_all(&dest_dir)?;

    let files = source_files(config, root)?;
    let manifest = if use_cache {
        CacheManifest::load(&dest_dir)
    } else {
        CacheManifest::empty()
    };
    let params_hash = cache::hash_params(&format!(
        "v1 jpeg-quality={} png=best gif=frames",
        config.images.jpeg_quality
    ));

    let results: Vec<Result<(ImageOutcome, String, String), ImageFailure>> = files
        .par_iter()
        .map(|rel| {
            optimize_one(rel, &source_dir, &dest_dir, &manifest, &params_hash, config).map_err(
                |message| ImageFailure {
                    path: rel.clone(),
                    message,
                },
            )
        })
        .collect();

    let mut outcomes = Vec::new();
    let mut failures = Vec::new();
    let mut stats = CacheStats::default();
    let mut manifest = manifest;

    for result in results {
        match result {
            Ok((outcome, output_rel, source_hash)) => {
                match outcome.action {
                    ImageAction::Cached => stats.hits += 1,
                    _ => stats.misses += 1,
                }
                manifest.insert(output_rel, source_hash, params_hash.clone());
                outcomes.push(outcome);
            }
            Err(failure) => failures.push(failure),
        }
    }

    if use_cache {
        manifest.save(&dest_dir)?;
    }

    Ok(ImageReport {
        outcomes,
        failures,
        cache: stats,
        dest: dest_dir,
    })
}

/// Handle one source file. Returns the outcome plus the manifest key data.
/// Per-file errors are plain strings — they end up in the report, not in an
/// error chain anyone matches on.
fn optimize_one(
    rel: &Path,
    source_dir: &Path,
    dest_dir: &Path,
    manifest: &CacheManifest,
    params_hash: &str,
    config: &PipelineConfig,
) -> Result<(ImageOutcome, String, String), String> {
    let source_path = source_dir.join(rel);
    let bytes = std::fs::read(&source_path).map_err(|e| e.to_string())?;
    let source_hash = cache::hash_bytes(&bytes);
    let output_rel = rel.to_string_lossy().to_string();
    let output_path = dest_dir.join(rel);

    if manifest.is_hit(dest_dir, &output_rel, &source_hash, params_hash) {
        let bytes_out = std::fs::metadata(&output_path)
            .map(|m| m.len())
            .unwrap_or(0);
        let outcome = ImageOutcome {
            path: rel.to_path_buf(),
            action: ImageAction::Cached,
            bytes_in: bytes.len() as u64,
            bytes_out,
        };
        return Ok((outcome, output_rel, source_hash));
    }

    let ext = rel
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    let encoded = match ext.as_str() {
        "jpg" | "jpeg" => encode_jpeg(&bytes, config.images.jpeg_quality)?,
        "png" => encode_png(&bytes)?,
        "gif" => encode_gif(&bytes)?,
        other => return Err(format!("unsupported extension: {other}")),
    };

    let (output, action) = if encoded.len() < bytes.len() {
        (encoded, ImageAction::Encoded)
    } else {
        (bytes.clone(), ImageAction::Copied)
    };

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    std::fs::write(&output_path, &output).map_err(|e| e.to_string())?;

    let outcome = ImageOutcome {
        path: rel.to_path_buf(),
        action,
        bytes_in: bytes.len() as u64,
        bytes_out: output.len() as u64,
    };
    Ok((outcome, output_rel, source_hash))
}

fn decode(bytes: &[u8]) -> Result<DynamicImage, String> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| e.to_string())?
        .decode()
        .map_err(|e| e.to_string())
}

fn encode_jpeg(bytes: &[u8], quality: u8) -> Result<Vec<u8>, String> {
    let rgb = decode(bytes)?.to_rgb8();
    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, quality);
    encoder
        .write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| e.to_string())?;
    Ok(out)
}

fn encode_png(bytes: &[u8]) -> Result<Vec<u8>, String> {
    let img = decode(bytes)?;
    let mut out = Vec::new();
    let encoder = PngEncoder::new_with_quality(
        &mut out,
        CompressionType::Best,
        PngFilterType::Adaptive,
    );
    img.write_with_encoder(encoder).map_err(|e| e.to_string())?;
    Ok(out)
}

fn encode_gif(bytes: &[u8]) -> Result<Vec<u8>, String> {
    let decoder = GifDecoder::new(Cursor::new(bytes)).map_err(|e| e.to_string())?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .map_err(|e| e.to_string())?;
    let mut out = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut out, 10);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| e.to_string())?;
        encoder.encode_frames(frames).map_err(|e| e.to_string())?;
    }
    Ok(out)
}
