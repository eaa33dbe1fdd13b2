//! # Pressroom
//!
//! Asset pipeline and dev loop for a blog built by an external static-site
//! generator. The generator renders pages; pressroom does everything around
//! it: compiles the stylesheet source, bundles and minifies the theme
//! scripts, optimizes images, and runs the edit-preview loop (serve, watch,
//! live reload).
//!
//! # Architecture: Task Pipeline
//!
//! A full build is a fixed task sequence, each task independent and
//! re-runnable on its own:
//!
//! ```text
//! 1. styles    src/sass  →  assets/css + _site/assets/css
//! 2. scripts   src/js    →  assets/js  + _site/assets/js   (one bundle)
//! 3. images    src/img   →  assets/img                     (cached)
//! 4. generate  project   →  _site/                         (external command)
//! ```
//!
//! The dual destinations exist for the dev loop: writing into `_site/` makes
//! an asset change visible to a running dev server immediately, while the
//! staged copy under `assets/` is what the generator folds into the site on
//! its next full run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `pressroom.toml` loading, merging over stock defaults, validation |
//! | [`styles`] | Sass → CSS compilation |
//! | [`scripts`] | Script concatenation, minification, settings prelude |
//! | [`images`] | Image re-encoding with per-file error tolerance |
//! | [`cache`] | Content-addressed skip cache for the images task |
//! | [`generator`] | External generator spawn and exit-status mapping |
//! | [`watch`] | File watcher, debounce window, change-to-task mapping |
//! | [`serve`] | Dev server with build-counter live reload |
//! | [`report`] | CLI output formatting — pure format functions |
//! | [`chrome`] | Headless model of the theme's browser chrome |
//!
//! # Design Decisions
//!
//! ## The Generator Stays External
//!
//! Page rendering belongs to the site generator the blog already uses. The
//! pipeline spawns it as a child process and trusts its exit status, the
//! same way it would run under any task runner. Swapping Jekyll for another
//! generator is a config edit, not a code change.
//!
//! ## Polled Live Reload
//!
//! The dev server stamps every HTML response with a tiny poller that watches
//! a build counter and reloads the page when it changes. A push channel
//! would save a localhost GET per interval — nothing, against the simplicity
//! of one JSON endpoint and no connection lifecycle to manage.
//!
//! ## Keep-If-Smaller Optimization
//!
//! Image re-encoding only wins when it actually shrinks the file; an
//! already-tight source is copied through byte-for-byte. Combined with the
//! content-addressed cache, repeat builds touch only what changed.
//!
//! ## A Headless Chrome Model
//!
//! The theme's browser behaviors — sidebar, search overlay, header shrink,
//! equal-height columns, external-link targeting — are modeled as
//! deterministic state transitions over a minimal element tree in
//! [`chrome`]. The script bundle is the browser-side rendition of the same
//! rules, and [`scripts`] emits the shared settings as a generated prelude
//! so the two read identical thresholds and names.

pub mod cache;
pub mod chrome;
pub mod config;
pub mod generator;
pub mod images;
pub mod report;
pub mod scripts;
pub mod serve;
pub mod styles;
pub mod watch;
