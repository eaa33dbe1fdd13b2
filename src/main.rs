use clap::{Parser, Subcommand};
use pressroom::{config, generator, images, report, scripts, serve, styles, watch};
use std::path::PathBuf;

/// Shared flags for commands that optimize images.
#[derive(clap::Args, Clone)]
struct CacheArgs {
    /// Disable the optimization cache — force re-encoding of all images
    #[arg(long)]
    no_cache: bool,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "pressroom")]
#[command(about = "Asset pipeline and dev loop for a generator-built blog")]
#[command(long_about = "\
Asset pipeline and dev loop for a generator-built blog

The site generator renders pages; pressroom compiles the stylesheet source,
bundles the theme scripts, optimizes images, and runs the edit-preview loop.

Project structure:

  blog/
  ├── pressroom.toml               # Pipeline config (optional)
  ├── _config.yml                  # Generator's own config
  ├── _posts/                      # Generator input
  ├── src/
  │   ├── sass/main.scss           # Stylesheet entrypoint
  │   ├── js/                      # Theme scripts, bundled in path order
  │   └── img/                     # Image sources (jpg, png, gif)
  ├── assets/                      # Staged pipeline output
  └── _site/                       # Generated site (served with live reload)

Run 'pressroom gen-config' to generate a documented pressroom.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Project root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline: styles → scripts → images → generate
    Build(CacheArgs),
    /// Compile the Sass entrypoint
    Styles,
    /// Concatenate and minify the theme scripts
    Scripts,
    /// Optimize image sources
    Images(CacheArgs),
    /// Run the external site generator
    Generate,
    /// Full build, then serve the site with live reload and watch sources
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Watch sources and re-run affected tasks (no server)
    Watch,
    /// Validate config and source layout without building
    Check,
    /// Print a stock pressroom.toml with all options documented
    GenConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let root = cli.root.clone();

    match cli.command {
        Command::Build(cache_args) => {
            let config = config::load_config(&root)?;
            build(&config, &root, !cache_args.no_cache)?;
        }
        Command::Styles => {
            let config = config::load_config(&root)?;
            let report = styles::compile(&config, &root)?;
            report::print_style_report(&report);
        }
        Command::Scripts => {
            let config = config::load_config(&root)?;
            let report = scripts::bundle(&config, &root)?;
            report::print_script_report(&report);
        }
        Command::Images(cache_args) => {
            let config = config::load_config(&root)?;
            let report = images::optimize(&config, &root, !cache_args.no_cache)?;
            report::print_image_report(&report);
        }
        Command::Generate => {
            let config = config::load_config(&root)?;
            println!("==> Running {}", generator::command_line(&config.generator));
            generator::run(&config.generator, &root)?;
        }
        Command::Serve { port } => {
            let mut config = config::load_config(&root)?;
            if let Some(port) = port {
                config.serve.port = port;
            }
            build(&config, &root, true)?;
            serve::dev(config, root).await?;
        }
        Command::Watch => {
            let config = config::load_config(&root)?;
            watch::run(&config, &root)?;
        }
        Command::Check => {
            let config = config::load_config(&root)?;
            println!("==> Checking {}", root.display());
            let summary = report::CheckSummary {
                styles_entry_found: config.styles_entry(&root).is_file(),
                script_count: scripts::source_files(&config, &root)
                    .map(|s| s.len())
                    .unwrap_or(0),
                image_count: images::source_files(&config, &root)?.len(),
                generator_command: generator::command_line(&config.generator),
            };
            report::print_check_summary(&summary);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// The full pipeline, task by task, with reports as it goes.
fn build(
    config: &config::PipelineConfig,
    root: &std::path::Path,
    use_cache: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("==> Task 1: Styles");
    let style_report = styles::compile(config, root)?;
    report::print_style_report(&style_report);

    println!("==> Task 2: Scripts");
    let script_report = scripts::bundle(config, root)?;
    report::print_script_report(&script_report);

    println!("==> Task 3: Images");
    let image_report = images::optimize(config, root, use_cache)?;
    report::print_image_report(&image_report);

    println!(
        "==> Task 4: Generate ({})",
        generator::command_line(&config.generator)
    );
    generator::run(&config.generator, root)?;

    println!("==> Build complete: {}", config.site_dir(root).display());
    Ok(())
}
