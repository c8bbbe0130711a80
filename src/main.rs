// src/main.rs
mod config;
mod extractors;
mod generator;
mod pages;
mod rewrite;
mod storage;
mod utils;

use std::path::PathBuf;

use clap::Parser;
use config::SiteConfig;
use generator::DocsGenerator;
use utils::AppError;

/// Splits a README into documentation site pages
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file (optional, built-in defaults otherwise)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// README to split (overrides the config file)
    #[arg(short, long)]
    readme: Option<PathBuf>,

    /// Output directory for generated pages (overrides the config file)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also write a JSON manifest of generated pages, relative to the output directory
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Render everything but do not write any files
    #[arg(long)]
    dry_run: bool,

    /// Debug logging when RUST_LOG is not set
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Loads the config file if given, then applies command-line overrides.
    fn site_config(&self) -> Result<SiteConfig, AppError> {
        let mut config = match &self.config {
            Some(path) => SiteConfig::load(path)?,
            None => SiteConfig::default(),
        };

        if let Some(readme) = &self.readme {
            config.readme = readme.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(manifest) = &self.manifest {
            config.manifest = Some(manifest.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(args.verbose);
    tracing::info!("Starting docs generation for args: {:?}", args);

    // 2. Resolve configuration
    let config = args.site_config()?;
    tracing::debug!(
        "Using README {} -> {}",
        config.readme.display(),
        config.output_dir.display()
    );

    // 3. Generate pages
    let report = DocsGenerator::new(config, args.dry_run).run()?;

    tracing::info!(
        "Docs generation finished. Pages: {}, skipped sections: {}",
        report.written.len(),
        report.skipped.len()
    );
    if !report.skipped.is_empty() {
        tracing::info!("Skipped sections: {}", report.skipped.join(", "));
    }

    Ok(())
}
