//! make-sbom: assemble one SPDX SBOM for a release artifact

#![allow(clippy::needless_pass_by_value)]

use anyhow::Result;
use clap::Parser;
use make_sbom::{
    cli,
    config::{AssembleConfig, ScannerConfig, DEFAULT_MANIFEST},
    pipeline::exit_codes,
    scanner::DEFAULT_SCANNER,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "make-sbom")]
#[command(version)]
#[command(about = "Assemble an SPDX 2.2 SBOM from a manifest, package lists, scans and existing SBOMs", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  SBOM written
    1  Error occurred

EXAMPLES:
    # SBOM for an update image, described by config.yaml
    make-sbom -i image.swu

    # Add the installed packages of the root file system
    make-sbom -i image.swu -p package_list.txt

    # Scan a directory and embed an SBOM made elsewhere
    make-sbom -i image.swu -f rootfs/ -e app.spdx.json

    # No artifact: write the scan result of a tarball on its own
    make-sbom -f rootfs.tar -o rootfs.spdx.json")]
struct Cli {
    /// Artifact to describe (a file in the current directory)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Manifest describing the artifact
    #[arg(short, long, default_value = DEFAULT_MANIFEST)]
    config: PathBuf,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Existing SPDX JSON document to embed (repeatable)
    #[arg(short, long = "external-sbom")]
    external_sbom: Vec<PathBuf>,

    /// Output file path (defaults to <input>.spdx.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Package list from `apk list --installed` or `dpkg-licenses -c`
    #[arg(short, long = "package")]
    package: Option<PathBuf>,

    /// Directory or tarball to scan (repeatable)
    #[arg(short, long = "file")]
    file: Vec<PathBuf>,

    /// Content scanner program
    #[arg(long, env = "MAKE_SBOM_SCANNER", default_value = DEFAULT_SCANNER)]
    scanner: String,
}

impl Cli {
    fn into_config(self) -> AssembleConfig {
        AssembleConfig {
            input: self.input,
            manifest: self.config,
            external_sboms: self.external_sbom,
            output: self.output,
            package_list: self.package,
            scan_targets: self.file,
            scanner: ScannerConfig {
                program: self.scanner,
            },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = cli.into_config();
    match cli::run_assemble(&config) {
        Ok(written) => {
            tracing::debug!("{} document(s) written", written.len());
            Ok(())
        }
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}
