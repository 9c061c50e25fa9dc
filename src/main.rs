//! compgen — generates `.hh` headers from `.comp` component schemas.
//!
//! Walks the input directory, mirrors it under the output directory and
//! regenerates every header whose schema changed since it was last built.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use compgen::codegen::{Generator, HandlebarsRenderer};
use compgen::config::{load_config, load_config_or_default, Config, CONFIG_FILE_NAME};
use compgen::driver::{BuildDriver, BuildOptions, BuildReport};
use compgen::Error;

/// Generates .hh files from .comp component schemas.
#[derive(Parser, Debug)]
#[command(name = "compgen", version)]
struct Args {
    /// The input directory where .comp files are
    #[arg(long, short = 'i')]
    indir: PathBuf,

    /// The output directory where .hh files will be
    #[arg(long, short = 'o')]
    outdir: PathBuf,

    /// Config file (default: <indir>/compgen.yaml, if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Handlebars template overriding the configured or built-in one
    #[arg(long)]
    template: Option<PathBuf>,

    /// Regenerate every header, even if up to date
    #[arg(long, short = 'f')]
    force: bool,

    /// Log every file, including skipped ones
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args);

    match run(&args) {
        Ok(report) => {
            tracing::info!(
                "{} generated, {} up to date",
                report.generated.len(),
                report.up_to_date.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(args: &Args) {
    let default = if args.verbose {
        "compgen=debug"
    } else if args.quiet {
        "compgen=warn"
    } else {
        "compgen=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> anyhow::Result<BuildReport> {
    if !args.indir.is_dir() {
        return Err(Error::InvalidInputDir(args.indir.clone()).into());
    }

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => load_config_or_default(&args.indir.join(CONFIG_FILE_NAME))?,
    };

    let renderer = build_renderer(args, &config)?;
    let options = BuildOptions {
        input_ext: config.input_ext,
        output_ext: config.output_ext,
        force: args.force,
    };

    let driver = BuildDriver::new(Generator::new(renderer), options);
    let report = driver
        .run(&args.indir, &args.outdir)
        .with_context(|| format!("failed to build {}", args.indir.display()))?;
    Ok(report)
}

fn build_renderer(args: &Args, config: &Config) -> anyhow::Result<HandlebarsRenderer> {
    let renderer = match args.template.as_ref().or(config.template.as_ref()) {
        Some(path) => {
            tracing::debug!(template = %path.display(), "using template");
            HandlebarsRenderer::from_file(path)?
        }
        None => HandlebarsRenderer::new()?,
    };
    Ok(renderer
        .namespace(config.namespace.clone())
        .includes(config.include.clone()))
}
