/*
cargo run --bin build-tokenlist

cargo run --bin build-tokenlist -- \
    --root . \
    --strictness lenient \
    --log-file logs/build-tokenlist.log
*/

use std::fs::{create_dir_all, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, LevelFilter};
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

use tokenlist::{BuildConfig, Strictness};

// Build tokenlist.json from every chain JSON file under tokens/.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    // Project root; the default paths below are resolved against it
    #[arg(long, default_value = ".")]
    root: PathBuf,

    // Directory of token files (default: <root>/tokens)
    #[arg(long)]
    tokens_dir: Option<PathBuf>,

    // Chain registry (default: <root>/chains.json)
    #[arg(long)]
    chains: Option<PathBuf>,

    // Package metadata with version and tokenListName (default: <root>/package.json)
    #[arg(long)]
    package: Option<PathBuf>,

    // Output file, overwritten (default: <root>/tokenlist.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    // List name, overrides tokenListName
    #[arg(long)]
    name: Option<String>,

    // fail-fast | collect-all | lenient
    #[arg(long, default_value_t = Strictness::CollectAll)]
    strictness: Strictness,

    // Level for stderr diagnostics
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    // Also write the log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn build_config(&self) -> BuildConfig {
        let mut config = BuildConfig::from_root(&self.root);
        if let Some(p) = &self.tokens_dir {
            config.tokens_dir = p.clone();
        }
        if let Some(p) = &self.chains {
            config.chains_path = p.clone();
        }
        if let Some(p) = &self.package {
            config.package_path = p.clone();
        }
        if let Some(p) = &self.output {
            config.output_path = p.clone();
        }
        config.strictness = self.strictness;
        config.name_override = self.name.clone();
        config
    }
}

fn init_logging(args: &Args) -> Result<()> {
    let log_config = ConfigBuilder::new().build();
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        args.log_level,
        log_config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(path) = &args.log_file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_dir_all(parent)
                .with_context(|| format!("creating log dir {}", parent.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        loggers.push(WriteLogger::new(LevelFilter::Debug, log_config, file));
    }

    CombinedLogger::init(loggers).context("initializing logger")?;
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    init_logging(args)?;

    let config = args.build_config();
    let report = tokenlist::run(&config).context("building token list")?;

    println!(
        "Wrote {} with {} tokens across {} chain(s).",
        config.output_path.display(),
        report.token_count,
        report.token_list.chains.len()
    );
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        if log::max_level() >= LevelFilter::Error {
            error!("{e:#}");
        } else {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(1);
    }
}
