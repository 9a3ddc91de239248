pub mod aggregate;
pub mod config;
pub mod dedup;
pub mod diagnostics;
pub mod emit;
pub mod error;
pub mod registry;
pub mod resolver;
pub mod scanner;
pub mod types;
pub mod validate;

use log::info;
use time::OffsetDateTime;

use error::Error;

// Re-exports for convenience
pub use aggregate::Aggregator;
pub use config::{BuildConfig, PackageMeta};
pub use diagnostics::Diagnostic;
pub use registry::ChainRegistry;
pub use scanner::Strictness;
pub use types::chain::{ChainGroup, NativeCurrency};
pub use types::token::Token;
pub use types::token_list::{TokenList, Version};

/// Outcome of a successful build.
#[derive(Debug)]
pub struct BuildReport {
    pub token_list: TokenList,
    pub token_count: usize,
    /// Recoverable problems, in the order they were found.
    pub diagnostics: Vec<Diagnostic>,
}

/// Build the token list stamped with the current time. Nothing is written.
pub fn build(config: &BuildConfig) -> Result<BuildReport, Error> {
    build_at(config, OffsetDateTime::now_utc())
}

/// Build the token list with an explicit generation time.
///
/// Fatal conditions (missing tokens directory, unreadable package metadata,
/// malformed token files under a strict mode, zero valid tokens) abort
/// before anything is produced.
pub fn build_at(config: &BuildConfig, generated_at: OffsetDateTime) -> Result<BuildReport, Error> {
    if !config.tokens_dir.is_dir() {
        return Err(Error::TokensDirMissing(config.tokens_dir.clone()));
    }
    let package = PackageMeta::load(&config.package_path)?;

    let mut diagnostics = Vec::new();
    let (registry, registry_diagnostic) = ChainRegistry::load(&config.chains_path);
    diagnostics.extend(registry_diagnostic);

    let scan = scanner::scan(&config.tokens_dir, config.strictness)?;
    info!("scanned {} token file(s)", scan.files.len());
    diagnostics.extend(scan.diagnostics);

    let mut aggregator = Aggregator::new();
    for file in &scan.files {
        aggregator.add_file(file);
    }
    if aggregator.token_count() == 0 {
        return Err(Error::NoTokens);
    }

    let aggregation = aggregator.finish(&registry);
    diagnostics.extend(aggregation.diagnostics);

    let name = config
        .name_override
        .as_deref()
        .unwrap_or_else(|| package.list_name());
    let token_list = aggregate::assemble(
        name,
        Version::parse(package.version()),
        generated_at,
        aggregation.chains,
    )?;

    Ok(BuildReport {
        token_list,
        token_count: aggregation.token_count,
        diagnostics,
    })
}

/// Build the token list and write it to `config.output_path`.
pub fn run(config: &BuildConfig) -> Result<BuildReport, Error> {
    let report = build(config)?;
    emit::write_token_list(&config.output_path, &report.token_list)?;
    Ok(report)
}
