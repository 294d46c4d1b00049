use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, info_span};

use roster_ingest::{discover_datasets, load_discovered};
use roster_model::Rule;
use roster_rules::{FileStore, RepositoryError, RuleCandidate, RuleRepository};
use roster_validate::validate_all;

use roster_cli::settings::{OutputFormat, Settings};
use roster_cli::summary::{issue_table, rules_table, schema_table, validation_summary_table};

use crate::cli::{OutputFormatArg, RulesCommand, ValidateArgs};

/// Validate a dataset folder. Returns true when error findings exist.
pub fn run_validate(args: &ValidateArgs, settings: &Settings) -> Result<bool> {
    let span = info_span!("validate", dir = %args.dir.display());
    let _guard = span.enter();

    let discovered = discover_datasets(&args.dir)
        .with_context(|| format!("discover datasets in {}", args.dir.display()))?;
    for (kind, path) in discovered.iter() {
        debug!(dataset = %kind, path = %path.display(), "Found dataset file");
    }
    let datasets = load_discovered(&discovered).context("load datasets")?;
    let results = validate_all(&datasets);

    let format = match args.format {
        Some(OutputFormatArg::Table) => OutputFormat::Table,
        Some(OutputFormatArg::Json) => OutputFormat::Json,
        None => settings.output.format,
    };

    match format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&results).context("serialize validation results")?;
            println!("{json}");
        }
        OutputFormat::Table => {
            let width = settings.output.table_width;
            let missing = datasets.missing();
            if !missing.is_empty() {
                let names: Vec<&str> = missing.iter().map(|kind| kind.label()).collect();
                println!(
                    "Validation skipped: no rows for {}. All three datasets are needed.",
                    names.join(", ")
                );
            }
            println!("{}", validation_summary_table(&datasets, &results, width));
            if let Some(table) = issue_table(&results, width) {
                println!();
                println!("Issues:");
                println!("{table}");
            }
        }
    }

    info!(
        errors = results.total_errors(),
        warnings = results.total_warnings(),
        "Validation finished"
    );
    Ok(results.has_errors())
}

pub fn run_schema(settings: &Settings) -> Result<()> {
    println!("{}", schema_table(settings.output.table_width));
    Ok(())
}

pub fn run_rules(command: &RulesCommand, rules_dir: &Path, settings: &Settings) -> Result<()> {
    let mut repo = RuleRepository::open(FileStore::new(rules_dir))
        .with_context(|| format!("open rule store in {}", rules_dir.display()))?;

    match command {
        RulesCommand::List => {
            if repo.is_empty() {
                println!("No rules stored.");
            } else {
                println!("{}", rules_table(repo.rules(), settings.output.table_width));
            }
        }
        RulesCommand::Add { json } => {
            let rule = parse_rule(json)?;
            repo.accept_candidate(RuleCandidate::manual(rule))
                .map_err(rejection)?;
            println!("Added rule {}.", repo.len() - 1);
        }
        RulesCommand::Update { index, json } => {
            let rule = parse_rule(json)?;
            repo.update(*index, rule).map_err(rejection)?;
            println!("Updated rule {index}.");
        }
        RulesCommand::Delete { index } => {
            let removed = repo.delete(*index).map_err(rejection)?;
            println!("Deleted rule {index} ({}).", removed.kind());
        }
        RulesCommand::Clear => {
            let removed = repo.clear().map_err(rejection)?;
            println!("Removed {removed} rule(s).");
        }
        RulesCommand::Import { file } => {
            let text = fs::read_to_string(file)
                .with_context(|| format!("read {}", file.display()))?;
            let imported = repo.import_json(&text).map_err(rejection)?;
            println!("Imported {imported} rule(s); {} stored.", repo.len());
        }
        RulesCommand::Export { output } => {
            let json = repo
                .export_rules()
                .to_json_pretty()
                .context("serialize rule export")?;
            match output {
                Some(path) => {
                    fs::write(path, format!("{json}\n"))
                        .with_context(|| format!("write {}", path.display()))?;
                    println!("Exported {} rule(s) to {}.", repo.len(), path.display());
                }
                None => println!("{json}"),
            }
        }
    }
    Ok(())
}

/// Rule store directory from the command line, the settings, or the platform default.
pub fn resolve_rules_dir(flag: Option<&PathBuf>, settings: &Settings) -> Result<PathBuf> {
    let dir = flag
        .cloned()
        .or_else(|| settings.rules_dir())
        .ok_or_else(|| anyhow!("could not determine a rule store directory; pass --rules-dir"))?;
    debug!(dir = %dir.display(), "Using rule store");
    Ok(dir)
}

fn parse_rule(json: &str) -> Result<Rule> {
    serde_json::from_str(json).context("parse rule JSON")
}

/// List per-rule violations under a rejected import.
fn rejection(error: RepositoryError) -> anyhow::Error {
    if !matches!(error, RepositoryError::ImportRejected { .. }) {
        return anyhow::Error::new(error);
    }
    let details = error
        .violations()
        .iter()
        .map(|message| format!("  - {message}"))
        .collect::<Vec<_>>()
        .join("\n");
    anyhow!("{error}\n{details}")
}
