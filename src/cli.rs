use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info};

use crate::config::Config;
use crate::data::manifest::{write_json, ExportManifest};
use crate::data::validate::{validate_tables, ValidationSeverity};
use crate::data::{load_tables, DataRegistry, Language};
use crate::extract::{extract_character, ExtractOptions, TracingObserver};
use crate::leveled::Progression;
use crate::parallel::extract_batch;

const USAGE: &str = "usage: trailblaze <list|extract|export|validate> [--data-dir DIR] [--lang L] [--level N] [--ascension N] [--eidolon N]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    Extract,
    Export,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("list") => Some(Command::List),
        Some("extract") => Some(Command::Extract),
        Some("export") => Some(Command::Export),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

/// Flags and positional arguments following the command name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOptions {
    pub positional: Vec<String>,
    pub data_dir: Option<PathBuf>,
    pub language: Option<Language>,
    pub progression: Progression,
}

pub fn parse_options(args: &[String]) -> Result<CommandOptions, String> {
    let mut options = CommandOptions::default();
    let mut rest = args.iter().skip(2);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--data-dir" => options.data_dir = Some(PathBuf::from(flag_value(arg, rest.next())?)),
            "--lang" => {
                let raw = flag_value(arg, rest.next())?;
                options.language = Some(raw.parse::<Language>().map_err(|err| err.to_string())?);
            }
            "--level" => options.progression.level = parse_number(arg, rest.next())?,
            "--ascension" => options.progression.ascension = parse_number(arg, rest.next())?,
            "--eidolon" => options.progression.eidolon = parse_number(arg, rest.next())?,
            "-v" | "--verbose" => {}
            flag if flag.starts_with("--") => return Err(format!("unknown flag '{flag}'")),
            _ => options.positional.push(arg.clone()),
        }
    }
    Ok(options)
}

fn flag_value<'a>(flag: &str, value: Option<&'a String>) -> Result<&'a str, String> {
    value
        .map(String::as_str)
        .ok_or_else(|| format!("missing value for {flag}"))
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
    let raw = flag_value(flag, value)?;
    raw.parse()
        .map_err(|_| format!("invalid {} '{raw}'", flag.trim_start_matches('-')))
}

pub fn run_with_args(args: &[String]) -> i32 {
    run_with_config(args, &Config::from_env())
}

pub fn run_with_config(args: &[String], config: &Config) -> i32 {
    let Some(command) = parse_command(args) else {
        eprintln!("{USAGE}");
        return 2;
    };
    let options = match parse_options(args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("{USAGE}");
            return 2;
        }
    };

    match command {
        Command::List => handle_list(config, &options),
        Command::Extract => handle_extract(config, &options),
        Command::Export => handle_export(config, &options),
        Command::Validate => handle_validate(config, &options),
    }
}

fn extract_options(config: &Config, options: &CommandOptions) -> ExtractOptions {
    ExtractOptions::new(options.language.unwrap_or(config.language))
        .with_fallback(config.fallback)
        .with_progression(options.progression)
}

fn data_dir<'a>(config: &'a Config, options: &'a CommandOptions) -> &'a Path {
    options.data_dir.as_deref().unwrap_or(config.data_dir.as_path())
}

fn load_registry(config: &Config, options: &CommandOptions) -> Option<Arc<DataRegistry>> {
    match DataRegistry::load(data_dir(config, options)) {
        Ok(registry) => Some(registry),
        Err(err) => {
            eprintln!("failed to load data: {err}");
            None
        }
    }
}

fn handle_list(config: &Config, options: &CommandOptions) -> i32 {
    let Some(registry) = load_registry(config, options) else {
        return 1;
    };
    let language = options.language.unwrap_or(config.language);
    for (id, name) in registry.character_names(language) {
        println!("{id}\t{name}");
    }
    0
}

fn handle_extract(config: &Config, options: &CommandOptions) -> i32 {
    let Some(query) = options.positional.first() else {
        eprintln!("usage: trailblaze extract <id|name> [--level N] [--ascension N] [--eidolon N] [--lang L]");
        return 2;
    };
    let Some(registry) = load_registry(config, options) else {
        return 1;
    };
    let extract = extract_options(config, options);
    let Some(id) = registry.find_character(query, extract.language) else {
        eprintln!("unknown character '{query}'");
        return 1;
    };

    let export = match extract_character(
        &registry.tables,
        &registry.texts,
        id,
        &extract,
        &TracingObserver,
    ) {
        Ok(export) => export,
        Err(err) => {
            eprintln!("extraction failed: {err}");
            return 1;
        }
    };

    match serde_json::to_string_pretty(&export) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize character {id}: {err}");
            1
        }
    }
}

fn handle_export(config: &Config, options: &CommandOptions) -> i32 {
    let Some(out_dir) = options.positional.first().map(PathBuf::from) else {
        eprintln!("usage: trailblaze export <output-dir> [--level N] [--ascension N] [--eidolon N] [--lang L]");
        return 2;
    };
    let Some(registry) = load_registry(config, options) else {
        return 1;
    };
    if let Err(err) = fs::create_dir_all(&out_dir) {
        eprintln!("failed to create '{}': {err}", out_dir.display());
        return 1;
    }

    let extract = extract_options(config, options);
    let ids = registry.tables.character_ids();
    let items = extract_batch(
        &registry,
        &ids,
        &extract,
        &TracingObserver,
        &config.worker_pool(),
    );

    let mut manifest = ExportManifest::new(
        extract.language,
        extract.progression,
        registry.data_version().map(str::to_string),
    );
    for item in items {
        match item.result {
            Ok(export) => {
                let file = format!("{}.json", item.id);
                match write_json(&out_dir.join(&file), &export) {
                    Ok(()) => manifest.record_success(item.id, file),
                    Err(err) => {
                        error!(character = item.id, error = %err, "failed to write export");
                        manifest.record_failure(item.id, err);
                    }
                }
            }
            Err(err) => {
                error!(character = item.id, error = %err, "extraction failed");
                manifest.record_failure(item.id, err);
            }
        }
    }

    if let Err(err) = manifest.write_to(&out_dir) {
        eprintln!("{err}");
        return 1;
    }
    info!(dir = %out_dir.display(), "export written");
    println!(
        "export complete: exported={}, failed={}, dir='{}'",
        manifest.succeeded(),
        manifest.failed(),
        out_dir.display()
    );
    if manifest.failed() == 0 {
        0
    } else {
        1
    }
}

fn handle_validate(config: &Config, options: &CommandOptions) -> i32 {
    let dir = options
        .positional
        .first()
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir(config, options).to_path_buf());

    let tables = match load_tables(&dir) {
        Ok(tables) => tables,
        Err(err) => {
            eprintln!("validation failed: {err}");
            return 1;
        }
    };

    let report = validate_tables(&tables);
    for diagnostic in report.sorted() {
        eprintln!("- {diagnostic}");
    }
    if report.has_errors() {
        eprintln!(
            "validation failed: {} error(s), {} warning(s)",
            report.count(ValidationSeverity::Error),
            report.count(ValidationSeverity::Warning)
        );
        1
    } else {
        println!(
            "validation passed: {} ({} warning(s))",
            dir.display(),
            report.count(ValidationSeverity::Warning)
        );
        0
    }
}
