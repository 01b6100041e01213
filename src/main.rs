use camino::{Utf8Path, Utf8PathBuf};
use modferry::{
    export_manifest, sync_in_place, sync_update_bundle, SyncConfig, SyncError, SyncReport,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "json" => Some(OutputFormat::Json),
            "text" => Some(OutputFormat::Text),
            _ => None,
        }
    }
}

enum CliCommand {
    Sync {
        config: Utf8PathBuf,
        source: Utf8PathBuf,
        target: Utf8PathBuf,
    },
    Bundle {
        config: Utf8PathBuf,
        source: Utf8PathBuf,
        target: Utf8PathBuf,
    },
    Export {
        config: Utf8PathBuf,
        source: Utf8PathBuf,
    },
    Inspect {
        configs: Vec<Utf8PathBuf>,
    },
    Help,
    Version,
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (format, verbose, tokens) = parse_global_options(&args);
    init_logging(verbose);

    let command = match parse_command(&tokens) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    match run(command, format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: CliCommand, format: OutputFormat) -> Result<(), SyncError> {
    match command {
        CliCommand::Help => {
            print_help();
            Ok(())
        }
        CliCommand::Version => {
            println!("modferry v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        CliCommand::Sync {
            config,
            source,
            target,
        } => {
            let config = SyncConfig::load(&config)?;
            let source = canonical_root(&source)?;
            let report = sync_in_place(&config, &source, &target)?;
            render_report(&report, format)
        }
        CliCommand::Bundle {
            config,
            source,
            target,
        } => {
            let config = SyncConfig::load(&config)?;
            let source = canonical_root(&source)?;
            let report = sync_update_bundle(&config, &source, &target)?;
            render_report(&report, format)
        }
        CliCommand::Export { config, source } => {
            let config = SyncConfig::load(&config)?;
            let source = canonical_root(&source)?;
            let path = export_manifest(&config, &source)?;
            println!("manifest written to {path}");
            Ok(())
        }
        CliCommand::Inspect { configs } => inspect_configs(&configs),
    }
}

fn parse_global_options(args: &[String]) -> (OutputFormat, bool, Vec<String>) {
    let mut format = OutputFormat::Text;
    let mut verbose = false;
    let mut tokens = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if let Some(value) = arg.strip_prefix("--format=") {
            if let Some(parsed) = OutputFormat::parse(value) {
                format = parsed;
            }
            continue;
        }
        if arg == "--format" {
            if let Some(value) = iter.next() {
                if let Some(parsed) = OutputFormat::parse(value) {
                    format = parsed;
                }
            }
            continue;
        }
        if arg == "-v" || arg == "--verbose" {
            verbose = true;
            continue;
        }
        tokens.push(arg.to_string());
    }
    (format, verbose, tokens)
}

fn parse_command(tokens: &[String]) -> Result<CliCommand, String> {
    let Some(head) = tokens.first() else {
        return Ok(CliCommand::Help);
    };
    let rest = tokens.get(1..).unwrap_or(&[]);
    match head.as_str() {
        "sync" | "bundle" => {
            let roots = parse_roots(rest)?;
            let config = roots.config.ok_or(format!("{head} requires --config <file>"))?;
            let source = roots.source.ok_or(format!("{head} requires --source <dir>"))?;
            let target = roots.target.ok_or(format!("{head} requires --target <dir>"))?;
            if head == "sync" {
                Ok(CliCommand::Sync {
                    config,
                    source,
                    target,
                })
            } else {
                Ok(CliCommand::Bundle {
                    config,
                    source,
                    target,
                })
            }
        }
        "export" => {
            let roots = parse_roots(rest)?;
            let config = roots.config.ok_or("export requires --config <file>".to_string())?;
            let source = roots.source.ok_or("export requires --source <dir>".to_string())?;
            Ok(CliCommand::Export { config, source })
        }
        "inspect" => {
            let configs: Vec<Utf8PathBuf> = rest
                .iter()
                .filter(|token| !token.starts_with('-'))
                .map(Utf8PathBuf::from)
                .collect();
            if configs.is_empty() {
                Err("inspect requires at least one config file".to_string())
            } else {
                Ok(CliCommand::Inspect { configs })
            }
        }
        "help" | "--help" | "-h" => Ok(CliCommand::Help),
        "version" | "--version" | "-V" => Ok(CliCommand::Version),
        other => Err(format!(
            "Unknown command: {other} (use 'sync', 'bundle', 'export', or 'inspect')"
        )),
    }
}

#[derive(Default)]
struct RootOptions {
    config: Option<Utf8PathBuf>,
    source: Option<Utf8PathBuf>,
    target: Option<Utf8PathBuf>,
}

fn parse_roots(args: &[String]) -> Result<RootOptions, String> {
    let mut roots = RootOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => roots.config = Some(next_path(&mut iter, "--config")?),
            "--source" | "-s" => roots.source = Some(next_path(&mut iter, "--source")?),
            "--target" | "-t" => roots.target = Some(next_path(&mut iter, "--target")?),
            value if value.starts_with("--config=") => {
                roots.config = Some(Utf8PathBuf::from(value.trim_start_matches("--config=")));
            }
            value if value.starts_with("--source=") => {
                roots.source = Some(Utf8PathBuf::from(value.trim_start_matches("--source=")));
            }
            value if value.starts_with("--target=") => {
                roots.target = Some(Utf8PathBuf::from(value.trim_start_matches("--target=")));
            }
            other => return Err(format!("Unknown option: {other}")),
        }
    }
    Ok(roots)
}

fn next_path(iter: &mut std::slice::Iter<String>, flag: &str) -> Result<Utf8PathBuf, String> {
    iter.next()
        .map(Utf8PathBuf::from)
        .ok_or_else(|| format!("{flag} requires a path"))
}

fn init_logging(verbose: bool) {
    let default = if verbose { "modferry=debug" } else { "modferry=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Source paths often arrive relative or in Windows UNC form; index from a
/// plain absolute path instead.
fn canonical_root(path: &Utf8Path) -> Result<Utf8PathBuf, SyncError> {
    let canonical = dunce::canonicalize(path.as_std_path())
        .map_err(|e| SyncError::IOError(format!("{}: {}", path, e)))?;
    Utf8PathBuf::from_path_buf(canonical)
        .map_err(|p| SyncError::ParseError(format!("Invalid UTF-8 path: {:?}", p)))
}

fn render_report(report: &SyncReport, format: OutputFormat) -> Result<(), SyncError> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Text => {
            for outcome in report.outcomes.values() {
                println!(
                    "{:<20} {} ({})",
                    outcome.action.to_string(),
                    outcome.mod_id,
                    outcome.reason
                );
            }
            println!(
                "{} mods: {} new, {} updated, {} skipped",
                report.total_mods, report.new_mods, report.updated_mods, report.skipped_mods
            );
            if let Some(path) = &report.manifest_path {
                println!("manifest: {path}");
            }
            if let Some(dir) = &report.bundle_dir {
                println!("bundle: {dir}");
            }
        }
    }
    Ok(())
}

fn inspect_configs(paths: &[Utf8PathBuf]) -> Result<(), SyncError> {
    for path in paths {
        // One unreadable file must not take the rest of the batch down.
        let config = match SyncConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("skipping {path}: {err}");
                continue;
            }
        };
        println!("{}: {} mods", path, config.mod_count());
        for mod_id in config.mod_ids() {
            if mod_id.is_empty() {
                println!("  - (missing modId)");
            } else {
                println!("  - {mod_id}");
            }
        }
    }
    Ok(())
}

fn print_help() {
    println!("modferry v{}", env!("CARGO_PKG_VERSION"));
    println!("Usage:");
    println!("  modferry sync --config <file> --source <dir> --target <dir>");
    println!("                                  Sync mods in place into the target root");
    println!("  modferry bundle --config <file> --source <dir> --target <dir>");
    println!("                                  Collect new/changed mods into an update bundle");
    println!("  modferry export --config <file> --source <dir>");
    println!("                                  Write the mod manifest into the source root");
    println!("  modferry inspect <file>...      List the mods each config file requests");
    println!();
    println!("Global options:");
    println!("  --format <json|text>            Report format for sync and bundle");
    println!("  -v, --verbose                   Debug-level logging");
    println!("  -h, --help                      Show help");
    println!("  -V, --version                   Show version");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inspect_skips_malformed_configs_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap();
        let bad = root.join("bad.json");
        let good = root.join("good.json");
        std::fs::write(&bad, "{not json").unwrap();
        std::fs::write(&good, r#"{"game": {"mods": [{"modId": "mod1"}]}}"#).unwrap();

        assert!(inspect_configs(&[bad, good]).is_ok());
    }
}
