//! paneflow - Entry Point
//!
//! Headless validation CLI: checks an exported layout snapshot against
//! the canonical rule set and prints the findings.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use paneflow::model::ComponentCatalog;
use paneflow::registry::LayoutSnapshot;
use paneflow::responsive::{resolve, Breakpoint};
use paneflow::validation::{Severity, ValidationEngine};

/// paneflow - validate exported layout snapshots
#[derive(Parser, Debug)]
#[command(name = "paneflow")]
#[command(version)]
#[command(about = "Validates exported layout snapshot files")]
pub struct Args {
    /// Path to an exported snapshot (.json)
    pub file: PathBuf,

    /// Also print component and override counts
    #[arg(long)]
    pub stats: bool,

    /// Also print the layout resolved for a breakpoint
    #[arg(long, value_parser = ["mobile", "tablet", "desktop"])]
    pub breakpoint: Option<String>,

    /// Override the transition duration setting (informational here)
    #[arg(long)]
    pub duration_ms: Option<u64>,

    /// Path to log file for tracing output
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = paneflow::config::load_config_with_precedence(args.config.clone())?;
        let merged = paneflow::config::merge_config(config_file);
        let with_env = paneflow::config::apply_env_overrides(merged);
        paneflow::config::apply_cli_overrides(with_env, args.duration_ms, args.log_file.clone())
    };
    config.validate()?;

    paneflow::logging::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    let json = std::fs::read_to_string(&args.file)?;
    let snapshot = LayoutSnapshot::from_json(&json)?;
    if !snapshot.version_supported() {
        eprintln!("warning: snapshot version {} may not import cleanly", snapshot.version);
    }

    let layout = &snapshot.layout;
    println!("{} \"{}\" ({})", layout.id, layout.name, layout.kind);

    if args.stats {
        println!("  components: {}", layout.components.len());
        for (breakpoint, set) in &layout.overrides {
            println!("  overrides[{breakpoint:?}]: {}", set.len());
        }
    }

    if let Some(raw) = &args.breakpoint {
        let breakpoint = match raw.as_str() {
            "mobile" => Breakpoint::Mobile,
            "tablet" => Breakpoint::Tablet,
            _ => Breakpoint::Desktop,
        };
        let resolved = resolve(layout, breakpoint);
        println!("  resolved for {breakpoint:?}:");
        for (key, placement) in &resolved.components {
            let r = placement.rect;
            println!(
                "    {key}: ({:.1}, {:.1}) {:.1}x{:.1}{}",
                r.x,
                r.y,
                r.w,
                r.h,
                if placement.visible { "" } else { " [hidden]" }
            );
        }
    }

    let engine = ValidationEngine::with_default_rules();
    let report = engine.validate(layout, &ComponentCatalog::default());
    if report.issues.is_empty() {
        println!("  no findings");
    }
    for issue in &report.issues {
        let tag = match issue.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        match &issue.component {
            Some(component) => {
                println!("  {tag} [{}] {component}: {}", issue.rule, issue.message)
            }
            None => println!("  {tag} [{}]: {}", issue.rule, issue.message),
        }
    }

    if report.has_errors {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["paneflow", "--help"]);
        // Help returns Err with DisplayHelp, which is success
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["paneflow", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_file_argument_is_required() {
        let result = Args::try_parse_from(["paneflow"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["paneflow", "layout.json"]);
        assert_eq!(args.file, PathBuf::from("layout.json"));
        assert!(!args.stats);
        assert_eq!(args.breakpoint, None);
        assert_eq!(args.duration_ms, None);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_breakpoint_values_are_restricted() {
        let ok = Args::try_parse_from(["paneflow", "layout.json", "--breakpoint", "mobile"]);
        assert!(ok.is_ok());
        let bad = Args::try_parse_from(["paneflow", "layout.json", "--breakpoint", "watch"]);
        assert!(bad.is_err());
    }

    #[test]
    fn test_flags_parse() {
        let args = Args::parse_from([
            "paneflow",
            "layout.json",
            "--stats",
            "--duration-ms",
            "150",
            "--config",
            "/tmp/conf.toml",
        ]);
        assert!(args.stats);
        assert_eq!(args.duration_ms, Some(150));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/conf.toml")));
    }
}
