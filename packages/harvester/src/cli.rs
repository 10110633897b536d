//! Command-line interface for the harvester.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::validate_celex;
use crate::error::{HarvesterError, Result};
use crate::formex::convert_str;
use crate::harvester::{download_document, download_document_with};
use crate::http::create_client;
use crate::lint::{lint_markdown, Severity};
use crate::manifest::Manifest;
use crate::writer::save_markdown;

/// EUR-Lex Harvester - Download EU legislation and convert to Markdown.
#[derive(Parser)]
#[command(name = "eurlex-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a local Formex XML file to Markdown.
    Convert {
        /// Path to the Formex XML file
        input: PathBuf,

        /// Output file (default: input with .md extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Download an act by CELEX number and convert to Markdown.
    Download {
        /// CELEX number (e.g., 32024R1183)
        celex: String,

        /// Output directory (default: documents/)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Download and convert every document in a manifest.
    Batch {
        /// Manifest file
        #[arg(short, long, default_value = "documents.yaml")]
        manifest: PathBuf,

        /// Output directory (default: documents/)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Lint converted Markdown files.
    Lint {
        /// Markdown files to check
        paths: Vec<PathBuf>,
    },
}

/// Run the CLI.
///
/// # Errors
/// Returns the first error encountered by the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert { input, output } => convert_command(&input, output.as_deref()),
        Commands::Download { celex, output } => download_command(&celex, output.as_deref()),
        Commands::Batch { manifest, output } => batch_command(&manifest, output.as_deref()),
        Commands::Lint { paths } => lint_command(&paths),
    }
}

/// Execute the convert command.
fn convert_command(input: &Path, output: Option<&Path>) -> Result<()> {
    let xml = fs::read_to_string(input)?;
    let markdown = convert_str(&xml)?;

    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension("md"));
    fs::write(&output_path, &markdown)?;

    println!(
        "{} {} -> {} ({} bytes)",
        style("Converted").green().bold(),
        input.display(),
        output_path.display(),
        markdown.len()
    );

    Ok(())
}

/// Execute the download command.
fn download_command(celex: &str, output: Option<&Path>) -> Result<()> {
    validate_celex(celex)?;
    let out_dir = output.unwrap_or_else(|| Path::new("documents"));

    println!(
        "{} {} to {}",
        style("Downloading").bold(),
        style(celex).cyan(),
        style(out_dir.display()).green()
    );
    println!();

    let pb = spinner();
    pb.set_message("Resolving Formex edition...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let xml = match download_document(celex) {
        Ok(xml) => xml,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Converting to Markdown...");
    let markdown = convert_str(&xml)?;

    pb.set_message("Saving...");
    let path = match save_markdown(&markdown, celex, out_dir) {
        Ok(path) => path,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        path.display()
    );

    Ok(())
}

/// Execute the batch command.
fn batch_command(manifest_path: &Path, output: Option<&Path>) -> Result<()> {
    let manifest = Manifest::load(manifest_path)?;
    let out_root = output.unwrap_or_else(|| Path::new("documents"));
    let client = create_client()?;

    println!(
        "{} {} document(s) from {}",
        style("Processing").bold(),
        manifest.documents.len(),
        manifest_path.display()
    );
    println!();

    let mut failures = 0usize;
    for entry in &manifest.documents {
        let out_dir = entry
            .output_dir
            .as_ref()
            .map_or_else(|| out_root.to_path_buf(), |sub| out_root.join(sub));

        print!("  {} {} ... ", style(&entry.celex).cyan(), entry.name);
        let result = validate_celex(&entry.celex)
            .and_then(|()| entry.cellar_url())
            .and_then(|cellar| download_document_with(&client, &entry.celex, Some(&cellar)))
            .and_then(|xml| convert_str(&xml))
            .and_then(|md| save_markdown(&md, &entry.celex, &out_dir));
        match result {
            Ok(path) => println!("{} {}", style("ok").green(), path.display()),
            Err(e) => {
                failures += 1;
                println!("{} {e}", style("failed").red().bold());
            }
        }
    }

    println!();
    if failures > 0 {
        println!(
            "{} {failures} document(s) failed",
            style("Warning:").yellow().bold()
        );
    } else {
        println!("{}", style("All documents processed").green().bold());
    }

    Ok(())
}

/// Execute the lint command.
fn lint_command(paths: &[PathBuf]) -> Result<()> {
    let mut total_errors = 0usize;
    let mut total_issues = 0usize;

    for path in paths {
        let content = fs::read_to_string(path)?;
        let report = lint_markdown(&content);

        if report.is_clean() {
            println!("{} {}: no issues", style("ok").green(), path.display());
            continue;
        }

        println!(
            "{} {}: {} error(s), {} warning(s), {} info",
            style("!!").yellow().bold(),
            path.display(),
            report.errors(),
            report.warnings(),
            report.infos()
        );
        for issue in &report.issues {
            let tag = match issue.severity {
                Severity::Error => style("error").red().bold(),
                Severity::Warning => style("warning").yellow(),
                Severity::Info => style("info").dim(),
            };
            println!(
                "    {tag} line {}: [{}] {}",
                issue.line, issue.rule, issue.message
            );
            println!("        -> {}", issue.excerpt);
        }

        total_errors += report.errors();
        total_issues += report.issues.len();
    }

    println!();
    println!(
        "Total: {} file(s) checked, {total_issues} issue(s) found",
        paths.len()
    );

    if total_errors > 0 {
        return Err(HarvesterError::LintErrors(total_errors));
    }
    Ok(())
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_download() {
        let cli = Cli::parse_from(["eurlex-harvester", "download", "32024R1183"]);

        let Commands::Download { celex, output } = cli.command else {
            panic!("expected download command");
        };
        assert_eq!(celex, "32024R1183");
        assert!(output.is_none());
    }

    #[test]
    fn test_cli_parse_download_with_output() {
        let cli = Cli::parse_from([
            "eurlex-harvester",
            "download",
            "32024R1183",
            "--output",
            "out",
        ]);

        let Commands::Download { celex, output } = cli.command else {
            panic!("expected download command");
        };
        assert_eq!(celex, "32024R1183");
        assert_eq!(output, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_cli_parse_convert() {
        let cli = Cli::parse_from(["eurlex-harvester", "convert", "act.xml"]);

        let Commands::Convert { input, output } = cli.command else {
            panic!("expected convert command");
        };
        assert_eq!(input, PathBuf::from("act.xml"));
        assert!(output.is_none());
    }

    #[test]
    fn test_cli_parse_batch_defaults() {
        let cli = Cli::parse_from(["eurlex-harvester", "batch"]);

        let Commands::Batch { manifest, .. } = cli.command else {
            panic!("expected batch command");
        };
        assert_eq!(manifest, PathBuf::from("documents.yaml"));
    }

    #[test]
    fn test_cli_parse_lint() {
        let cli = Cli::parse_from(["eurlex-harvester", "lint", "a.md", "b.md"]);

        let Commands::Lint { paths } = cli.command else {
            panic!("expected lint command");
        };
        assert_eq!(paths.len(), 2);
    }
}
