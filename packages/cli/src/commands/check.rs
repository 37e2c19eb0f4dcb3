use crate::commands::{find_page_files, PageLoader};
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use pagetree_engine::{validate, ValidationLevel, ValidationWarning};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Page file or directory to check
    pub input: PathBuf,

    /// Show files without issues too
    #[arg(short, long)]
    pub verbose: bool,
}

/// Issues found in one file
#[derive(Debug, Default)]
pub struct FileReport {
    pub warnings: Vec<ValidationWarning>,
}

impl FileReport {
    pub fn errors(&self) -> usize {
        self.warnings.iter().filter(|w| w.is_error()).count()
    }
}

pub fn check(args: CheckArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let loader = PageLoader::from_config(&config);

    println!("🔍 {} page check", "Starting".green().bold());
    println!("   Input: {}", args.input.display());
    println!();

    let files = find_page_files(&args.input)?;
    let mut total_errors = 0;
    let mut total_warnings = 0;

    for file in &files {
        let report = check_file(file, &loader)?;
        let errors = report.errors();
        total_errors += errors;
        total_warnings += report.warnings.len() - errors;

        if report.warnings.is_empty() {
            if args.verbose {
                println!("{} {}", "✓".green(), file.display());
            }
            continue;
        }

        println!("{}", file.display().to_string().bright_white().bold());
        for warning in &report.warnings {
            let label = match warning.level {
                ValidationLevel::Error => "error".red().bold(),
                ValidationLevel::Warning => "warning".yellow().bold(),
            };
            match &warning.node_id {
                Some(id) => println!("  {}: {} ({})", label, warning.message, id.dimmed()),
                None => println!("  {}: {}", label, warning.message),
            }
        }
    }

    println!();
    println!("   Files checked: {}", files.len());
    if total_errors > 0 {
        println!("   {} {}", "Errors:".red(), total_errors);
    }
    if total_warnings > 0 {
        println!("   {} {}", "Warnings:".yellow(), total_warnings);
    }
    if total_errors == 0 && total_warnings == 0 {
        println!("   {} No issues found!", "✓".green());
    }

    if total_errors > 0 {
        return Err(anyhow!("{} errors found", total_errors));
    }
    Ok(())
}

/// Validate a stored page and report whether normalization would change it
pub fn check_file(file: &Path, loader: &PageLoader) -> Result<FileReport> {
    let raw = fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;

    let value: Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            return Ok(FileReport {
                warnings: vec![ValidationWarning::error(format!("Not valid JSON: {}", e))],
            })
        }
    };

    let mut warnings = Vec::new();
    if !value.is_object() {
        warnings.push(ValidationWarning::error("Page is not a JSON object"));
    }

    let doc = loader.normalizer().normalize(&value);
    if serde_json::to_value(&doc)? != value {
        warnings.push(ValidationWarning::warning(
            "Page is not normalized; invalid blocks or missing ids would be repaired on load",
        ));
    }
    warnings.extend(validate(&doc, loader.registry()));

    Ok(FileReport { warnings })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_for(contents: &str) -> FileReport {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.json");
        fs::write(&path, contents).unwrap();
        check_file(&path, &PageLoader::from_config(&Config::default())).unwrap()
    }

    #[test]
    fn test_normalized_page_is_clean() {
        let report = report_for(
            r#"{
                "content": [{ "type": "Text", "props": { "text": "Hi" }, "id": "t", "key": "k", "readOnly": false }],
                "root": { "props": { "title": "Home" }, "id": "root", "readOnly": false },
                "zones": {}
            }"#,
        );
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    }

    #[test]
    fn test_unnormalized_page_warns() {
        let report = report_for(r#"{ "content": [{ "type": "Bogus" }] }"#);
        assert_eq!(report.errors(), 0);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let report = report_for("<p>legacy</p>");
        assert_eq!(report.errors(), 1);
    }

    #[test]
    fn test_duplicate_ids_are_reported() {
        let report = report_for(
            r#"{
                "content": [
                    { "type": "Text", "props": {}, "id": "same", "key": "a", "readOnly": false },
                    { "type": "Text", "props": {}, "id": "same", "key": "b", "readOnly": false }
                ],
                "root": { "props": {}, "id": "root", "readOnly": false },
                "zones": {}
            }"#,
        );
        assert_eq!(report.errors(), 0);
        assert!(report.warnings.iter().any(|w| w.message.contains("Duplicate id")));
    }
}
