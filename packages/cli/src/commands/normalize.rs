use crate::commands::{find_page_files, PageLoader, NORMALIZED_SUFFIX};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagetree_ast::Document;
use pagetree_compiler_html::{document_to_html, StorageFormat};
use pagetree_engine::rekey_document_with;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Page file or directory of page files
    pub path: PathBuf,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Give every node a fresh render key
    #[arg(long)]
    pub rekey: bool,

    /// Output format (overrides config)
    #[arg(short, long)]
    pub format: Option<StorageFormat>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,
}

pub fn normalize(args: NormalizeArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let loader = PageLoader::from_config(&config);
    let format = args.format.unwrap_or(config.storage);
    let out_dir = args
        .out_dir
        .as_ref()
        .or(config.out_dir.as_ref())
        .map(|dir| PathBuf::from(cwd).join(dir));

    let files = find_page_files(&args.path)?;
    if files.is_empty() {
        println!("{}", "⚠️  No page files found".yellow());
        return Ok(());
    }

    if !args.stdout {
        println!("{}", "🔧 Normalizing pages...".bright_blue().bold());
        println!("Found {} files", files.len());
    }

    let mut success_count = 0;
    let mut error_count = 0;

    for file in &files {
        match normalize_file(file, &loader, &args, format, out_dir.as_deref()) {
            Ok(output) => {
                success_count += 1;
                if !args.stdout {
                    println!("  {} {} → {}", "✓".green(), file.display(), output);
                }
            }
            Err(e) => {
                error_count += 1;
                eprintln!("  {} {} - {}", "✗".red(), file.display(), e.to_string().red());
            }
        }
    }

    if !args.stdout {
        println!();
        if error_count == 0 {
            println!("{} Normalized {} files successfully", "✅".green(), success_count);
        } else {
            println!(
                "{} Normalized {} files, {} errors",
                "⚠️".yellow(),
                success_count,
                error_count
            );
        }
    }

    Ok(())
}

fn normalize_file(
    file: &Path,
    loader: &PageLoader,
    args: &NormalizeArgs,
    format: StorageFormat,
    out_dir: Option<&Path>,
) -> Result<String> {
    let mut doc = loader.load(file)?;
    if args.rekey {
        doc = rekey_document_with(doc, loader.walk_options());
    }

    let output = render(&doc, format)?;

    if args.stdout {
        println!("{}", output);
        return Ok("stdout".to_string());
    }

    let output_file = output_path(file, out_dir, format);
    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_file, output)?;

    Ok(output_file.display().to_string())
}

/// Pretty JSON or flattened HTML
pub fn render(doc: &Document, format: StorageFormat) -> Result<String> {
    Ok(match format {
        StorageFormat::Json => serde_json::to_string_pretty(doc)?,
        StorageFormat::Html => document_to_html(doc),
    })
}

fn output_path(file: &Path, out_dir: Option<&Path>, format: StorageFormat) -> PathBuf {
    let stem = file.file_stem().and_then(|s| s.to_str()).unwrap_or("page");
    let name = format!("{}{}.{}", stem, NORMALIZED_SUFFIX, format);

    match out_dir {
        Some(dir) => dir.join(name),
        None => file.with_file_name(name),
    }
}
