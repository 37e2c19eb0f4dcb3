use crate::commands::PageLoader;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use pagetree_compiler_html::{document_to_html, html_to_document};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ToHtmlArgs {
    /// Stored page (tree JSON or legacy HTML)
    pub input: PathBuf,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct FromHtmlArgs {
    /// Legacy HTML or text file
    pub input: PathBuf,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn to_html(args: ToHtmlArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let doc = PageLoader::from_config(&config).load(&args.input)?;

    emit(&document_to_html(&doc), args.output.as_deref())
}

pub fn from_html(args: FromHtmlArgs, _cwd: &str) -> Result<()> {
    let html = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let doc = html_to_document(&html);

    emit(&serde_json::to_string_pretty(&doc)?, args.output.as_deref())
}

fn emit(output: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, output)?;
        }
        None => println!("{}", output),
    }
    Ok(())
}
