use crate::commands::PageLoader;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagetree_engine::{diff_documents, TreePatch};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Page before the edit
    pub old: PathBuf,

    /// Page after the edit
    pub new: PathBuf,

    /// Print patches as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn diff(args: DiffArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let loader = PageLoader::from_config(&config);

    let old = loader.load(&args.old)?;
    let new = loader.load(&args.new)?;
    let patches = diff_documents(&old, &new);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&patches)?);
        return Ok(());
    }

    if patches.is_empty() {
        println!("{} No changes", "✓".green());
        return Ok(());
    }

    for patch in &patches {
        println!("{}", describe(patch));
    }
    println!();
    println!("{} changes", patches.len());

    Ok(())
}

/// One-line summary of a patch
pub fn describe(patch: &TreePatch) -> String {
    match patch {
        TreePatch::Insert { path, index, node } => {
            format!("{} {} {} at {}[{}]", "+".green(), node.kind, node.id, path, index)
        }
        TreePatch::Remove { path, id } => format!("{} {} from {}", "-".red(), id, path),
        TreePatch::Move { path, id, from, to } => {
            format!("{} {} in {}: {} → {}", "↕".cyan(), id, path, from, to)
        }
        TreePatch::Replace { path, id, node } => {
            format!("{} {} in {} is now {}", "~".yellow(), id, path, node.kind)
        }
        TreePatch::UpdateProps { path, id, props } => {
            let names: Vec<&str> = props.keys().map(String::as_str).collect();
            format!("{} {} in {}: props {}", "~".yellow(), id, path, names.join(", "))
        }
        TreePatch::UpdateReadOnly { path, id, read_only } => {
            format!("{} {} in {}: readOnly = {}", "~".yellow(), id, path, read_only)
        }
        TreePatch::UpdateRoot { .. } => format!("{} root props", "~".yellow()),
        TreePatch::AddZone { name, nodes } => {
            format!("{} zone {} ({} blocks)", "+".green(), name, nodes.len())
        }
        TreePatch::RemoveZone { name } => format!("{} zone {}", "-".red(), name),
    }
}
