mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    check, diff, from_html, init, normalize, to_html, CheckArgs, DiffArgs, FromHtmlArgs, InitArgs,
    NormalizeArgs, ToHtmlArgs,
};
use tracing_subscriber::EnvFilter;

/// pagetree - normalize, convert and inspect page builder content
#[derive(Parser, Debug)]
#[command(name = "pagetree")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a pagetree.config.json
    Init(InitArgs),

    /// Normalize stored pages into valid trees
    Normalize(NormalizeArgs),

    /// Flatten a page to legacy HTML
    ToHtml(ToHtmlArgs),

    /// Wrap legacy HTML in a page tree
    FromHtml(FromHtmlArgs),

    /// Report structural problems in stored pages
    Check(CheckArgs),

    /// Show the changes between two versions of a page
    Diff(DiffArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Init(args) => init(args, &cwd),
                Command::Normalize(args) => normalize(args, &cwd),
                Command::ToHtml(args) => to_html(args, &cwd),
                Command::FromHtml(args) => from_html(args, &cwd),
                Command::Check(args) => check(args, &cwd),
                Command::Diff(args) => diff(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
