mod commands;
mod config;
mod demo;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{click, init, render, ClickArgs, InitArgs, RenderArgs};
use config::Config;
use tracing_subscriber::EnvFilter;

/// Twig CLI - render and poke at component trees in an in-memory document
#[derive(Parser, Debug)]
#[command(name = "twig")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a twig.config.json with default settings
    Init(InitArgs),

    /// Render a demo tree and print it
    Render(RenderArgs),

    /// Render a demo, dispatch click events and print the result
    Click(ClickArgs),
}

fn run(cli: Cli, cwd: &str) -> anyhow::Result<()> {
    // `init` must work even when the existing config is unreadable.
    let config = match cli.command {
        Command::Init(_) => Config::default(),
        _ => Config::load(cwd)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Init(args) => init(args, cwd),
        Command::Render(args) => render(args, &config),
        Command::Click(args) => click(args, &config),
    }
}

fn main() {
    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| run(cli, &cwd.display().to_string()));

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
