use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Default demo to record in the config
    #[arg(short, long)]
    pub demo: Option<String>,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        eprintln!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        eprintln!("Use --force to overwrite");
        return Ok(());
    }

    let mut config = Config::default();
    if let Some(demo) = args.demo {
        demo.parse::<crate::demo::Demo>()?;
        config.demo = demo;
    }

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)
        .with_context(|| format!("Cannot write {}", config_path.display()))?;

    eprintln!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    eprintln!();
    eprintln!("Next steps:");
    eprintln!("  1. Run: twig render");
    eprintln!("  2. Run: twig click --demo counter --times 3");

    Ok(())
}
