use crate::commands::render::serialize;
use crate::config::Config;
use crate::demo::Demo;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use tracing::debug;
use twig_host::{Event, MemoryDocument};

#[derive(Debug, Args)]
pub struct ClickArgs {
    /// Demo to render (defaults to counter)
    #[arg(short, long, default_value = "counter")]
    pub demo: String,

    /// Number of clicks to dispatch
    #[arg(short, long, default_value_t = 1)]
    pub times: usize,

    /// Id of the element to click; defaults to the demo's button
    #[arg(long)]
    pub target: Option<String>,

    /// Print everything on one line
    #[arg(long)]
    pub compact: bool,
}

pub fn click(args: ClickArgs, config: &Config) -> Result<()> {
    let demo: Demo = args.demo.parse()?;
    let target = args.target.as_deref().unwrap_or(demo.click_target());
    eprintln!(
        "{} {} {}× on #{}",
        "Clicking".bright_blue().bold(),
        demo,
        args.times,
        target
    );

    let output = click_demo(demo, target, args.times, args.compact, config)?;
    println!("{}", output.trim_end());
    eprintln!("{} {} event(s) dispatched", "✓".green(), args.times);
    Ok(())
}

/// Mount `demo`, dispatch `times` clicks on `#target` and serialize the result.
///
/// The target is looked up again before every click, since a rerender may
/// have replaced it.
pub fn click_demo(demo: Demo, target: &str, times: usize, compact: bool, config: &Config) -> Result<String> {
    let doc = MemoryDocument::new();
    let root = demo
        .build(&doc)
        .with_context(|| format!("Failed to build demo '{}'", demo))?;
    twig_renderer::render(&root, &doc.body())?;

    for round in 0..times {
        let node = doc
            .body()
            .find_by_id(target)
            .ok_or_else(|| anyhow!("No element with id '{}' in demo '{}'", target, demo))?;
        let listeners = doc.dispatch_event(&node, &Event::new("click"));
        debug!(round, listeners, "Dispatched click");
    }

    serialize(&doc, false, &config.html_options(compact))
}
