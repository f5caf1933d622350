use crate::config::Config;
use crate::demo::Demo;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tracing::info;
use twig_host::{inner_html, MemoryDocument, NodeSnapshot};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Demo to render (showcase, counter); defaults to the config's demo
    #[arg(short, long)]
    pub demo: Option<String>,

    /// Print everything on one line
    #[arg(long)]
    pub compact: bool,

    /// Print a JSON snapshot of the mounted tree instead of HTML
    #[arg(long)]
    pub json: bool,
}

pub fn render(args: RenderArgs, config: &Config) -> Result<()> {
    let demo: Demo = args.demo.as_deref().unwrap_or(&config.demo).parse()?;
    eprintln!("{} {}", "Rendering".bright_blue().bold(), demo);

    let output = render_demo(demo, &args, config)?;
    println!("{}", output.trim_end());
    Ok(())
}

/// Mount `demo` into a fresh document and serialize the body's contents.
pub fn render_demo(demo: Demo, args: &RenderArgs, config: &Config) -> Result<String> {
    let doc = MemoryDocument::new();
    let body = doc.body();
    let root = demo
        .build(&doc)
        .with_context(|| format!("Failed to build demo '{}'", demo))?;
    twig_renderer::render(&root, &body).with_context(|| format!("Failed to mount demo '{}'", demo))?;
    info!(demo = %demo, nodes = body.children().len(), "Mounted demo");

    serialize(&doc, args.json, &config.html_options(args.compact))
}

/// Body contents as HTML, or the whole body as a JSON snapshot.
pub fn serialize(doc: &MemoryDocument, json: bool, options: &twig_host::HtmlOptions) -> Result<String> {
    if json {
        let snapshot = NodeSnapshot::capture(&doc.body());
        return Ok(serde_json::to_string_pretty(&snapshot)?);
    }
    Ok(inner_html(&doc.body(), options))
}
