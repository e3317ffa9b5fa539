//! CLI commands.

use std::io::BufRead;

use clap::{Args, Subcommand};
use embedport::{EmbedOptions, EmbedRequest, EmbedResponse};
use tracing::{debug, warn};

use crate::config::{load_config, mask_api_key, Context};
use crate::Cli;

/// Number of leading vector components shown in text output.
const PREVIEW_LEN: usize = 4;

/// Gets the context configuration to use.
fn get_context(cli: &Cli) -> anyhow::Result<Context> {
    let cfg = load_config(cli.config.as_deref())?;
    match (cfg.resolve_context(cli.context.as_deref()), cli.context.as_deref()) {
        (Some(ctx), _) => Ok(ctx.clone()),
        (None, Some(name)) => anyhow::bail!("context '{}' not found", name),
        (None, None) => anyhow::bail!(
            "no context specified. Use -c flag or set a default context with 'embed config use'"
        ),
    }
}

/// Embed texts given as arguments, or one per line from stdin.
#[derive(Args)]
pub struct TextCommand {
    /// Texts to embed. Reads stdin line by line when omitted; blank stdin
    /// lines are skipped and reported on stderr.
    pub texts: Vec<String>,

    /// Override the context's model for this call
    #[arg(long)]
    pub model: Option<String>,

    /// Override the output dimensionality for this call
    #[arg(long)]
    pub dimensions: Option<usize>,
}

impl TextCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let texts = if self.texts.is_empty() {
            let (lines, skipped) = read_lines(std::io::stdin().lock())?;
            if skipped > 0 {
                warn!(skipped, "skipped blank input lines");
                eprintln!("skipped {skipped} blank line(s) from stdin");
            }
            lines
        } else {
            self.texts.clone()
        };

        let mut opts = EmbedOptions::none();
        if let Some(model) = &self.model {
            opts = opts.with_model(model);
        }
        if let Some(dim) = self.dimensions {
            opts = opts.with_dimensions(dim);
        }
        let request = EmbedRequest::new(texts, opts);

        let model = get_context(cli)?.build()?;
        debug!(inputs = request.len(), "embedding");
        let resp = model.call(request).await?;

        if cli.json {
            println!("{}", serde_json::to_string_pretty(&resp)?);
        } else {
            print!("{}", format_response(&resp));
        }
        Ok(())
    }
}

/// Probe the dimensionality of the context's provider.
#[derive(Args)]
pub struct DimsCommand {}

impl DimsCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let model = get_context(cli)?.build()?;
        let dim = model.dimensions().await?;
        if cli.json {
            println!("{}", serde_json::json!({ "dimensions": dim }));
        } else {
            println!("{dim}");
        }
        Ok(())
    }
}

/// Manage CLI configuration.
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// List all contexts
    List,
    /// Show a context (default: current)
    Show {
        /// Context name
        name: Option<String>,
    },
    /// Set the current context
    Use {
        /// Context name
        name: String,
    },
}

impl ConfigCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let mut cfg = load_config(cli.config.as_deref())?;
        match &self.command {
            ConfigSubcommand::List => {
                for name in cfg.list_contexts() {
                    let marker = if name == cfg.current_context { "*" } else { " " };
                    println!("{marker} {name}");
                }
            }
            ConfigSubcommand::Show { name } => {
                let name = name.as_deref().or(cli.context.as_deref());
                let mut ctx = cfg
                    .resolve_context(name)
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("context not found"))?;
                if !ctx.api_key.starts_with('$') {
                    ctx.api_key = mask_api_key(&ctx.api_key);
                }
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&ctx)?);
                } else {
                    print!("{}", serde_yaml::to_string(&ctx)?);
                }
            }
            ConfigSubcommand::Use { name } => {
                cfg.use_context(name)?;
                eprintln!("switched to context '{}' ({})", name, cfg.path().display());
            }
        }
        Ok(())
    }
}

/// Reads non-blank lines, returning them with the number of blank lines skipped.
fn read_lines(reader: impl BufRead) -> anyhow::Result<(Vec<String>, usize)> {
    let mut lines = Vec::new();
    let mut skipped = 0;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            skipped += 1;
        } else {
            lines.push(line);
        }
    }
    Ok((lines, skipped))
}

/// One line per result: index, dimensionality and the leading components.
fn format_response(resp: &EmbedResponse) -> String {
    let mut out = String::new();
    for r in resp.results() {
        let head: Vec<String> = r
            .embedding
            .iter()
            .take(PREVIEW_LEN)
            .map(|v| format!("{v:.4}"))
            .collect();
        let more = if r.embedding.len() > PREVIEW_LEN { ", ..." } else { "" };
        out.push_str(&format!(
            "{}\t{}\t[{}{}]\n",
            r.index,
            r.embedding.len(),
            head.join(", "),
            more
        ));
    }
    out
}
