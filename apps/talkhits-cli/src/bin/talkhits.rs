use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::io;
use std::path::PathBuf;

use talkhits_cli::{drive, JsonHitSource, JsonRenderer, TextRenderer};
use talkhits_core::config::{expand_path, Config, OutputFormat};
use talkhits_core::traits::HitRenderer;
use talkhits_core::types::EmptyGroupPolicy;
use talkhits_group::GroupingOptions;

#[derive(Parser, Debug)]
#[command(
    name = "talkhits",
    version,
    about = "Group transcript segment hits of a search response into talks"
)]
struct Cli {
    /// Saved search response (array of hits, a response object, or a list of
    /// responses). Reads stdin when omitted or "-".
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Output format (overrides render.format)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Do not merge continuations whose sequence number does not increase
    #[arg(long)]
    strict: bool,

    /// How to show talks that matched on no segment (overrides grouping.empty_group_policy)
    #[arg(long, value_enum)]
    empty_groups: Option<EmptyGroupsArg>,

    /// Stop after this many pages
    #[arg(long)]
    pages: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Json,
    Text,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EmptyGroupsArg {
    Plain,
    Grouped,
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "talkhits=debug" } else { "talkhits=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt().with_env_filter(filter).with_target(false).with_writer(io::stderr).init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load().context("loading configuration")?;
    let mut settings = config.settings()?;
    if let Some(format) = cli.format {
        settings.render.format = match format {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Text => OutputFormat::Text,
        };
    }
    if let Some(policy) = cli.empty_groups {
        settings.grouping.empty_group_policy = match policy {
            EmptyGroupsArg::Plain => EmptyGroupPolicy::Plain,
            EmptyGroupsArg::Grouped => EmptyGroupPolicy::Grouped,
        };
    }
    settings.grouping.strict_ordering |= cli.strict;
    tracing::debug!(?settings, "effective settings");

    let mut source = match cli.input.as_deref() {
        None | Some("-") => JsonHitSource::from_reader(io::stdin().lock()).context("reading hits from stdin")?,
        Some(path) => {
            let path: PathBuf = expand_path(path);
            JsonHitSource::from_path(&path).with_context(|| format!("reading hits from {}", path.display()))?
        }
    };

    let options = GroupingOptions::from(&settings.grouping);
    let stdout = io::stdout();
    let mut renderer: Box<dyn HitRenderer> = match settings.render.format {
        OutputFormat::Json => Box::new(JsonRenderer::new(stdout.lock())),
        OutputFormat::Text => Box::new(TextRenderer::new(
            stdout.lock(),
            settings.grouping.empty_group_policy,
            settings.render.snippet_width,
        )),
    };

    let rendered = drive(&mut source, renderer.as_mut(), options, cli.pages)?;
    tracing::info!(pages = rendered, "done");
    Ok(())
}
