mod logger;

use anyhow::{Context, Result};
use card_sheet::{CancelToken, PageSpec, SheetConfig, TemplateRef};
use card_sheet_pdf::{BatchAssets, GenerateOptions};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "cardsheet", about = "Loyalty card print sheets", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out cards from a CSV file and write a PDF
    Generate {
        /// Input CSV file (columns: id, code, payload)
        #[arg(short, long)]
        items: PathBuf,

        /// Background template image shared by every card
        #[arg(short, long)]
        template: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Render pages on all cores
        #[arg(long)]
        parallel: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show page statistics without generating anything
    Stats {
        /// Input CSV file to count items from
        #[arg(short, long, conflicts_with = "count")]
        items: Option<PathBuf>,

        /// Number of items
        #[arg(short, long, required_unless_present = "items")]
        count: Option<usize>,

        #[command(flatten)]
        layout: LayoutArgs,
    },
}

#[derive(Args)]
struct LayoutArgs {
    /// Sheet configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output paper size
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Output orientation
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,

    /// Rows per page
    #[arg(long)]
    rows: Option<usize>,

    /// Columns per page
    #[arg(long)]
    cols: Option<usize>,

    /// Write the effective configuration to this file
    #[arg(long)]
    save_config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

impl From<PaperArg> for card_sheet::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<OrientationArg> for card_sheet::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl LayoutArgs {
    /// Config file (or defaults) with command line overrides applied
    async fn resolve(&self) -> Result<SheetConfig> {
        let mut config = match &self.config {
            Some(path) => card_sheet_pdf::load_config(path)
                .await
                .with_context(|| format!("loading {}", path.display()))?,
            None => SheetConfig::default(),
        };

        match (self.paper, self.orientation) {
            (Some(paper), orientation) => {
                let orientation = orientation.unwrap_or(OrientationArg::Portrait);
                config.page = PageSpec::from_paper(paper.into(), orientation.into());
            }
            (None, Some(orientation)) => {
                config.page = oriented(config.page, orientation);
            }
            (None, None) => {}
        }
        if let Some(rows) = self.rows {
            config.grid.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.grid.cols = cols;
        }
        config.validate()?;

        if let Some(path) = &self.save_config {
            card_sheet_pdf::save_config(&config, path).await?;
            log::info!("Saved configuration to {}", path.display());
        }
        Ok(config)
    }
}

/// Swap page sides when they do not match `orientation`
fn oriented(page: PageSpec, orientation: OrientationArg) -> PageSpec {
    let (width, height) = page.size_pt();
    let landscape = width > height;
    match (orientation, landscape) {
        (OrientationArg::Portrait, true) | (OrientationArg::Landscape, false) => PageSpec {
            width: page.height,
            height: page.width,
        },
        _ => page,
    }
}

/// Cancel `token` on Ctrl-C
fn cancel_on_interrupt(token: CancelToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, stopping after the current page");
            token.cancel();
        }
    });
}

async fn count_items(path: &Path) -> Result<usize> {
    let items = card_sheet_pdf::load_items_csv(path, &TemplateRef::new("count")).await?;
    Ok(items.len())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::StderrLogger::from_verbosity(cli.verbose).init()?;

    match cli.command {
        Commands::Generate {
            items,
            template,
            output,
            parallel,
            layout,
        } => {
            let config = layout.resolve().await?;

            let mut assets = BatchAssets::new();
            let background = assets
                .load_template(&template)
                .await
                .with_context(|| format!("loading template {}", template.display()))?;
            let cards = card_sheet_pdf::load_items_csv(&items, &background)
                .await
                .with_context(|| format!("loading items {}", items.display()))?;

            let cancel = CancelToken::new();
            cancel_on_interrupt(cancel.clone());
            let options = GenerateOptions {
                parallel,
                cancel: Some(cancel),
                ..Default::default()
            };

            let pages =
                card_sheet_pdf::generate_pdf(&cards, &config, Arc::new(assets), &options, &output)
                    .await?;
            println!(
                "Generated {} cards on {} pages → {}",
                cards.len(),
                pages,
                output.display()
            );
        }

        Commands::Stats {
            items,
            count,
            layout,
        } => {
            let config = layout.resolve().await?;
            let count = match (items, count) {
                (Some(path), _) => count_items(&path).await?,
                (None, Some(count)) => count,
                (None, None) => 0,
            };

            let stats = card_sheet::calculate_statistics(count, config.grid.rows, config.grid.cols);
            println!("Sheet Statistics:");
            println!("  Items: {}", stats.items);
            println!("  Cards per page: {}", stats.slots_per_page);
            println!("  Pages: {}", stats.pages);
            println!("  Cards on last page: {}", stats.last_page_slots);
            println!("  Empty slots: {}", stats.empty_slots);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_sheet::{Orientation, PaperSize};

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "cardsheet",
            "-vv",
            "generate",
            "--items",
            "cards.csv",
            "--template",
            "front.png",
            "--output",
            "out.pdf",
            "--paper",
            "letter",
            "--rows",
            "4",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Generate { layout, parallel, .. } => {
                assert!(!parallel);
                assert_eq!(layout.rows, Some(4));
                assert!(matches!(layout.paper, Some(PaperArg::Letter)));
            }
            Commands::Stats { .. } => panic!("Expected generate"),
        }
    }

    #[test]
    fn test_stats_needs_items_or_count() {
        assert!(Cli::try_parse_from(["cardsheet", "stats"]).is_err());
        assert!(Cli::try_parse_from(["cardsheet", "stats", "--count", "23"]).is_ok());
    }

    #[test]
    fn test_orientation_override_swaps_page() {
        let portrait = PageSpec::from_paper(PaperSize::A4, Orientation::Portrait);
        let landscape = oriented(portrait, OrientationArg::Landscape);
        assert_eq!(landscape.width, portrait.height);
        assert_eq!(oriented(landscape, OrientationArg::Landscape), landscape);
    }
}
