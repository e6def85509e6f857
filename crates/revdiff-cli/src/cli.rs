use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use revdiff_compare::Layout;
use revdiff_diff::Algorithm;

#[derive(Parser)]
#[command(
    name = "revdiff",
    about = "Line-by-line comparison of two revisions",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LayoutArg {
    Split,
    Unified,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Split => Layout::Split,
            LayoutArg::Unified => Layout::Unified,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two text files line by line
    Text(TextArgs),
    /// Compare two revision documents field by field
    Revisions(RevisionsArgs),
}

#[derive(Args)]
pub struct TextArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    /// Settings file; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Unchanged lines shown before each change
    #[arg(long)]
    pub leading: Option<usize>,
    /// Unchanged lines shown after each change
    #[arg(long)]
    pub trailing: Option<usize>,
    /// Show a "line N" header before each hunk
    #[arg(long)]
    pub header: bool,
    /// Highlight changed words inside changed lines
    #[arg(long)]
    pub word_level: bool,
    #[arg(long)]
    pub layout: Option<LayoutArg>,
    #[arg(long)]
    pub algorithm: Option<Algorithm>,
}

#[derive(Args)]
pub struct RevisionsArgs {
    /// JSON document of the older revision
    pub old: PathBuf,
    /// JSON document of the newer revision
    pub new: PathBuf,
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub layout: Option<LayoutArg>,
}
