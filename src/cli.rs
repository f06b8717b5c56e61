use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::render::OutputFormat;

/// Tree Index - Generate a linked index of a directory tree
#[derive(Parser, Debug)]
#[command(name = "tree-index")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Defaults to `generate` with default options
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a Markdown, HTML or JSON index of a directory tree
    Generate(GenerateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Root directory to index
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Output file (default depends on format)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Prefix for every file link, should end with '/'
    #[arg(short, long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Document title
    #[arg(short, long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Link `.md` files to their rendered `.html` page (always on for html output)
    #[arg(long)]
    pub render_md: bool,

    /// List folders before files within each directory
    #[arg(long)]
    pub dirs_first: bool,

    /// Follow symbolic links
    #[arg(short = 'L', long)]
    pub follow_symlinks: bool,

    /// Additional directory names to exclude
    #[arg(long, value_name = "NAME")]
    pub exclude_dir: Vec<String>,

    /// Additional file names to exclude
    #[arg(long, value_name = "NAME")]
    pub exclude_file: Vec<String>,

    /// Print the document to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            format: OutputFormat::default(),
            output: None,
            base_url: None,
            title: None,
            render_md: false,
            dirs_first: false,
            follow_symlinks: false,
            exclude_dir: vec![],
            exclude_file: vec![],
            stdout: false,
        }
    }
}
