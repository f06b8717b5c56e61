//! Rendering of an index tree into output documents.
//!
//! Renderers are pure: they take an already built forest and never touch the
//! filesystem.

mod html;
mod json;
mod listing;
mod markdown;

use chrono::{DateTime, Local};
use clap::ValueEnum;

use crate::error::Result;
use crate::scanner::TreeNode;

pub use html::{render_html, TIMESTAMP_FORMAT};
pub use json::render_json;
pub use listing::escape_html;
pub use markdown::render_markdown;

/// Output document format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown page with an HTML-in-Markdown listing
    #[default]
    Markdown,
    /// Standalone styled HTML page
    Html,
    /// Machine-readable JSON tree
    Json,
}

impl OutputFormat {
    /// File written when no output path is given.
    pub fn default_file_name(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "FILES.md",
            OutputFormat::Html => "FILES.html",
            OutputFormat::Json => "FILES.json",
        }
    }
}

/// Document-level values shared by all renderers.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub title: String,
    pub base_url: String,
    /// Only embedded by the HTML renderer
    pub generated_at: DateTime<Local>,
}

impl RenderContext {
    pub fn new(title: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            base_url: base_url.into(),
            generated_at: Local::now(),
        }
    }

    pub fn with_generated_at(mut self, at: DateTime<Local>) -> Self {
        self.generated_at = at;
        self
    }
}

/// Render the forest in the requested format.
pub fn render(format: OutputFormat, forest: &[TreeNode], ctx: &RenderContext) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(render_markdown(forest, ctx)),
        OutputFormat::Html => Ok(render_html(forest, ctx)),
        OutputFormat::Json => render_json(forest, ctx),
    }
}
