use std::fs;
use std::path::PathBuf;

use crate::cli::GenerateArgs;
use crate::error::ConfigError;
use crate::render::OutputFormat;
use crate::scanner::{
    ExclusionSet, GroupOrder, TreeOptions, DEFAULT_BASE_URL, DEFAULT_EXCLUDED_DIRS,
    DEFAULT_EXCLUDED_FILES,
};

pub const DEFAULT_TITLE: &str = "Project File Index";

/// Settings for one index run
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory to index
    pub root: PathBuf,
    pub format: OutputFormat,
    /// File the document is written to
    pub output: PathBuf,
    /// Print the document instead of writing `output`
    pub to_stdout: bool,
    pub title: String,
    /// Prefix for every file link
    pub base_url: String,
    /// Rewrite `.md` links to `.html`
    pub rewrite_markdown: bool,
    pub group_order: GroupOrder,
    pub follow_symlinks: bool,
    pub excluded_dirs: Vec<String>,
    pub excluded_files: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let format = OutputFormat::default();
        Self {
            root: PathBuf::from("."),
            format,
            output: PathBuf::from(format.default_file_name()),
            to_stdout: false,
            title: DEFAULT_TITLE.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            rewrite_markdown: false,
            group_order: GroupOrder::default(),
            follow_symlinks: false,
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            excluded_files: DEFAULT_EXCLUDED_FILES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Layer command-line overrides onto the defaults.
    pub fn from_args(args: &GenerateArgs) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let output = args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(args.format.default_file_name()));

        let mut excluded_dirs = defaults.excluded_dirs;
        excluded_dirs.extend(args.exclude_dir.iter().cloned());

        let mut excluded_files = defaults.excluded_files;
        excluded_files.extend(args.exclude_file.iter().cloned());

        let config = Self {
            root: args.path.clone(),
            format: args.format,
            output,
            to_stdout: args.stdout,
            title: args.title.clone().unwrap_or(defaults.title),
            base_url: args.base_url.clone().unwrap_or(defaults.base_url),
            rewrite_markdown: args.render_md || args.format == OutputFormat::Html,
            group_order: if args.dirs_first {
                GroupOrder::DirsFirst
            } else {
                GroupOrder::FilesFirst
            },
            follow_symlinks: args.follow_symlinks,
            excluded_dirs,
            excluded_files,
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot produce a usable index.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base URL must not be empty".into()));
        }

        if !self.to_stdout && self.output.file_name().is_none() {
            return Err(ConfigError::Invalid(format!(
                "output path '{}' does not name a file",
                self.output.display()
            )));
        }

        if !self.base_url.ends_with('/') {
            tracing::warn!(
                base_url = %self.base_url,
                "Base URL does not end with '/', links are joined without a separator"
            );
        }

        Ok(())
    }

    /// Canonical path of a previous output file, so reruns never index it.
    /// `None` when printing to stdout or when the file does not exist yet.
    pub fn output_to_skip(&self) -> Option<PathBuf> {
        if self.to_stdout {
            return None;
        }
        fs::canonicalize(&self.output).ok()
    }

    /// Options for the tree walk derived from this config.
    pub fn tree_options(&self) -> TreeOptions {
        let exclusions = self
            .excluded_dirs
            .iter()
            .fold(ExclusionSet::empty(), |set, name| set.with_dir(name.as_str()));
        let exclusions = self
            .excluded_files
            .iter()
            .fold(exclusions, |set, name| set.with_file(name.as_str()));

        TreeOptions::new()
            .with_base_url(self.base_url.clone())
            .with_exclusions(exclusions)
            .with_rewrite_markdown(self.rewrite_markdown)
            .with_group_order(self.group_order)
            .with_follow_symlinks(self.follow_symlinks)
            .with_skip_file(self.output_to_skip())
    }
}
