//! Generate command implementation

use std::fs;

use humansize::{format_size, BINARY};

use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::error::{IndexError, Result};
use crate::render::{render, RenderContext};
use crate::scanner::{build_tree, count_nodes, TreeStats};

/// A rendered index document and what it contains
#[derive(Debug, Clone)]
pub struct GeneratedIndex {
    pub document: String,
    pub stats: TreeStats,
}

/// Build and render the index described by `config`. Does not write anything.
pub fn generate(config: &Config, ctx: &RenderContext) -> Result<GeneratedIndex> {
    let forest = build_tree(&config.root, &config.tree_options())?;
    let stats = count_nodes(&forest);

    tracing::debug!(files = stats.files, dirs = stats.dirs, "Built index tree");

    let document = render(config.format, &forest, ctx)?;
    Ok(GeneratedIndex { document, stats })
}

/// Run the generate command
pub fn run(args: GenerateArgs, quiet: bool) -> Result<()> {
    let config = Config::from_args(&args)?;
    tracing::debug!(?config, "Resolved configuration");

    let options = config.tree_options();
    tracing::debug!(
        dirs = ?options.exclusions.dirs().collect::<Vec<_>>(),
        files = ?options.exclusions.files().collect::<Vec<_>>(),
        skip_file = ?options.skip_file,
        "Resolved exclusions"
    );

    // Keep stdout clean when it carries the document
    let chatty = !quiet && !config.to_stdout;

    if chatty {
        println!(
            "Scanning {} and generating index...",
            config.root.display()
        );
    }

    let ctx = RenderContext::new(config.title.clone(), config.base_url.clone());
    let index = generate(&config, &ctx)?;

    if config.to_stdout {
        print!("{}", index.document);
        return Ok(());
    }

    fs::write(&config.output, &index.document)
        .map_err(|e| IndexError::io(&config.output, e))?;

    tracing::info!(output = %config.output.display(), "Wrote index");

    if chatty {
        println!(
            "Done! Generated {} ({}, {} files, {} directories)",
            config.output.display(),
            format_size(index.document.len(), BINARY),
            index.stats.files,
            index.stats.dirs
        );
    }

    Ok(())
}
