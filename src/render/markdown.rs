use crate::scanner::TreeNode;

use super::listing::write_listing;
use super::RenderContext;

/// Render the forest as a Markdown document with an HTML-in-Markdown listing.
pub fn render_markdown(forest: &[TreeNode], ctx: &RenderContext) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", ctx.title));
    output.push_str(&format!("> Base URL: [{0}]({0})\n\n", ctx.base_url));
    output.push_str("---\n\n");

    if forest.is_empty() {
        output.push_str("*No files to index.*\n");
    } else {
        write_listing(forest, &mut output, 0);
    }

    output
}
