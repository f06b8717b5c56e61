use serde::Serialize;

use crate::error::Result;
use crate::scanner::TreeNode;

use super::RenderContext;

#[derive(Serialize)]
struct JsonIndex<'a> {
    title: &'a str,
    base_url: &'a str,
    tree: &'a [TreeNode],
}

/// Render the forest as pretty-printed JSON.
pub fn render_json(forest: &[TreeNode], ctx: &RenderContext) -> Result<String> {
    let index = JsonIndex {
        title: &ctx.title,
        base_url: &ctx.base_url,
        tree: forest,
    };
    let mut output = serde_json::to_string_pretty(&index)?;
    output.push('\n');
    Ok(output)
}
