use crate::scanner::TreeNode;

use super::listing::{escape_html, write_listing};
use super::RenderContext;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const STYLE: &str = r#"    <style>
      :root { color-scheme: light dark; }
      body {
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
        max-width: 960px;
        margin: 2rem auto;
        padding: 0 1rem;
        line-height: 1.6;
      }
      header { border-bottom: 1px solid #8884; margin-bottom: 1.5rem; }
      .meta { color: #888; font-size: 0.9rem; }
      ul { list-style: none; padding-left: 1.25rem; margin: 0; }
      li { margin: 0.15rem 0; }
      a { color: #2f81f7; text-decoration: none; }
      a:hover { text-decoration: underline; }
      summary { cursor: pointer; }
      li.empty { color: #888; }
    </style>
"#;

/// Render the forest as a standalone HTML page.
pub fn render_html(forest: &[TreeNode], ctx: &RenderContext) -> String {
    let title = escape_html(&ctx.title);
    let base_url = escape_html(&ctx.base_url);
    let generated = ctx.generated_at.format(TIMESTAMP_FORMAT);

    let mut output = String::new();
    output.push_str("<!DOCTYPE html>\n");
    output.push_str("<html lang=\"en\">\n");
    output.push_str("  <head>\n");
    output.push_str("    <meta charset=\"utf-8\">\n");
    output.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
    );
    output.push_str(&format!("    <title>{}</title>\n", title));
    output.push_str(STYLE);
    output.push_str("  </head>\n");
    output.push_str("  <body>\n");
    output.push_str("    <header>\n");
    output.push_str(&format!("      <h1>{}</h1>\n", title));
    output.push_str(&format!(
        "      <p class=\"meta\">Base URL: <a href=\"{0}\">{0}</a></p>\n",
        base_url
    ));
    output.push_str(&format!(
        "      <p class=\"meta\">Generated at {}</p>\n",
        generated
    ));
    output.push_str("    </header>\n");
    output.push_str("    <main>\n");

    if forest.is_empty() {
        output.push_str("      <p class=\"meta\">No files to index.</p>\n");
    } else {
        write_listing(forest, &mut output, 3);
    }

    output.push_str("    </main>\n");
    output.push_str("  </body>\n");
    output.push_str("</html>\n");

    output
}
