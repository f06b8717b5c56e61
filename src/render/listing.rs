use crate::scanner::TreeNode;

const FILE_ICON: &str = "📄";
const DIR_ICON: &str = "📂";
const EMPTY_LABEL: &str = "(empty)";
const INDENT: &str = "  ";

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Write the forest as nested `<ul>` lists with `<details>` for non-empty
/// directories. Writes nothing for an empty forest.
pub fn write_listing(forest: &[TreeNode], output: &mut String, depth: usize) {
    if forest.is_empty() {
        return;
    }

    let pad = INDENT.repeat(depth);
    output.push_str(&format!("{}<ul>\n", pad));
    for node in forest {
        write_node(node, output, depth + 1);
    }
    output.push_str(&format!("{}</ul>\n", pad));
}

fn write_node(node: &TreeNode, output: &mut String, depth: usize) {
    let pad = INDENT.repeat(depth);
    let name = escape_html(&node.name);

    if !node.is_dir() {
        let url = escape_html(node.url.as_deref().unwrap_or_default());
        output.push_str(&format!(
            "{}<li>{} <a href=\"{}\">{}</a></li>\n",
            pad, FILE_ICON, url, name
        ));
        return;
    }

    if node.is_empty_dir() {
        output.push_str(&format!(
            "{}<li class=\"empty\">{} {} {}</li>\n",
            pad, DIR_ICON, name, EMPTY_LABEL
        ));
        return;
    }

    let inner = INDENT.repeat(depth + 1);
    output.push_str(&format!("{}<li>\n", pad));
    output.push_str(&format!("{}<details>\n", inner));
    output.push_str(&format!(
        "{}{}<summary><strong>{} {}</strong></summary>\n",
        inner, INDENT, DIR_ICON, name
    ));
    write_listing(&node.children, output, depth + 2);
    output.push_str(&format!("{}</details>\n", inner));
    output.push_str(&format!("{}</li>\n", pad));
}
