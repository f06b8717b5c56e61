use std::path::{Component, Path};

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Unreserved characters plus '/': A-Z a-z 0-9 - . _ ~ /
const PATH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

const MARKDOWN_SUFFIX: &str = ".md";
const RENDERED_SUFFIX: &str = ".html";

/// Join a relative path with forward slashes, dropping `.` components.
pub fn url_path(rel_path: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    for component in rel_path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::ParentDir => parts.push("..".to_string()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    parts.join("/")
}

/// Build the absolute link for a file at `rel_path` under the index root.
///
/// The base URL is used verbatim as a prefix; it is expected to end with '/'.
/// With `rewrite_markdown`, a trailing `.md` becomes `.html` in the link only.
pub fn file_url(base_url: &str, rel_path: &Path, rewrite_markdown: bool) -> String {
    let mut path = url_path(rel_path);

    if rewrite_markdown {
        if let Some(stem) = path.strip_suffix(MARKDOWN_SUFFIX) {
            path = format!("{}{}", stem, RENDERED_SUFFIX);
        }
    }

    let encoded = utf8_percent_encode(&path, PATH_ENCODE_SET);
    format!("{}{}", base_url, encoded)
}
