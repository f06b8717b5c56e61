use serde::Serialize;

/// Whether a node is a file leaf or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

/// A retained file or directory in the index tree.
/// This is the core data structure handed from the walker to the renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    /// Entry name (last component of path)
    pub name: String,

    pub kind: NodeKind,

    /// Child entries, already filtered and ordered (empty for files)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,

    /// Absolute link target, only set for files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl TreeNode {
    pub fn file(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            children: Vec::new(),
            url: Some(url.into()),
        }
    }

    pub fn dir(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory,
            children,
            url: None,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    /// A directory with nothing left to show after filtering.
    /// Renderers draw these as plain leaves, never as collapsible containers.
    pub fn is_empty_dir(&self) -> bool {
        self.is_dir() && self.children.is_empty()
    }
}

/// File and directory totals for a forest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub files: usize,
    pub dirs: usize,
}

/// Count every node in the forest, recursively.
pub fn count_nodes(forest: &[TreeNode]) -> TreeStats {
    let mut stats = TreeStats::default();
    for node in forest {
        if node.is_dir() {
            stats.dirs += 1;
            let nested = count_nodes(&node.children);
            stats.files += nested.files;
            stats.dirs += nested.dirs;
        } else {
            stats.files += 1;
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_node_has_url() {
        let node = TreeNode::file("a.txt", "https://example.com/a.txt");
        assert!(!node.is_dir());
        assert!(!node.is_empty_dir());
        assert_eq!(node.url.as_deref(), Some("https://example.com/a.txt"));
    }

    #[test]
    fn test_empty_dir() {
        let node = TreeNode::dir("empty", vec![]);
        assert!(node.is_dir());
        assert!(node.is_empty_dir());
        assert!(node.url.is_none());
    }

    #[test]
    fn test_count_nodes() {
        let forest = vec![
            TreeNode::file("a.txt", "u/a.txt"),
            TreeNode::dir(
                "sub",
                vec![
                    TreeNode::file("b.txt", "u/sub/b.txt"),
                    TreeNode::dir("deeper", vec![]),
                ],
            ),
        ];

        let stats = count_nodes(&forest);
        assert_eq!(stats.files, 2);
        assert_eq!(stats.dirs, 2);
    }

    #[test]
    fn test_serializes_kind_lowercase() {
        let node = TreeNode::dir("docs", vec![TreeNode::file("x.md", "u/docs/x.md")]);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["kind"], "directory");
        assert_eq!(json["children"][0]["kind"], "file");
        assert!(json.get("url").is_none());
    }
}
