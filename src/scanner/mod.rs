mod entry;
mod options;
mod url;
mod walker;

pub use entry::{count_nodes, NodeKind, TreeNode, TreeStats};
pub use options::{
    ExclusionSet, GroupOrder, TreeOptions, DEFAULT_BASE_URL, DEFAULT_EXCLUDED_DIRS,
    DEFAULT_EXCLUDED_FILES, HIDDEN_MARKER,
};
pub use url::{file_url, url_path};
pub use walker::build_tree;
