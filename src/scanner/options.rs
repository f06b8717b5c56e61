use std::collections::BTreeSet;
use std::path::PathBuf;

/// Names starting with this character are treated as hidden and never indexed.
pub const HIDDEN_MARKER: char = '.';

/// Directory names skipped by default.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    ".git",
    ".github",
    ".vscode",
    "node_modules",
    "__pycache__",
    ".idea",
    "venv",
    "dist",
    "build",
];

/// File names skipped by default.
pub const DEFAULT_EXCLUDED_FILES: &[&str] = &[
    "generate_tree_index.py",
    "FILES.md",
    "README.md",
    ".DS_Store",
    "CNAME",
    ".gitignore",
    "package-lock.json",
];

/// Order in which the two sibling groups of a directory are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupOrder {
    #[default]
    FilesFirst,
    DirsFirst,
}

/// Names excluded from the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    dirs: BTreeSet<String>,
    files: BTreeSet<String>,
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::new(
            DEFAULT_EXCLUDED_DIRS.iter().copied(),
            DEFAULT_EXCLUDED_FILES.iter().copied(),
        )
    }
}

impl ExclusionSet {
    pub fn new<D, F>(dirs: D, files: F) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    /// An exclusion set that only hides dot-entries.
    pub fn empty() -> Self {
        Self::new(Vec::<String>::new(), Vec::<String>::new())
    }

    pub fn with_dir(mut self, name: impl Into<String>) -> Self {
        self.dirs.insert(name.into());
        self
    }

    pub fn with_file(mut self, name: impl Into<String>) -> Self {
        self.files.insert(name.into());
        self
    }

    /// Whether an entry with this name is skipped.
    ///
    /// Both sets apply regardless of the entry's type, so a file named like
    /// an excluded directory is skipped too.
    pub fn is_excluded(&self, name: &str) -> bool {
        name.starts_with(HIDDEN_MARKER) || self.files.contains(name) || self.dirs.contains(name)
    }

    pub fn dirs(&self) -> impl Iterator<Item = &str> {
        self.dirs.iter().map(String::as_str)
    }

    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }
}

/// Options for building the index tree.
#[derive(Debug, Clone)]
pub struct TreeOptions {
    /// Prefix for every file link, expected to end with '/'
    pub base_url: String,

    pub exclusions: ExclusionSet,

    /// Point `.md` links at the rendered `.html` page
    pub rewrite_markdown: bool,

    pub group_order: GroupOrder,

    /// Follow symbolic links
    pub follow_symlinks: bool,

    /// Canonical path of one file to leave out, such as the index being written
    pub skip_file: Option<PathBuf>,
}

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://s-r-afraid.github.io/Frontend/";

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            exclusions: ExclusionSet::default(),
            rewrite_markdown: false,
            group_order: GroupOrder::default(),
            follow_symlinks: false,
            skip_file: None,
        }
    }
}

impl TreeOptions {
    /// Create a new TreeOptions with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn with_rewrite_markdown(mut self, enabled: bool) -> Self {
        self.rewrite_markdown = enabled;
        self
    }

    pub fn with_group_order(mut self, order: GroupOrder) -> Self {
        self.group_order = order;
        self
    }

    /// Set whether to follow symbolic links
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn with_skip_file(mut self, path: Option<PathBuf>) -> Self {
        self.skip_file = path;
        self
    }
}
