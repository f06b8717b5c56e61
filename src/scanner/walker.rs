use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{IndexError, Result};

use super::entry::TreeNode;
use super::options::{GroupOrder, TreeOptions};
use super::url::file_url;

/// A retained directory entry waiting to be turned into a node.
struct Listed {
    name: String,
    path: PathBuf,
}

/// Walk `root` and return its filtered, ordered forest.
///
/// The root itself is never filtered. An empty result means there is
/// nothing to index.
pub fn build_tree(root: &Path, options: &TreeOptions) -> Result<Vec<TreeNode>> {
    let metadata = fs::metadata(root).map_err(|e| match e.kind() {
        ErrorKind::NotFound => IndexError::PathNotFound(root.to_path_buf()),
        _ => IndexError::io(root, e),
    })?;

    if !metadata.is_dir() {
        return Err(IndexError::NotADirectory(root.to_path_buf()));
    }

    // Canonical paths of the directories on the current branch, used to
    // stop symlink cycles when links are followed.
    let mut ancestors = Vec::new();
    if options.follow_symlinks {
        ancestors.push(fs::canonicalize(root).map_err(|e| IndexError::io(root, e))?);
    }

    walk_dir(root, Path::new(""), options, &mut ancestors)
}

fn walk_dir(
    dir: &Path,
    rel: &Path,
    options: &TreeOptions,
    ancestors: &mut Vec<PathBuf>,
) -> Result<Vec<TreeNode>> {
    tracing::debug!(path = %dir.display(), "Listing directory");

    let read_dir = match recover_listing(dir, fs::read_dir(dir))? {
        Some(rd) => rd,
        None => return Ok(Vec::new()),
    };

    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in read_dir {
        let entry = entry.map_err(|e| IndexError::io(dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();

        if options.exclusions.is_excluded(&name) {
            tracing::trace!(name = %name, "Excluded");
            continue;
        }

        let path = entry.path();
        if is_skipped_file(&path, options) {
            tracing::debug!(path = %path.display(), "Skipping output file");
            continue;
        }

        let file_type = entry.file_type().map_err(|e| IndexError::io(&path, e))?;
        let is_dir = if file_type.is_symlink() {
            // Dangling links fall through as files.
            options.follow_symlinks && fs::metadata(&path).map(|m| m.is_dir()).unwrap_or(false)
        } else {
            file_type.is_dir()
        };

        if is_dir {
            dirs.push(Listed { name, path });
        } else {
            files.push(Listed { name, path });
        }
    }

    dirs.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));

    let file_nodes = files.into_iter().map(|file| {
        let url = file_url(&options.base_url, &rel.join(&file.name), options.rewrite_markdown);
        TreeNode::file(file.name, url)
    });

    let mut dir_nodes = Vec::with_capacity(dirs.len());
    for sub in dirs {
        let children = descend(&sub, rel, options, ancestors)?;
        dir_nodes.push(TreeNode::dir(sub.name, children));
    }

    let nodes: Vec<TreeNode> = match options.group_order {
        GroupOrder::FilesFirst => file_nodes.chain(dir_nodes).collect(),
        GroupOrder::DirsFirst => dir_nodes.into_iter().chain(file_nodes).collect(),
    };

    Ok(nodes)
}

/// Permission denied while listing reads as an empty directory; any other
/// error aborts the walk.
fn recover_listing<T>(dir: &Path, listing: std::io::Result<T>) -> Result<Option<T>> {
    match listing {
        Ok(rd) => Ok(Some(rd)),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            tracing::warn!(path = %dir.display(), "Permission denied, treating as empty");
            Ok(None)
        }
        Err(e) => Err(IndexError::io(dir, e)),
    }
}

/// Whether `path` is the exact file named by `TreeOptions::skip_file`.
fn is_skipped_file(path: &Path, options: &TreeOptions) -> bool {
    let Some(skip) = options.skip_file.as_deref() else {
        return false;
    };
    // Only canonicalize on a name match
    if path.file_name() != skip.file_name() {
        return false;
    }
    fs::canonicalize(path).map(|p| p == skip).unwrap_or(false)
}

fn descend(
    sub: &Listed,
    rel: &Path,
    options: &TreeOptions,
    ancestors: &mut Vec<PathBuf>,
) -> Result<Vec<TreeNode>> {
    let sub_rel = rel.join(&sub.name);

    if !options.follow_symlinks {
        return walk_dir(&sub.path, &sub_rel, options, ancestors);
    }

    let canonical = fs::canonicalize(&sub.path).map_err(|e| IndexError::io(&sub.path, e))?;
    if ancestors.contains(&canonical) {
        tracing::warn!(path = %sub.path.display(), "Symlink cycle, not descending");
        return Ok(Vec::new());
    }

    ancestors.push(canonical);
    let children = walk_dir(&sub.path, &sub_rel, options, ancestors);
    ancestors.pop();
    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::entry::count_nodes;
    use crate::scanner::options::ExclusionSet;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    const BASE: &str = "https://example.com/Frontend/";

    fn options() -> TreeOptions {
        TreeOptions::new().with_base_url(BASE)
    }

    fn names(nodes: &[TreeNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    fn touch(path: &Path) {
        File::create(path).unwrap().write_all(b"x").unwrap();
    }

    fn create_test_structure() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        touch(&root.join("index.html"));
        touch(&root.join("about.txt"));
        touch(&root.join("README.md"));
        touch(&root.join(".hidden"));

        fs::create_dir(root.join("games")).unwrap();
        touch(&root.join("games/tic tac toe.js"));
        touch(&root.join("games/maze.js"));

        fs::create_dir_all(root.join(".git/objects")).unwrap();
        touch(&root.join(".git/objects/abc"));

        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        touch(&root.join("node_modules/pkg/index.js"));

        fs::create_dir(root.join("empty")).unwrap();

        dir
    }

    #[test]
    fn test_build_tree_basic() {
        let dir = create_test_structure();
        let forest = build_tree(dir.path(), &options()).unwrap();

        // Files first, then directories, each group sorted
        assert_eq!(
            names(&forest),
            vec!["about.txt", "index.html", "empty", "games"]
        );

        let games = forest.iter().find(|n| n.name == "games").unwrap();
        assert_eq!(names(&games.children), vec!["maze.js", "tic tac toe.js"]);
    }

    #[test]
    fn test_excluded_and_hidden_entries_absent() {
        let dir = create_test_structure();
        let forest = build_tree(dir.path(), &options()).unwrap();

        let all = names(&forest);
        assert!(!all.contains(&".hidden"));
        assert!(!all.contains(&".git"));
        assert!(!all.contains(&"node_modules"));
        assert!(!all.contains(&"README.md"));

        // 2 root files + 2 nested files
        assert_eq!(count_nodes(&forest).files, 4);
    }

    #[test]
    fn test_empty_directory_kept_as_empty_node() {
        let dir = create_test_structure();
        let forest = build_tree(dir.path(), &options()).unwrap();

        let empty = forest.iter().find(|n| n.name == "empty").unwrap();
        assert!(empty.is_empty_dir());
    }

    #[test]
    fn test_directory_with_only_excluded_entries_is_empty() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        touch(&dir.path().join("docs/.DS_Store"));
        touch(&dir.path().join("docs/README.md"));
        fs::create_dir(dir.path().join("docs/.cache")).unwrap();

        let forest = build_tree(dir.path(), &options()).unwrap();

        assert_eq!(forest.len(), 1);
        assert!(forest[0].is_empty_dir());
    }

    #[test]
    fn test_dirs_first_order() {
        let dir = create_test_structure();
        let opts = options().with_group_order(GroupOrder::DirsFirst);
        let forest = build_tree(dir.path(), &opts).unwrap();

        assert_eq!(
            names(&forest),
            vec!["empty", "games", "about.txt", "index.html"]
        );
    }

    #[test]
    fn test_ordinal_sort_is_case_sensitive() {
        let dir = TempDir::new().unwrap();
        for name in ["b.txt", "a.txt", "B.txt", "_x.txt", "A.txt"] {
            touch(&dir.path().join(name));
        }

        let forest = build_tree(dir.path(), &options()).unwrap();

        assert_eq!(
            names(&forest),
            vec!["A.txt", "B.txt", "_x.txt", "a.txt", "b.txt"]
        );
    }

    #[test]
    fn test_file_urls_are_relative_to_root() {
        let dir = create_test_structure();
        let forest = build_tree(dir.path(), &options()).unwrap();

        let games = forest.iter().find(|n| n.name == "games").unwrap();
        let ttt = games
            .children
            .iter()
            .find(|n| n.name == "tic tac toe.js")
            .unwrap();
        assert_eq!(
            ttt.url.as_deref(),
            Some("https://example.com/Frontend/games/tic%20tac%20toe.js")
        );
    }

    #[test]
    fn test_markdown_rewrite_keeps_label() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("notes.md"));

        let opts = options().with_rewrite_markdown(true);
        let forest = build_tree(dir.path(), &opts).unwrap();

        assert_eq!(forest[0].name, "notes.md");
        assert_eq!(
            forest[0].url.as_deref(),
            Some("https://example.com/Frontend/notes.html")
        );
    }

    #[test]
    fn test_custom_exclusions() {
        let dir = create_test_structure();
        let opts = options().with_exclusions(ExclusionSet::empty().with_file("about.txt"));
        let forest = build_tree(dir.path(), &opts).unwrap();

        let all = names(&forest);
        assert!(!all.contains(&"about.txt"));
        // Defaults were replaced, so these are back
        assert!(all.contains(&"README.md"));
        assert!(all.contains(&"node_modules"));
        // Dot entries stay hidden regardless
        assert!(!all.contains(&".git"));
    }

    #[test]
    fn test_git_with_many_files_is_skipped() {
        let dir = TempDir::new().unwrap();
        let objects = dir.path().join(".git/objects");
        fs::create_dir_all(&objects).unwrap();
        for i in 0..1000 {
            touch(&objects.join(format!("obj{}", i)));
        }
        touch(&dir.path().join("main.js"));

        let forest = build_tree(dir.path(), &options()).unwrap();

        assert_eq!(names(&forest), vec!["main.js"]);
    }

    #[test]
    fn test_empty_root_returns_empty_forest() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join(".hidden"));

        let forest = build_tree(dir.path(), &options()).unwrap();
        assert!(forest.is_empty());
    }

    #[test]
    fn test_build_tree_nonexistent_path() {
        let result = build_tree(Path::new("/nonexistent/path/12345"), &options());
        assert!(matches!(result, Err(IndexError::PathNotFound(_))));
    }

    #[test]
    fn test_build_tree_on_file_fails() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain.txt");
        touch(&file);

        let result = build_tree(&file, &options());
        assert!(matches!(result, Err(IndexError::NotADirectory(_))));
    }

    #[test]
    fn test_build_tree_is_deterministic() {
        let dir = create_test_structure();
        let first = build_tree(dir.path(), &options()).unwrap();
        let second = build_tree(dir.path(), &options()).unwrap();
        assert_eq!(first, second);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_is_empty() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        touch(&locked.join("secret.txt"));
        touch(&dir.path().join("open.txt"));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can read it anyway; the listing recovery itself is
        // covered by test_permission_denied_listing_recovers
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            eprintln!("skipping test_unreadable_directory_is_empty: directory still readable");
            return;
        }

        let forest = build_tree(dir.path(), &options());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let forest = forest.unwrap();
        let locked_node = forest.iter().find(|n| n.name == "locked").unwrap();
        assert!(locked_node.is_empty_dir());
        assert!(forest.iter().any(|n| n.name == "open.txt"));
    }

    #[test]
    fn test_permission_denied_listing_recovers() {
        let denied: std::io::Result<()> = Err(std::io::Error::from(ErrorKind::PermissionDenied));
        let result = recover_listing(Path::new("/locked"), denied).unwrap();
        assert!(result.is_none());

        let ok: std::io::Result<u8> = Ok(7);
        assert_eq!(recover_listing(Path::new("/open"), ok).unwrap(), Some(7));
    }

    #[test]
    fn test_other_listing_errors_propagate() {
        let failed: std::io::Result<()> = Err(std::io::Error::from(ErrorKind::InvalidData));
        let result = recover_listing(Path::new("/broken"), failed);
        assert!(matches!(result, Err(IndexError::Io { .. })));
    }

    #[test]
    fn test_skip_file_matches_exact_path_only() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("index.html"));
        fs::create_dir(root.join("maze")).unwrap();
        touch(&root.join("maze/index.html"));
        touch(&root.join("maze/maze.js"));

        let skip = fs::canonicalize(root.join("index.html")).unwrap();
        let forest = build_tree(root, &options().with_skip_file(Some(skip))).unwrap();

        assert_eq!(names(&forest), vec!["maze"]);
        assert_eq!(names(&forest[0].children), vec!["index.html", "maze.js"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_not_followed_by_default() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("real")).unwrap();
        touch(&root.join("real/inside.txt"));
        std::os::unix::fs::symlink(root.join("real"), root.join("link")).unwrap();

        let forest = build_tree(root, &options()).unwrap();

        let link = forest.iter().find(|n| n.name == "link").unwrap();
        assert!(!link.is_dir());
        assert_eq!(
            link.url.as_deref(),
            Some("https://example.com/Frontend/link")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_follow_symlinks_descends() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("real")).unwrap();
        touch(&root.join("real/inside.txt"));
        std::os::unix::fs::symlink(root.join("real"), root.join("link")).unwrap();

        let forest = build_tree(root, &options().with_follow_symlinks(true)).unwrap();

        let link = forest.iter().find(|n| n.name == "link").unwrap();
        assert!(link.is_dir());
        assert_eq!(names(&link.children), vec!["inside.txt"]);
        assert_eq!(
            link.children[0].url.as_deref(),
            Some("https://example.com/Frontend/link/inside.txt")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_follow_symlinks_stops_at_cycle() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("sub")).unwrap();
        touch(&root.join("sub/file.txt"));
        std::os::unix::fs::symlink(root, root.join("sub/loop")).unwrap();

        let forest = build_tree(root, &options().with_follow_symlinks(true)).unwrap();

        let sub = forest.iter().find(|n| n.name == "sub").unwrap();
        let loop_node = sub.children.iter().find(|n| n.name == "loop").unwrap();
        assert!(loop_node.is_empty_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_file() {
        let dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink(dir.path().join("missing"), dir.path().join("broken")).unwrap();

        let forest = build_tree(dir.path(), &options().with_follow_symlinks(true)).unwrap();

        assert_eq!(names(&forest), vec!["broken"]);
        assert!(!forest[0].is_dir());
    }
}
