//! Tree Index - generate a linked index of a directory tree
//!
//! This crate provides functionality for:
//! - Walking a directory tree with name-based exclusions
//! - Building percent-encoded links under a base URL
//! - Rendering the tree as Markdown, standalone HTML, or JSON

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod scanner;

// Re-export commonly used types
pub use config::Config;
pub use error::{IndexError, Result};
pub use scanner::{build_tree, TreeNode, TreeOptions};
