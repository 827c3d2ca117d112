//! Turn a branch's file/commit history into a rendered dependency graph.
//!
//! The object layer lives in `git-revwalk`; this crate serializes its
//! [`DependencyGraph`](git_revwalk::DependencyGraph) as a Mermaid flowchart
//! and hands it to an external renderer such as mermaid-cli (`mmdc`).

pub mod discover;
pub mod mermaid;
pub mod render;

pub use discover::discover_git_dir;
pub use render::{RenderError, Renderer};
