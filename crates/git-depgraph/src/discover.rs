use std::fs;
use std::path::{Path, PathBuf};

/// Locate the directory holding `objects/` and `refs/` for `repo`.
///
/// Accepts a work tree with a `.git` directory, a work tree whose `.git` is a
/// `gitdir: <path>` file (linked worktrees, submodules), or a git directory
/// itself (anything containing `objects/` and `refs/`). A linked worktree's
/// git dir only holds per-worktree state, so its `commondir` is followed to
/// the shared repository.
pub fn discover_git_dir(repo: &Path) -> Option<PathBuf> {
    locate(repo).map(|git_dir| resolve_common_dir(&git_dir))
}

fn locate(repo: &Path) -> Option<PathBuf> {
    let dot_git = repo.join(".git");
    if dot_git.is_dir() {
        return Some(dot_git);
    }
    if dot_git.is_file() {
        let contents = fs::read_to_string(&dot_git).ok()?;
        let target = contents.trim().strip_prefix("gitdir:")?.trim();
        let target = Path::new(target);
        let resolved = if target.is_absolute() {
            target.to_path_buf()
        } else {
            repo.join(target)
        };
        return resolved.is_dir().then_some(resolved);
    }
    if repo.join("commondir").is_file()
        || (repo.join("objects").is_dir() && repo.join("refs").is_dir())
    {
        return Some(repo.to_path_buf());
    }
    None
}

/// Follow `<git_dir>/commondir`, relative to `git_dir`, when present.
fn resolve_common_dir(git_dir: &Path) -> PathBuf {
    let Ok(content) = fs::read_to_string(git_dir.join("commondir")) else {
        return git_dir.to_path_buf();
    };
    let resolved = git_dir.join(content.trim());
    let common = fs::canonicalize(&resolved).unwrap_or(resolved);
    tracing::debug!(
        git_dir = %git_dir.display(),
        common_dir = %common.display(),
        "following commondir"
    );
    common
}
