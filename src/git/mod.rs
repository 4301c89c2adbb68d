use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::errors::{Result, WwError};
use crate::shell::shell_quote;
use crate::storage::normalize_path;

pub const LIST_WORKTREES: &str = "git worktree list --porcelain";
pub const PRUNE_WORKTREES: &str = "git worktree prune";
pub const STATUS_PORCELAIN: &str = "git status --porcelain";
pub const BRANCHES_CONTAINING_HEAD: &str = "git branch -a --contains HEAD";

/// `git worktree add` creating a branch named like the worktree
#[must_use]
pub fn add_worktree_command(worktree_path: &Path, branch: &str) -> String {
    format!(
        "git worktree add {} -b {}",
        shell_quote(&worktree_path.to_string_lossy()),
        shell_quote(branch)
    )
}

/// `git branch -d` (or `-D` when forced)
#[must_use]
pub fn delete_branch_command(branch: &str, force: bool) -> String {
    let flag = if force { "-D" } else { "-d" };
    format!("git branch {} {}", flag, shell_quote(branch))
}

/// A managed worktree as reported by git.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorktreeRecord {
    /// Directory name under the repo's base path
    pub name: String,
    pub path: PathBuf,
    /// First 7 characters of HEAD
    pub commit: String,
    /// Last `/` segment of the checked-out ref
    pub branch: String,
}

const REQUIRED_FIELDS: [&str; 3] = ["worktree", "HEAD", "branch"];

/// Parses `git worktree list --porcelain` output, keeping only worktrees
/// whose parent directory is `base_path`.
///
/// Each paragraph must consist of `field value` lines and carry the
/// `worktree`, `HEAD` and `branch` fields; anything else is a parse error.
/// Records keep the order git printed them in.
///
/// # Errors
/// Returns `Parse` for a line without a value or a paragraph missing a field
pub fn parse_worktree_list(output: &str, base_path: &Path) -> Result<Vec<WorktreeRecord>> {
    let base_path = normalize_path(base_path);
    let mut records = Vec::new();

    for paragraph in split_paragraphs(output) {
        let fields = parse_paragraph(&paragraph)?;

        let worktree_path = normalize_path(Path::new(fields["worktree"]));
        let (Some(parent), Some(leaf)) = (worktree_path.parent(), worktree_path.file_name())
        else {
            continue;
        };
        // Skips the primary working copy and anything git knows outside our base.
        if normalize_path(parent) != base_path {
            continue;
        }

        let head = fields["HEAD"];
        let branch_ref = fields["branch"];
        records.push(WorktreeRecord {
            name: leaf.to_string_lossy().into_owned(),
            path: worktree_path.clone(),
            commit: head.chars().take(7).collect(),
            branch: branch_ref
                .rsplit('/')
                .next()
                .unwrap_or(branch_ref)
                .to_string(),
        });
    }

    Ok(records)
}

fn split_paragraphs(output: &str) -> Vec<Vec<&str>> {
    let mut paragraphs = Vec::new();
    let mut current = Vec::new();

    for line in output.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs
}

fn parse_paragraph<'a>(lines: &[&'a str]) -> Result<HashMap<&'a str, &'a str>> {
    let mut fields = HashMap::new();

    for line in lines {
        let (field, value) = line
            .split_once(' ')
            .filter(|(field, _)| !field.is_empty())
            .ok_or_else(|| WwError::Parse {
                message: format!("expected 'field value', got '{}'", line),
            })?;
        fields.insert(field, value);
    }

    if let Some(missing) = REQUIRED_FIELDS
        .iter()
        .find(|field| !fields.contains_key(*field))
    {
        return Err(WwError::Parse {
            message: format!("worktree entry is missing '{}'", missing),
        });
    }

    Ok(fields)
}
