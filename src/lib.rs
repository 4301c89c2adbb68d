//! # ww
//!
//! A CLI tool for managing git worktrees across several named repositories.
//!
//! ## Features
//!
//! - **Repo Registry** - Register repos by name and pick an active one as the default target
//! - **Centralized Storage** - Worktrees live in `~/.ww/<repo-name>/<worktree-name>/`
//! - **Paired Branches** - Every worktree gets a branch of the same name, created and deleted with it
//! - **Safe Removal** - Refuses to drop dirty worktrees or unmerged branches unless forced
//! - **Shell Navigation** - `ww cd` changes the calling shell's directory through a sourced temp script
//!
//! ## Quick Start
//!
//! ```bash
//! # Install the shell wrapper
//! eval "$(ww-bin init bash)"
//!
//! # Register a repo and make it the default
//! ww repo add app ~/src/app
//! ww repo set-active app
//!
//! # Create, enter, list and remove worktrees
//! ww new feature-auth
//! ww cd feature-auth
//! ww ls
//! ww rm feature-auth
//! ```
//!
//! ## Module Structure
//!
//! - [`commands`] - Individual command implementations (repo, new, rm, ls, cd, init)
//! - [`config`] - The persistent repo registry in `~/.wwconfig`
//! - [`storage`] - Layout of `~/.ww`, the config file and the temp script
//! - [`session`] - Per-invocation ownership of the registry and temp script
//! - [`git`] - git command lines and the `worktree list --porcelain` parser
//! - [`shell`] - Runs commands through `sh`
//! - [`traits`] - Defines the CommandRunner trait for testability and abstraction

pub mod commands;
pub mod config;
pub mod errors;
pub mod git;
pub mod logging;
pub mod session;
pub mod shell;
pub mod storage;
pub mod traits;

pub use errors::{Result, WwError};
