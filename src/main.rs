use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueHint};
use std::path::PathBuf;
use ww::commands::init::Shell;
use ww::commands::{cd, create, init, list, remove, repo};
use ww::logging::init_logging;
use ww::session::Session;
use ww::storage::WwPaths;

#[derive(Parser)]
#[command(name = "ww")]
#[command(about = "A CLI tool for managing git worktrees across several repos")]
#[command(version)]
pub struct Cli {
    /// Log what ww is doing to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the known repos
    Repo {
        #[command(subcommand)]
        command: RepoCommands,
    },
    /// Create a new worktree (and a branch of the same name)
    New {
        /// Name of the worktree
        #[arg(value_hint = ValueHint::Other)]
        name: String,
        /// Repo to use (overrides active repo)
        #[arg(long)]
        repo: Option<String>,
    },
    /// Remove a worktree and its branch
    Rm {
        /// Name of the worktree
        #[arg(value_hint = ValueHint::Other)]
        name: String,
        /// Override the clean/merged checks and force the removal
        #[arg(short, long)]
        force: bool,
        /// Repo to use (overrides active repo)
        #[arg(long)]
        repo: Option<String>,
    },
    /// List the worktrees of a repo
    Ls {
        /// Repo to use (overrides active repo)
        #[arg(long)]
        repo: Option<String>,
    },
    /// Change the calling shell's directory to a worktree
    Cd {
        /// Name of the worktree
        #[arg(value_hint = ValueHint::Other)]
        name: String,
        /// Repo to use (overrides active repo)
        #[arg(long)]
        repo: Option<String>,
    },
    /// Generate the `ww` shell function that makes `cd` work
    Init {
        /// Shell to generate integration for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum RepoCommands {
    /// List all the known repos
    Ls,
    /// Add a new repo
    Add {
        /// Name to assign to the repo
        name: String,
        /// Path to the repo
        #[arg(value_hint = ValueHint::DirPath)]
        path: PathBuf,
    },
    /// Remove a repo and all of its worktrees
    Rm {
        /// Name of the repo
        name: String,
    },
    /// Set the active repo
    SetActive {
        /// Name of the repo
        name: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Init { shell } => {
            init::generate_shell_integration(shell);
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            init::generate_completions(shell, &mut cmd);
        }
        command => {
            let mut session = Session::open(WwPaths::from_env()?)?;
            let result = run(&mut session, command);
            // The registry is written back even when the command failed.
            let saved = session.close();

            if let Err(e) = &result {
                tracing::debug!(event = "ww.command.failed", code = e.error_code(), error = %e);
                if let Err(save_error) = &saved {
                    tracing::warn!(
                        event = "ww.session.save_failed",
                        code = save_error.error_code(),
                        error = %save_error
                    );
                }
            }
            result?;
            saved?;
        }
    }

    Ok(())
}

fn run(session: &mut Session, command: Commands) -> ww::Result<()> {
    match command {
        Commands::Repo { command } => match command {
            RepoCommands::Ls => repo::list_repos(session),
            RepoCommands::Add { name, path } => repo::add_repo(session, &name, &path)?,
            RepoCommands::Rm { name } => repo::remove_repo(session, &name)?,
            RepoCommands::SetActive { name } => repo::set_active_repo(session, &name)?,
        },
        Commands::New { name, repo } => {
            create::create_worktree(session, &name, repo.as_deref())?;
        }
        Commands::Rm { name, force, repo } => {
            remove::remove_worktree(session, &name, repo.as_deref(), force)?;
        }
        Commands::Ls { repo } => {
            list::list_worktrees(session, repo.as_deref())?;
        }
        Commands::Cd { name, repo } => {
            cd::cd_worktree(session, &name, repo.as_deref())?;
        }
        Commands::Init { .. } | Commands::Completions { .. } => {}
    }

    Ok(())
}
