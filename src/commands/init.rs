use clap::{Command, ValueEnum};
use clap_complete::{Shell as CompleteShell, generate};
use std::io;

/// Name of the shell function users type; the binary itself is `ww-bin`
pub const WRAPPER_NAME: &str = "ww";

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

/// Generate shell integration for the specified shell
pub fn generate_shell_integration(shell: Shell) {
    println!("{}", shell_integration(shell));
}

/// The `ww` wrapper function for `shell`.
///
/// The wrapper runs `ww-bin`, then sources the temp script so any queued
/// `cd` happens in the interactive shell, and returns `ww-bin`'s status.
#[must_use]
pub fn shell_integration(shell: Shell) -> &'static str {
    match shell {
        Shell::Bash => BASH_INTEGRATION,
        Shell::Zsh => ZSH_INTEGRATION,
        Shell::Fish => FISH_INTEGRATION,
    }
}

/// Generate native shell completions using clap, bound to the `ww` wrapper
pub fn generate_completions(shell: Shell, cmd: &mut Command) {
    let clap_shell = match shell {
        Shell::Bash => CompleteShell::Bash,
        Shell::Zsh => CompleteShell::Zsh,
        Shell::Fish => CompleteShell::Fish,
    };

    generate(clap_shell, cmd, WRAPPER_NAME, &mut io::stdout());
}

const BASH_INTEGRATION: &str = r#"# ww shell integration for Bash
# Add to ~/.bashrc:  eval "$(ww-bin init bash)"

ww() {
    ww-bin "$@"
    local ww_status=$?
    local ww_script="${WW_HOME:-$HOME}/.wwtmp"
    if [ -s "$ww_script" ]; then
        . "$ww_script"
    fi
    return $ww_status
}

if command -v ww-bin >/dev/null 2>&1; then
    eval "$(ww-bin completions bash 2>/dev/null)"
fi"#;

const ZSH_INTEGRATION: &str = r#"# ww shell integration for Zsh
# Add to ~/.zshrc:  eval "$(ww-bin init zsh)"

ww() {
    ww-bin "$@"
    local ww_status=$?
    local ww_script="${WW_HOME:-$HOME}/.wwtmp"
    if [[ -s "$ww_script" ]]; then
        source "$ww_script"
    fi
    return $ww_status
}

if command -v ww-bin >/dev/null 2>&1 && (( $+functions[compdef] )); then
    eval "$(ww-bin completions zsh 2>/dev/null)"
fi"#;

const FISH_INTEGRATION: &str = r#"# ww shell integration for Fish
# Add to ~/.config/fish/config.fish:  ww-bin init fish | source

function ww
    ww-bin $argv
    set -l ww_status $status
    set -l ww_home $HOME
    if set -q WW_HOME
        set ww_home $WW_HOME
    end
    if test -s $ww_home/.wwtmp
        source $ww_home/.wwtmp
    end
    return $ww_status
end

if command -q ww-bin
    ww-bin completions fish 2>/dev/null | source
end"#;
