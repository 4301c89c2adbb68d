pub mod cd;
pub mod create;
pub mod init;
pub mod list;
pub mod remove;
pub mod repo;

/// Echoes what git printed, minus surrounding whitespace
pub(crate) fn print_command_output(output: &str) {
    let trimmed = output.trim();
    if !trimmed.is_empty() {
        println!("{}", trimmed);
    }
}
