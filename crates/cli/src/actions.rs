//! GitHub Actions workflow commands.

/// Formats an `::error::` workflow command, which the runner shows as the
/// step's failure annotation.
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

/// Escapes a workflow command payload so multi-line messages stay one command.
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
