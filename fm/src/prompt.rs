//! Greeting, farewell and the status line printed after each command

use std::path::Path;

pub fn greeting(username: &str) -> String {
    format!("Welcome to the File Manager, {username}!")
}

pub fn farewell(username: &str) -> String {
    format!("Thank you for using File Manager, {username}, goodbye!")
}

/// `template` with `{cwd}` and `{user}` filled in.
pub fn expand(template: &str, cwd: &Path, username: &str) -> String {
    template
        .replace("{cwd}", &cwd.display().to_string())
        .replace("{user}", username)
}

/// Message body followed by the status line. An empty message renders only
/// the status line.
pub fn render(message: &str, status: &str) -> String {
    if message.is_empty() {
        format!("{status}\n")
    } else if message.ends_with('\n') {
        format!("{message}{status}\n")
    } else {
        format!("{message}\n{status}\n")
    }
}
