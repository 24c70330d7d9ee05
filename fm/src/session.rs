//! Per-process session state

use std::path::{Path, PathBuf};

/// Logged-in user and current directory.
///
/// `current_dir` only ever holds a path that passed a directory access check
/// when it was assigned; [`crate::Interpreter`] is the only writer.
#[derive(Debug, Clone)]
pub struct Session {
    current_dir: PathBuf,
    username: String,
}

impl Session {
    pub fn new(current_dir: impl Into<PathBuf>, username: impl Into<String>) -> Self {
        Self {
            current_dir: current_dir.into(),
            username: username.into(),
        }
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn set_current_dir(&mut self, dir: PathBuf) {
        self.current_dir = dir;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_holds_initial_state() {
        let session = Session::new("/tmp", "alice");
        assert_eq!(session.current_dir(), Path::new("/tmp"));
        assert_eq!(session.username(), "alice");
    }
}
