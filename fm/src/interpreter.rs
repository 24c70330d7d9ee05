//! Command interpreter
//!
//! A line is split at its first space into a command name and a raw argument
//! string. The name is matched exactly against [`CommandKind`]; the argument
//! string is tokenized according to the command's [`Arity`]. Every error is
//! turned into a message here, so nothing a command does can stop the
//! interpreter.

use crate::error::{FmError, FmResult};
use crate::help;
use crate::lexer;
use crate::ops::{self, EngineOptions};
use crate::os_info;
use crate::path::{self, AccessMode};
use crate::prompt;
use crate::session::Session;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Prefix for every failure that is not an unknown command or flag.
pub const FAILURE_PREFIX: &str = "Operation failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Ls,
    Up,
    Cd,
    Cat,
    Add,
    Rm,
    Rn,
    Cp,
    Mv,
    Hash,
    Compress,
    Decompress,
    Os,
    Help,
    Exit,
}

/// How a command's raw argument string is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    None,
    OnePath,
    TwoPaths,
    Flag,
    Optional,
}

impl CommandKind {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "ls" => Self::Ls,
            "up" => Self::Up,
            "cd" => Self::Cd,
            "cat" => Self::Cat,
            "add" => Self::Add,
            "rm" => Self::Rm,
            "rn" => Self::Rn,
            "cp" => Self::Cp,
            "mv" => Self::Mv,
            "hash" => Self::Hash,
            "compress" => Self::Compress,
            "decompress" => Self::Decompress,
            "os" => Self::Os,
            "help" => Self::Help,
            ".exit" | "exit" => Self::Exit,
            _ => return None,
        })
    }

    pub fn arity(self) -> Arity {
        match self {
            Self::Ls | Self::Up | Self::Exit => Arity::None,
            Self::Cd | Self::Cat | Self::Add | Self::Rm | Self::Hash => Arity::OnePath,
            Self::Rn | Self::Cp | Self::Mv | Self::Compress | Self::Decompress => Arity::TwoPaths,
            Self::Os => Arity::Flag,
            Self::Help => Arity::Optional,
        }
    }
}

/// One input line split into name and raw arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command<'a> {
    pub name: &'a str,
    pub raw_args: &'a str,
}

impl<'a> Command<'a> {
    pub fn split(line: &'a str) -> Self {
        match line.split_once(' ') {
            Some((name, raw_args)) => Self { name, raw_args },
            None => Self {
                name: line,
                raw_args: "",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Ready,
    Terminating,
}

/// What a successfully dispatched command asks of the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Message(String),
    Exit,
}

/// Text to show after a line, and whether the process should end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub message: String,
    pub exit: bool,
}

pub struct Interpreter {
    session: Session,
    options: EngineOptions,
    state: State,
}

impl Interpreter {
    pub fn new(session: Session, options: EngineOptions) -> Self {
        Self {
            session,
            options,
            state: State::Ready,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Run one line and render its result. Once terminating, input is
    /// ignored.
    pub async fn handle_line(&mut self, line: &str) -> Outcome {
        if self.state == State::Terminating {
            return Outcome {
                message: String::new(),
                exit: true,
            };
        }

        match self.execute(line).await {
            Ok(Reply::Message(message)) => Outcome {
                message,
                exit: false,
            },
            Ok(Reply::Exit) => self.terminate(),
            Err(err) => {
                warn!(line, error = %err, "command failed");
                Outcome {
                    message: render_error(&err),
                    exit: false,
                }
            }
        }
    }

    /// Enter the terminating state and produce the farewell.
    pub fn terminate(&mut self) -> Outcome {
        self.state = State::Terminating;
        Outcome {
            message: prompt::farewell(self.session.username()),
            exit: true,
        }
    }

    /// Dispatch one line without rendering errors. Once terminating, every
    /// line answers [`Reply::Exit`] and nothing runs.
    pub async fn execute(&mut self, line: &str) -> FmResult<Reply> {
        if self.state == State::Terminating {
            return Ok(Reply::Exit);
        }

        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return Ok(Reply::Message(String::new()));
        }

        let command = Command::split(line);
        let kind = CommandKind::from_name(command.name)
            .ok_or_else(|| FmError::UnknownCommand(line.to_string()))?;
        debug!(command = command.name, args = command.raw_args, "dispatching");

        let args = command.raw_args;
        if kind.arity() == Arity::None && !args.is_empty() {
            return Err(FmError::InvalidArguments);
        }

        match kind {
            CommandKind::Exit => {
                self.state = State::Terminating;
                Ok(Reply::Exit)
            }
            CommandKind::Ls => self.ls().await,
            CommandKind::Up => self.up().await,
            CommandKind::Cd => self.cd(&lexer::one_path(args)?).await,
            CommandKind::Cat => self.cat(&lexer::one_path(args)?).await,
            CommandKind::Add => self.add(&lexer::one_path(args)?).await,
            CommandKind::Rm => self.rm(&lexer::one_path(args)?).await,
            CommandKind::Hash => self.hash(&lexer::one_path(args)?).await,
            CommandKind::Rn => self.rn(lexer::two_paths(args)?).await,
            CommandKind::Cp => self.cp(lexer::two_paths(args)?).await,
            CommandKind::Mv => self.mv(lexer::two_paths(args)?).await,
            CommandKind::Compress => self.compress(lexer::two_paths(args)?).await,
            CommandKind::Decompress => self.decompress(lexer::two_paths(args)?).await,
            CommandKind::Os => Self::os(args),
            CommandKind::Help => Self::help(args),
        }
    }

    fn resolve(&self, token: &str) -> PathBuf {
        path::resolve(self.session.current_dir(), token)
    }

    async fn ls(&self) -> FmResult<Reply> {
        let names = ops::fs::list(self.session.current_dir()).await?;
        Ok(Reply::Message(names.join("\n")))
    }

    async fn up(&mut self) -> FmResult<Reply> {
        if let Some(parent) = self.session.current_dir().parent() {
            let parent = parent.to_path_buf();
            if path::check_access(&parent, AccessMode::Directory).await.is_ok() {
                self.session.set_current_dir(parent);
            }
        }
        Ok(Reply::Message(String::new()))
    }

    async fn cd(&mut self, token: &str) -> FmResult<Reply> {
        let target = self.resolve(token);
        path::require(&target, AccessMode::Directory).await?;
        self.session.set_current_dir(target);
        Ok(Reply::Message(String::new()))
    }

    async fn cat(&self, token: &str) -> FmResult<Reply> {
        let contents = ops::fs::read_all(&self.resolve(token)).await?;
        Ok(Reply::Message(contents))
    }

    async fn add(&self, token: &str) -> FmResult<Reply> {
        ops::fs::create(&self.resolve(token)).await?;
        Ok(done(token, "created"))
    }

    async fn rm(&self, token: &str) -> FmResult<Reply> {
        ops::fs::remove(&self.resolve(token)).await?;
        Ok(done(token, "removed"))
    }

    async fn hash(&self, token: &str) -> FmResult<Reply> {
        let hex = ops::hash::digest(&self.resolve(token), self.options.chunk_size).await?;
        Ok(Reply::Message(format!("File hash is:\n{hex}")))
    }

    async fn rn(&self, (src, dst): (String, String)) -> FmResult<Reply> {
        ops::fs::rename(&self.resolve(&src), &self.resolve(&dst)).await?;
        Ok(done(&src, "renamed"))
    }

    async fn cp(&self, (src, dst): (String, String)) -> FmResult<Reply> {
        ops::fs::copy(&self.resolve(&src), &self.resolve(&dst), self.options.chunk_size).await?;
        Ok(done(&src, "copied"))
    }

    /// Copy, then remove the source. A failed removal leaves both files.
    async fn mv(&self, (src, dst): (String, String)) -> FmResult<Reply> {
        let from = self.resolve(&src);
        ops::fs::copy(&from, &self.resolve(&dst), self.options.chunk_size).await?;
        ops::fs::remove(&from).await?;
        Ok(done(&src, "moved"))
    }

    async fn compress(&self, (src, dst): (String, String)) -> FmResult<Reply> {
        ops::compress::compress(&self.resolve(&src), &self.resolve(&dst), &self.options).await?;
        Ok(done(&src, "compressed"))
    }

    async fn decompress(&self, (src, dst): (String, String)) -> FmResult<Reply> {
        ops::compress::decompress(&self.resolve(&src), &self.resolve(&dst), &self.options)
            .await?;
        Ok(done(&src, "decompressed"))
    }

    fn os(args: &str) -> FmResult<Reply> {
        let flag = args.strip_prefix("--").ok_or(FmError::InvalidArguments)?;
        os_info::lookup(flag)
            .map(Reply::Message)
            .ok_or_else(|| FmError::UnknownOsFlag(flag.to_string()))
    }

    fn help(args: &str) -> FmResult<Reply> {
        if args.is_empty() {
            return Ok(Reply::Message(help::format_help_list()));
        }
        help::get_help(args)
            .map(|cmd| Reply::Message(help::format_help(cmd)))
            .ok_or_else(|| FmError::UnknownCommand(args.to_string()))
    }
}

fn done(token: &str, verb: &str) -> Reply {
    Reply::Message(format!("File \"{token}\" has been {verb}"))
}

/// User-facing text for `err`.
pub fn render_error(err: &FmError) -> String {
    match err {
        FmError::UnknownCommand(_) | FmError::UnknownOsFlag(_) => err.to_string(),
        _ => format!("{FAILURE_PREFIX}: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_splits_at_first_space() {
        assert_eq!(
            Command::split("rn 'a b' c"),
            Command {
                name: "rn",
                raw_args: "'a b' c"
            }
        );
        assert_eq!(
            Command::split("ls"),
            Command {
                name: "ls",
                raw_args: ""
            }
        );
    }

    #[test]
    fn names_match_exactly() {
        assert_eq!(CommandKind::from_name("cat"), Some(CommandKind::Cat));
        assert_eq!(CommandKind::from_name("cata"), None);
        assert_eq!(CommandKind::from_name("decompress"), Some(CommandKind::Decompress));
        assert_eq!(CommandKind::from_name("compres"), None);
    }

    #[test]
    fn arity_table() {
        assert_eq!(CommandKind::Ls.arity(), Arity::None);
        assert_eq!(CommandKind::Hash.arity(), Arity::OnePath);
        assert_eq!(CommandKind::Mv.arity(), Arity::TwoPaths);
        assert_eq!(CommandKind::Os.arity(), Arity::Flag);
    }

    #[test]
    fn errors_render_with_prefix() {
        assert_eq!(
            render_error(&FmError::InvalidArguments),
            "Operation failed: arguments is invalid"
        );
        assert_eq!(
            render_error(&FmError::UnknownOsFlag("kernel".to_string())),
            "Unknown argument: kernel"
        );
    }

    #[tokio::test]
    async fn terminating_is_absorbing() {
        let mut interpreter = Interpreter::new(Session::new("/", "tester"), EngineOptions::default());

        let outcome = interpreter.handle_line(".exit").await;
        assert!(outcome.exit);
        assert_eq!(outcome.message, "Thank you for using File Manager, tester, goodbye!");
        assert_eq!(interpreter.state(), State::Terminating);

        let after = interpreter.handle_line("cd /tmp").await;
        assert!(after.exit);
        assert!(after.message.is_empty());
        assert_eq!(interpreter.session().current_dir(), std::path::Path::new("/"));
    }

    #[tokio::test]
    async fn execute_runs_nothing_after_exit() {
        let temp = tempfile::tempdir().unwrap();
        let mut interpreter =
            Interpreter::new(Session::new(temp.path(), "tester"), EngineOptions::default());

        assert_eq!(interpreter.execute("exit").await.unwrap(), Reply::Exit);
        assert_eq!(interpreter.state(), State::Terminating);

        assert_eq!(interpreter.execute("add late.txt").await.unwrap(), Reply::Exit);
        assert!(!temp.path().join("late.txt").exists());
    }

    #[tokio::test]
    async fn zero_arity_commands_reject_arguments() {
        let mut interpreter = Interpreter::new(Session::new("/", "tester"), EngineOptions::default());
        assert!(matches!(
            interpreter.execute("ls -la").await,
            Err(FmError::InvalidArguments)
        ));
    }

    #[tokio::test]
    async fn os_requires_double_dash() {
        let mut interpreter = Interpreter::new(Session::new("/", "tester"), EngineOptions::default());
        assert!(matches!(
            interpreter.execute("os homedir").await,
            Err(FmError::InvalidArguments)
        ));
        assert!(matches!(
            interpreter.execute("os --nope").await,
            Err(FmError::UnknownOsFlag(_))
        ));
        assert!(interpreter.execute("os --architecture").await.is_ok());
    }
}
