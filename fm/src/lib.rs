//! fm - Interactive file manager shell
//!
//! This crate provides:
//! - A line interpreter with a fixed command table (`ls`, `cd`, `cp`, ...)
//! - Path resolution with pre-flight access checks
//! - Streaming SHA-256 hashing and Brotli compression on tokio

pub mod error;
pub mod help;
pub mod interpreter;
pub mod lexer;
pub mod ops;
pub mod os_info;
pub mod path;
pub mod prompt;
pub mod session;

pub use error::{FmError, FmResult};
pub use interpreter::{CommandKind, Interpreter, Outcome, Reply, State};
pub use ops::EngineOptions;
pub use session::Session;
