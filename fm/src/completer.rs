use fm::help::COMMANDS;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Completes command names in first position and local paths elsewhere.
pub struct FmHelper {
    pub cwd: Arc<RwLock<PathBuf>>,
}

impl FmHelper {
    pub fn new(cwd: Arc<RwLock<PathBuf>>) -> Self {
        Self { cwd }
    }
}

impl Completer for FmHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_cursor = &line[..pos];
        let (start, word) = find_word_start(line_to_cursor);
        let is_first_word = !line_to_cursor[..start].contains(|c: char| !c.is_whitespace());

        let mut completions = Vec::new();

        if is_first_word {
            for cmd in COMMANDS {
                if cmd.name.starts_with(word) {
                    completions.push(Pair {
                        display: cmd.name.to_string(),
                        replacement: cmd.name.to_string(),
                    });
                }
            }
            return Ok((start, completions));
        }

        let cwd = self
            .cwd
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone());

        let (dir_prefix, partial) = match word.rfind('/') {
            Some(last_slash) => (&word[..=last_slash], &word[last_slash + 1..]),
            None => ("", word),
        };
        let dir = fm::path::resolve(&cwd, if dir_prefix.is_empty() { "." } else { dir_prefix });

        for name in complete_path(&dir, partial) {
            completions.push(Pair {
                replacement: format!("{dir_prefix}{name}"),
                display: name,
            });
        }

        Ok((start, completions))
    }
}

fn complete_path(dir: &Path, partial: &str) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(partial) {
                return None;
            }
            let is_dir = entry.file_type().is_ok_and(|ft| ft.is_dir());
            Some(if is_dir { format!("{name}/") } else { name })
        })
        .collect();
    names.sort();
    names
}

fn find_word_start(line: &str) -> (usize, &str) {
    let mut start = line.len();
    for (i, c) in line.char_indices().rev() {
        if c.is_whitespace() || c == '\'' {
            break;
        }
        start = i;
    }
    (start, &line[start..])
}

impl Hinter for FmHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for FmHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Borrowed(hint)
    }
}

impl Validator for FmHelper {}

impl Helper for FmHelper {}
