//! Argument tokenizer
//!
//! Turns the argument part of a command line into path tokens. Without any
//! `'` in the input the string splits on single spaces. Once a quote appears
//! only the quoted spans become tokens: one pair yields one token, two pairs
//! yield two, anything else is rejected.

use crate::error::{FmError, FmResult};

pub const QUOTE: char = '\'';

/// Most quoted spans any command accepts.
const MAX_QUOTED_SPANS: usize = 2;

#[derive(Clone, Copy)]
enum State {
    Unquoted,
    Quoted,
}

pub fn tokenize(raw: &str) -> FmResult<Vec<String>> {
    if !raw.contains(QUOTE) {
        return Ok(raw.split(' ').map(str::to_string).collect());
    }

    let mut state = State::Unquoted;
    let mut items = Vec::new();
    let mut current = String::new();

    for c in raw.chars() {
        match (state, c) {
            (State::Unquoted, QUOTE) => state = State::Quoted,
            (State::Unquoted, c) if c.is_whitespace() => {}
            // Bare text next to a quoted span has no defined meaning.
            (State::Unquoted, _) => return Err(FmError::InvalidArguments),
            (State::Quoted, QUOTE) => {
                items.push(std::mem::take(&mut current));
                state = State::Unquoted;
            }
            (State::Quoted, c) => current.push(c),
        }
    }

    if matches!(state, State::Quoted) || items.len() > MAX_QUOTED_SPANS {
        return Err(FmError::InvalidArguments);
    }

    Ok(items)
}

/// Single path argument. Unquoted input is taken whole, so embedded spaces
/// survive without quoting.
pub fn one_path(raw: &str) -> FmResult<String> {
    let path = if raw.contains(QUOTE) {
        let mut tokens = tokenize(raw)?;
        if tokens.len() != 1 {
            return Err(FmError::InvalidArguments);
        }
        tokens.remove(0)
    } else {
        raw.to_string()
    };

    if path.is_empty() {
        return Err(FmError::InvalidArguments);
    }
    Ok(path)
}

/// Source and destination arguments.
pub fn two_paths(raw: &str) -> FmResult<(String, String)> {
    let mut tokens = tokenize(raw)?.into_iter();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(src), Some(dst), None) if !src.is_empty() && !dst.is_empty() => Ok((src, dst)),
        _ => Err(FmError::InvalidArguments),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unquoted_input_splits_on_spaces() {
        assert_eq!(tokenize("file1 file2").unwrap(), vec!["file1", "file2"]);
    }

    #[test]
    fn two_quoted_spans_keep_inner_spaces() {
        assert_eq!(
            tokenize("'file one' 'file two'").unwrap(),
            vec!["file one", "file two"]
        );
    }

    #[test]
    fn quoted_and_unquoted_pairs_parse_the_same_way() {
        assert_eq!(
            two_paths("'file1' 'file2'").unwrap(),
            two_paths("file1 file2").unwrap()
        );
    }

    #[test]
    fn stray_quote_is_rejected() {
        assert!(matches!(tokenize("'bad"), Err(FmError::InvalidArguments)));
        assert!(matches!(two_paths("'bad"), Err(FmError::InvalidArguments)));
    }

    #[test]
    fn three_quoted_spans_are_rejected() {
        assert!(tokenize("'a' 'b' 'c'").is_err());
    }

    #[test]
    fn bare_text_beside_quotes_is_rejected() {
        assert!(tokenize("'a' b").is_err());
        assert!(tokenize("x'a'").is_err());
    }

    #[test]
    fn one_path_keeps_embedded_spaces() {
        assert_eq!(one_path("My Documents").unwrap(), "My Documents");
        assert_eq!(one_path("'My Documents'").unwrap(), "My Documents");
    }

    #[test]
    fn one_path_rejects_empty_and_double_spans() {
        assert!(one_path("").is_err());
        assert!(one_path("''").is_err());
        assert!(one_path("'a' 'b'").is_err());
    }

    #[test]
    fn two_paths_checks_arity() {
        assert!(two_paths("only").is_err());
        assert!(two_paths("a b c").is_err());
        assert!(two_paths("'only one'").is_err());
        // A doubled space leaves an empty positional token.
        assert!(two_paths("a  b").is_err());
    }
}
