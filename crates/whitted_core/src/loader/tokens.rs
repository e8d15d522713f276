//! Whitespace-separated token stream with line tracking.

use std::collections::VecDeque;
use std::str::FromStr;

use super::{LoadError, LoadResult};

/// Tokens of a text file, each tagged with its 1-based line number.
pub(crate) struct Tokens<'a> {
    tokens: VecDeque<(usize, &'a str)>,
    last_line: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(content: &'a str) -> Self {
        let tokens: VecDeque<_> = content
            .lines()
            .enumerate()
            .flat_map(|(i, line)| line.split_whitespace().map(move |tok| (i + 1, tok)))
            .collect();

        Self {
            tokens,
            last_line: content.lines().count().max(1),
        }
    }

    /// Line of the next token, or of the end of input.
    pub fn line(&self) -> usize {
        self.tokens.front().map_or(self.last_line, |&(line, _)| line)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn peek(&self) -> Option<&'a str> {
        self.tokens.front().map(|&(_, tok)| tok)
    }

    /// Next token, failing at end of input with `expected` in the message.
    pub fn next_token(&mut self, expected: &'static str) -> LoadResult<(usize, &'a str)> {
        self.tokens.pop_front().ok_or(LoadError::UnexpectedEof {
            line: self.last_line,
            expected,
        })
    }

    /// Parse the next token as `T`.
    pub fn next_value<T: FromStr>(&mut self, expected: &'static str) -> LoadResult<T> {
        let (line, tok) = self.next_token(expected)?;
        tok.parse().map_err(|_| LoadError::InvalidNumber {
            line,
            token: tok.to_string(),
            expected,
        })
    }

    pub fn next_f64(&mut self, expected: &'static str) -> LoadResult<f64> {
        self.next_value(expected)
    }

    /// Three consecutive numbers.
    pub fn next_triple(&mut self, expected: &'static str) -> LoadResult<[f64; 3]> {
        Ok([
            self.next_f64(expected)?,
            self.next_f64(expected)?,
            self.next_f64(expected)?,
        ])
    }

    /// Consume a record tag, failing if it is not `tag`.
    pub fn expect_tag(&mut self, tag: &'static str) -> LoadResult<()> {
        let (line, tok) = self.next_token(tag)?;
        if tok == tag {
            Ok(())
        } else {
            Err(LoadError::UnexpectedTag {
                line,
                found: tok.to_string(),
                expected: tag,
            })
        }
    }
}
