//! Interactive parameter prompts.
//!
//! Values are read as whitespace-delimited tokens, so `0 0 1` on one line
//! answers all three circle prompts at once.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::error::{SimError, SimResult};

/// Whitespace tokenizer over a line-oriented reader.
#[derive(Debug)]
pub struct TokenReader<R> {
    inner: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    /// Wrap a reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pending: VecDeque::new(),
        }
    }

    /// Next token, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the underlying reader fails.
    pub fn next_token(&mut self) -> SimResult<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.inner.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }
}

/// Prompt for each named value in turn and parse it as `f64`.
///
/// Each prompt is written as `Input <name>: ` without a newline.
///
/// # Errors
///
/// Returns `InvalidInput` when input ends early or a token is not a number.
pub fn prompt_values<R: BufRead, W: Write>(
    reader: &mut TokenReader<R>,
    prompt: &mut W,
    names: &[&str],
) -> SimResult<Vec<f64>> {
    let mut values = Vec::with_capacity(names.len());
    for name in names {
        write!(prompt, "Input {name}: ")?;
        prompt.flush()?;

        let token = reader
            .next_token()?
            .ok_or_else(|| SimError::invalid_input(*name, "unexpected end of input"))?;
        let value = token.parse::<f64>().map_err(|_| {
            SimError::invalid_input(*name, format!("expected a number, got '{token}'"))
        })?;
        values.push(value);
    }
    Ok(values)
}
