//! Character-level tokenizer.
//!
//! The tokenizer tracks a single "inside angle brackets" flag. Text outside
//! brackets accumulates until a `<`; tag content accumulates until a `>`.
//! Every `>` ends a tag, even one that was never opened, so the text before
//! a stray `>` becomes tag content. A trailing unterminated tag is
//! discarded, trailing text is kept.

use std::collections::VecDeque;
use std::str::Chars;

use crate::token::Token;

/// Streaming tokenizer over a markup string.
pub struct Tokenizer<'a> {
    chars: Chars<'a>,
    buffer: String,
    in_tag: bool,
    pending: VecDeque<Token>,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over decoded markup.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars(),
            buffer: String::new(),
            in_tag: false,
            pending: VecDeque::new(),
            finished: false,
        }
    }

    fn flush_text(&mut self) {
        let text = std::mem::take(&mut self.buffer);
        if !text.is_empty() && !is_whitespace_only(&text) {
            self.pending.push_back(Token::Text(text));
        }
    }

    fn step(&mut self, c: char) {
        match c {
            '<' => {
                self.flush_text();
                self.in_tag = true;
            }
            '>' => {
                self.in_tag = false;
                let tag = std::mem::take(&mut self.buffer);
                self.pending.push_back(Token::Tag(tag));
            }
            _ => self.buffer.push(c),
        }
    }

    fn finish(&mut self) {
        self.finished = true;
        if self.in_tag {
            tracing::trace!(discarded = %self.buffer, "Unterminated tag at end of input");
            self.buffer.clear();
        } else {
            self.flush_text();
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            if self.finished {
                return None;
            }
            match self.chars.next() {
                Some(c) => self.step(c),
                None => self.finish(),
            }
        }
    }
}

/// Whether a text run consists only of whitespace.
pub fn is_whitespace_only(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Tokenize a whole string.
pub fn tokenize(input: &str) -> Vec<Token> {
    Tokenizer::new(input).collect()
}
