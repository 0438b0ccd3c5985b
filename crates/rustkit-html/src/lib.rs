//! # RustKit HTML
//!
//! Tolerant HTML tokenizer and tree builder.
//!
//! Parsing never fails: every malformed-markup case has a defined recovery
//! and the result is always rooted at an `html` element with implicit
//! `head`/`body` structure. The builder writes into any [`TreeSink`];
//! `rustkit-dom` provides the arena document used by the rest of the engine.
//!
//! ```
//! use rustkit_html::{tokenize, Token};
//!
//! let tokens = tokenize("<b>bold</b>");
//! assert_eq!(tokens[1], Token::Text("bold".to_string()));
//! ```

pub mod token;
pub mod tokenizer;
pub mod tree_builder;

use std::collections::HashSet;

use lazy_static::lazy_static;

pub use token::{TagData, Token};
pub use tokenizer::{tokenize, Tokenizer};
pub use tree_builder::{TreeBuilder, TreeSink};

lazy_static! {
    /// Elements that never have children and are never pushed on the stack.
    static ref SELF_CLOSING_TAGS: HashSet<&'static str> = [
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
        "source", "track", "wbr",
    ]
    .into_iter()
    .collect();

    /// Elements that belong in `head` when no `body` has been opened yet.
    static ref HEAD_TAGS: HashSet<&'static str> = [
        "base", "basefont", "bgsound", "noscript", "link", "meta", "title", "style", "script",
    ]
    .into_iter()
    .collect();
}

/// Whether `name` is a void element.
pub fn is_self_closing(name: &str) -> bool {
    SELF_CLOSING_TAGS.contains(name)
}

/// Whether `name` is implicitly placed inside `head`.
pub fn is_head_tag(name: &str) -> bool {
    HEAD_TAGS.contains(name)
}

/// Tokenize `markup` and build a tree into `sink`.
///
/// Returns the sink together with the handle of the root `html` element.
pub fn parse_into<S: TreeSink>(markup: &str, sink: S) -> (S, S::Handle) {
    let mut builder = TreeBuilder::new(sink);
    for token in Tokenizer::new(markup) {
        builder.process_token(token);
    }
    builder.finish()
}
