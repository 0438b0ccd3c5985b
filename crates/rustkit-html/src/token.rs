//! Tokens produced by the [`Tokenizer`](crate::Tokenizer) and the tag-content
//! parser that turns raw tag text into a name plus attributes.

/// A single token: a run of text outside angle brackets, or the raw content
/// between a `<` and its matching `>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Text content. Never whitespace-only.
    Text(String),
    /// Raw tag content without the surrounding brackets, e.g. `div class=x`.
    Tag(String),
}

/// A parsed tag: lower-cased name and attribute pairs in source order.
///
/// Closing tags keep their leading `/` in the name (`/div`), and markup
/// declarations keep their leading `!` so callers can discard them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagData {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl TagData {
    /// Create a tag with no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Parse raw tag content.
    ///
    /// Returns `None` for empty tags such as `<>` or `< >`.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split_whitespace();
        let name = parts.next()?;
        // Self-closing syntax (`<br/>`, `<img src=x />`) carries no meaning
        // here. Attribute values are never touched.
        let name = match name.strip_suffix('/') {
            Some(bare) if !bare.is_empty() => bare,
            _ => name,
        };
        let name = name.to_lowercase();

        let attributes = parts
            .filter(|&part| part != "/")
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) => (key.to_lowercase(), unquote(value).to_string()),
                None => (pair.to_lowercase(), String::new()),
            })
            .collect();

        Some(Self { name, attributes })
    }

    /// Whether this is a closing tag (`/name`).
    pub fn is_close(&self) -> bool {
        self.name.starts_with('/')
    }

    /// Whether this is a comment or doctype (`!name`).
    pub fn is_declaration(&self) -> bool {
        self.name.starts_with('!')
    }
}

/// Strip one pair of matching quotes from a value longer than two characters.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if value.chars().count() > 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
