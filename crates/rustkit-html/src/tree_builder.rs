//! Tree construction with an explicit open-element stack.
//!
//! The builder never fails. Missing `html`/`head`/`body` elements are
//! synthesized before every token, stray closing tags are ignored, and any
//! elements still open at end of input are closed bottom-up.

use tracing::{debug, trace};

use crate::token::{TagData, Token};
use crate::{is_head_tag, is_self_closing};

/// Destination for the nodes produced by a [`TreeBuilder`].
///
/// Elements are created with their parent already known but are attached to
/// it only once they are finished, so children land in document order.
pub trait TreeSink {
    /// Opaque handle to an element created by this sink.
    type Handle: Copy;

    /// Create an element whose parent is `parent` (`None` for the root).
    fn create_element(
        &mut self,
        name: &str,
        attributes: Vec<(String, String)>,
        parent: Option<Self::Handle>,
    ) -> Self::Handle;

    /// Append a finished element to `parent`'s children.
    fn append_child(&mut self, parent: Self::Handle, child: Self::Handle);

    /// Append a text node to `parent`'s children.
    fn append_text(&mut self, parent: Self::Handle, text: String);
}

struct OpenElement<H> {
    handle: H,
    name: String,
}

enum Implied {
    Open(&'static str),
    Close(&'static str),
}

/// Incremental tree builder driven by [`Token`]s.
pub struct TreeBuilder<S: TreeSink> {
    sink: S,
    unfinished: Vec<OpenElement<S::Handle>>,
}

impl<S: TreeSink> TreeBuilder<S> {
    /// Create a builder writing into `sink`.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            unfinished: Vec::new(),
        }
    }

    /// Names of the currently open elements, outermost first.
    pub fn open_elements(&self) -> impl Iterator<Item = &str> {
        self.unfinished.iter().map(|open| open.name.as_str())
    }

    /// Process one token.
    pub fn process_token(&mut self, token: Token) {
        trace!(?token, "Processing token");
        match token {
            Token::Text(text) => self.add_text(text),
            Token::Tag(raw) => match TagData::parse(&raw) {
                Some(tag) => self.add_tag(tag),
                None => trace!("Dropping empty tag"),
            },
        }
    }

    fn current(&self) -> Option<S::Handle> {
        self.unfinished.last().map(|open| open.handle)
    }

    fn add_text(&mut self, text: String) {
        if crate::tokenizer::is_whitespace_only(&text) {
            return;
        }
        self.implicit_tags(None);
        if let Some(parent) = self.current() {
            self.sink.append_text(parent, text);
        }
    }

    fn add_tag(&mut self, tag: TagData) {
        if tag.is_declaration() {
            trace!(name = %tag.name, "Discarding markup declaration");
            return;
        }
        self.implicit_tags(Some(&tag.name));

        if tag.is_close() {
            if self.unfinished.len() <= 1 {
                debug!(name = %tag.name, "Ignoring stray closing tag");
                return;
            }
            self.close_current();
        } else if is_self_closing(&tag.name) {
            if let Some(parent) = self.current() {
                let node = self
                    .sink
                    .create_element(&tag.name, tag.attributes, Some(parent));
                self.sink.append_child(parent, node);
            }
        } else {
            let parent = self.current();
            let handle = self.sink.create_element(&tag.name, tag.attributes, parent);
            self.unfinished.push(OpenElement {
                handle,
                name: tag.name,
            });
        }
    }

    /// Pop the current element and attach it to the new current element.
    fn close_current(&mut self) {
        if let Some(node) = self.unfinished.pop() {
            if let Some(parent) = self.current() {
                self.sink.append_child(parent, node.handle);
            }
        }
    }

    fn implied(&self, tag: Option<&str>) -> Option<Implied> {
        let open: Vec<&str> = self.open_elements().collect();
        match open.as_slice() {
            [] if tag != Some("html") => Some(Implied::Open("html")),
            ["html"] if !matches!(tag, Some("head" | "body" | "/html")) => {
                if tag.is_some_and(is_head_tag) {
                    Some(Implied::Open("head"))
                } else {
                    Some(Implied::Open("body"))
                }
            }
            ["html", "head"] if !(tag == Some("/head") || tag.is_some_and(is_head_tag)) => {
                Some(Implied::Close("/head"))
            }
            _ => None,
        }
    }

    /// Synthesize missing structural tags until the stack is stable for `tag`.
    fn implicit_tags(&mut self, tag: Option<&str>) {
        while let Some(implied) = self.implied(tag) {
            let name = match implied {
                Implied::Open(name) | Implied::Close(name) => name,
            };
            debug!(implied = name, before = ?tag, "Inserting implicit tag");
            self.add_tag(TagData::new(name));
        }
    }

    /// Close everything still open and return the sink with the root element.
    pub fn finish(mut self) -> (S, S::Handle) {
        if self.unfinished.is_empty() {
            self.add_tag(TagData::new("html"));
        }
        while self.unfinished.len() > 1 {
            self.close_current();
        }
        let root = match self.unfinished.pop() {
            Some(root) => root.handle,
            // `add_tag("html")` on an empty stack always pushes.
            None => unreachable!("tree builder finished without a root element"),
        };
        (self.sink, root)
    }
}
