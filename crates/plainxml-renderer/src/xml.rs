//! Append-only XML output buffer.
//!
//! All attribute quoting, attribute escaping and comment sanitizing goes
//! through [`XmlBuilder`]. Element content passed to [`XmlBuilder::raw`] is
//! already-rendered markup and is written verbatim.

use std::borrow::Cow;
use std::fmt::Write;

use quick_xml::escape::escape;

/// Namespace of the embedded XHTML vocabulary.
pub const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

pub(crate) struct XmlBuilder {
    out: String,
    escape_attributes: bool,
}

impl XmlBuilder {
    pub(crate) fn new(escape_attributes: bool) -> Self {
        Self {
            out: String::with_capacity(256),
            escape_attributes,
        }
    }

    /// Write `<tag a="v" ...>`.
    pub(crate) fn start(&mut self, tag: &str, attrs: &[(&str, &str)]) -> &mut Self {
        self.out.push('<');
        self.out.push_str(tag);
        self.attributes(attrs);
        self.out.push('>');
        self
    }

    /// Write `</tag>`.
    pub(crate) fn end(&mut self, tag: &str) -> &mut Self {
        write!(self.out, "</{tag}>").unwrap();
        self
    }

    /// Write a self-closing `<tag a="v" ... />`.
    pub(crate) fn empty(&mut self, tag: &str, attrs: &[(&str, &str)]) -> &mut Self {
        self.out.push('<');
        self.out.push_str(tag);
        self.attributes(attrs);
        self.out.push_str(" />");
        self
    }

    /// Write `<!-- text -->`.
    pub(crate) fn comment(&mut self, text: &str) -> &mut Self {
        write!(self.out, "<!-- {} -->", sanitize_comment(text)).unwrap();
        self
    }

    /// Write pre-rendered markup verbatim.
    pub(crate) fn raw(&mut self, markup: &str) -> &mut Self {
        self.out.push_str(markup);
        self
    }

    /// Write pre-rendered markup followed by a newline, unless it is empty.
    pub(crate) fn line(&mut self, markup: &str) -> &mut Self {
        if !markup.is_empty() {
            self.out.push_str(markup);
            self.out.push('\n');
        }
        self
    }

    pub(crate) fn newline(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    fn attributes(&mut self, attrs: &[(&str, &str)]) {
        for (name, value) in attrs {
            let value = if self.escape_attributes {
                escape(*value)
            } else {
                Cow::Borrowed(*value)
            };
            write!(self.out, r#" {name}="{value}""#).unwrap();
        }
    }
}

/// Make `text` safe inside a comment: `--` may not appear in comment text.
fn sanitize_comment(text: &str) -> Cow<'_, str> {
    if !text.contains("--") {
        return Cow::Borrowed(text);
    }
    let mut sanitized = text.to_owned();
    while sanitized.contains("--") {
        sanitized = sanitized.replace("--", "- -");
    }
    Cow::Owned(sanitized)
}
