// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Minimal element tree over `quick-xml` events, plus the response envelope.
//!
//! Responses are small, so the body is parsed into an owned [`Element`]
//! tree and the record mappers walk it with [`Element::child`],
//! [`Element::children`] and [`Element::attr`].

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::str::FromStr;

/// An XML element: local name, attributes, child elements and text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| Error::malformed(e.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| Error::malformed(e.to_string()))?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
        })
    }

    /// Parse a whole document and return its root element.
    pub fn parse(body: &str) -> Result<Self> {
        let mut reader = Reader::from_str(body);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root = None;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| Error::malformed(format!("invalid XML: {e}")))?;
            match event {
                Event::Start(start) => stack.push(Self::from_start(&start)?),
                Event::Empty(start) => {
                    let element = Self::from_start(&start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| Error::malformed("unbalanced closing tag"))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        let text = text
                            .unescape()
                            .map_err(|e| Error::malformed(e.to_string()))?;
                        current.text.push_str(&text);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        current
                            .text
                            .push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(Error::malformed("unexpected end of document"));
        }
        root.ok_or_else(|| Error::malformed("empty document"))
    }

    // ── lookups ───────────────────────────────────────────────────────

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value; `None` if absent or empty.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
    }

    /// First child element with this name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// All child elements with this name, in document order.
    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// All child elements.
    pub fn elements(&self) -> &[Element] {
        &self.children
    }

    /// Text content; `None` if empty.
    pub fn text(&self) -> Option<&str> {
        Some(self.text.as_str()).filter(|text| !text.is_empty())
    }

    /// Text of the named child.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(Element::text)
    }

    // ── typed helpers ─────────────────────────────────────────────────

    /// Parse an attribute, skipping values that do not parse.
    pub(crate) fn attr_lenient<T: FromStr>(&self, name: &str) -> Option<T> {
        self.attr(name).and_then(|value| value.parse().ok())
    }

    /// Parse an attribute, reporting a present but unparsable value.
    pub(crate) fn attr_parsed<T: FromStr>(&self, name: &str) -> Result<Option<T>> {
        self.attr(name)
            .map(|value| parse_field(&self.name, name, value))
            .transpose()
    }

    /// Parse the text of a child, reporting a present but unparsable value.
    pub(crate) fn child_parsed<T: FromStr>(&self, name: &str) -> Result<Option<T>> {
        self.child_text(name)
            .map(|value| parse_field(&self.name, name, value.trim()))
            .transpose()
    }

    /// Map an attribute through a fallible parser.
    pub(crate) fn attr_with<T, E, F>(&self, name: &str, parse: F) -> Result<Option<T>>
    where
        F: FnOnce(&str) -> std::result::Result<T, E>,
        E: std::fmt::Display,
    {
        self.attr(name)
            .map(|value| {
                parse(value).map_err(|e| {
                    Error::malformed(format!("<{}> attribute '{name}': {e}", self.name))
                })
            })
            .transpose()
    }

    /// Map the text of a child through a fallible parser.
    pub(crate) fn child_with<T, E, F>(&self, name: &str, parse: F) -> Result<Option<T>>
    where
        F: FnOnce(&str) -> std::result::Result<T, E>,
        E: std::fmt::Display,
    {
        self.child_text(name)
            .map(|value| {
                parse(value.trim()).map_err(|e| {
                    Error::malformed(format!("<{}> child <{name}>: {e}", self.name))
                })
            })
            .transpose()
    }

    /// Map every child with this name into a record.
    pub(crate) fn map_children<T: FromElement>(&self, name: &str) -> Result<Vec<T>> {
        let items = self
            .children(name)
            .map(T::from_element)
            .collect::<Result<Vec<_>>>()?;
        tracing::trace!(parent = %self.name, element = name, count = items.len(), "mapped records");
        Ok(items)
    }
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(Error::malformed("more than one root element")),
    }
    Ok(())
}

fn parse_field<T: FromStr>(element: &str, field: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::malformed(format!("<{element}> field '{field}' has invalid value '{value}'")))
}

/// Records built from a response element.
pub(crate) trait FromElement: Sized {
    fn from_element(element: &Element) -> Result<Self>;
}

// ═══════════════════════════════════════════════════════════════════════════
// Envelope
// ═══════════════════════════════════════════════════════════════════════════

/// Reject documents without a `version` attribute or carrying `<error>`.
pub fn check_for_errors(root: &Element) -> Result<()> {
    if root.attr("version").is_none() {
        return Err(Error::malformed("Expected 'version' attribute in data node"));
    }
    if let Some(error) = root.child("error") {
        let message = error.text().unwrap_or("Unspecified error").to_owned();
        tracing::warn!(%message, "service reported an error");
        return Err(Error::Server(message));
    }
    Ok(())
}

/// Parse a response body and check its envelope.
pub fn parse_response(body: &str) -> Result<Element> {
    let root = Element::parse(body)?;
    check_for_errors(&root)?;
    Ok(root)
}
