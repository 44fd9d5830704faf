// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Slot substitution over SVG templates.
//!
//! A slot is a `<tspan>` element carrying a stable `id` attribute. Only the
//! text between the opening and closing tag is ever rewritten, structural
//! markup is preserved byte for byte. Substitutions consume the document and
//! return the next state, so applying an ordered list of `(slot, value)`
//! pairs to the same original always yields the same result.

use std::borrow::Cow;

use regex::Regex;
use tracing::warn;

/// Element name that delimits replaceable slots.
const SLOT_ELEMENT: &str = "tspan";

/// In-memory SVG template whose slots can be rewritten.
///
/// # Examples
///
/// ```
/// use profile_svg::SvgDocument;
///
/// let document = SvgDocument::new(r#"<text><tspan id="star_data">0</tspan></text>"#,);
/// let updated = document.with_slot("star_data", "1,024",);
/// assert_eq!(updated.as_str(), r#"<text><tspan id="star_data">1,024</tspan></text>"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDocument {
    content: String
}

/// Byte offsets of a located slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpan {
    /// Offset of the `<` opening the slot element.
    pub element_start: usize,
    /// Offset of the first byte of the slot's inner text.
    pub inner_start:   usize,
    /// Offset one past the last byte of the slot's inner text.
    pub inner_end:     usize
}

/// Result of looking a slot up by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotLookup {
    /// The slot exists exactly once.
    Found(SlotSpan),
    /// No element carries the id.
    Missing,
    /// The id is carried by more than one element.
    Duplicate(usize)
}

impl SvgDocument {
    /// Wraps raw SVG text.
    pub fn new<S>(content: S) -> Self
    where
        S: Into<String>
    {
        Self {
            content: content.into()
        }
    }

    /// Borrows the current document text.
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Returns the current document text.
    pub fn into_string(self) -> String {
        self.content
    }

    /// Locates the slot identified by `id`.
    pub fn locate(&self, id: &str) -> SlotLookup {
        let Some(pattern) = slot_pattern(id) else {
            return SlotLookup::Missing;
        };

        let mut captures = pattern.captures_iter(&self.content);
        let Some(first) = captures.next() else {
            return SlotLookup::Missing;
        };

        let remaining = captures.count();
        if remaining > 0 {
            return SlotLookup::Duplicate(remaining + 1);
        }

        match (first.get(1), first.get(2)) {
            (Some(open), Some(inner)) => SlotLookup::Found(SlotSpan {
                element_start: open.start(),
                inner_start:   inner.start(),
                inner_end:     inner.end()
            }),
            _ => SlotLookup::Missing
        }
    }

    /// Returns the raw inner text of the slot, if it exists exactly once.
    pub fn slot_text(&self, id: &str) -> Option<&str> {
        match self.locate(id) {
            SlotLookup::Found(span) => Some(&self.content[span.inner_start..span.inner_end]),
            SlotLookup::Missing | SlotLookup::Duplicate(_) => None
        }
    }

    /// Replaces the inner text of slot `id` with the XML-escaped `value`.
    ///
    /// A missing or duplicated slot leaves the document untouched and logs a
    /// warning; the caller's remaining substitutions still apply.
    pub fn with_slot(self, id: &str, value: &str) -> Self {
        match self.locate(id) {
            SlotLookup::Found(span) => {
                let escaped = escape_xml(value);
                let mut content = String::with_capacity(
                    self.content.len() - (span.inner_end - span.inner_start) + escaped.len()
                );
                content.push_str(&self.content[..span.inner_start]);
                content.push_str(&escaped);
                content.push_str(&self.content[span.inner_end..]);
                Self {
                    content
                }
            }
            SlotLookup::Missing => {
                warn!("{SLOT_ELEMENT} id=\"{id}\" not found, slot left unchanged");
                self
            }
            SlotLookup::Duplicate(count) => {
                warn!("{SLOT_ELEMENT} id=\"{id}\" appears {count} times, slot left unchanged");
                self
            }
        }
    }

    /// Applies `(slot, value)` pairs in order.
    pub fn with_slots<'a, I>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>
    {
        pairs
            .into_iter()
            .fold(self, |document, (id, value)| document.with_slot(id, value))
    }
}

fn slot_pattern(id: &str) -> Option<Regex> {
    let source = format!(
        r#"(?s)(<{SLOT_ELEMENT}\b[^>]*\bid="{}"[^>]*>)(.*?)(</{SLOT_ELEMENT}>)"#,
        regex::escape(id)
    );
    Regex::new(&source).ok()
}

/// Escapes the characters that would otherwise change the markup structure.
pub fn escape_xml(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for character in value.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other)
        }
    }
    Cow::Owned(escaped)
}

/// Returns the text a reader sees for a markup fragment.
///
/// Tags are dropped, entities collapse to the character they encode, and
/// line breaks in the source together with the indentation that follows them
/// do not count as visible text.
pub fn visible_text(markup: &str) -> String {
    let mut stripped = String::with_capacity(markup.len());
    let mut in_tag = false;
    for character in markup.chars() {
        match character {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            other if !in_tag => stripped.push(other),
            _ => {}
        }
    }

    let mut joined = String::with_capacity(stripped.len());
    for (index, line) in stripped.split('\n').enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if index == 0 {
            joined.push_str(line);
        } else {
            joined.push_str(line.trim_start());
        }
    }

    decode_entities(&joined)
}

fn decode_entities(text: &str) -> String {
    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(position) = rest.find('&') {
        decoded.push_str(&rest[..position]);
        let candidate = &rest[position..];
        match candidate.find(';').filter(|end| *end <= 10) {
            Some(end) => match decode_entity(&candidate[1..end]) {
                Some(character) => {
                    decoded.push(character);
                    rest = &candidate[end + 1..];
                }
                None => {
                    decoded.push('&');
                    rest = &candidate[1..];
                }
            },
            None => {
                decoded.push('&');
                rest = &candidate[1..];
            }
        }
    }

    decoded.push_str(rest);
    decoded
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        numeric => {
            let digits = numeric.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse::<u32>().ok()?
            };
            char::from_u32(code)
        }
    }
}
