//! Tag Parser Module
//!
//! Parses a tagged message string back into a tree:
//!
//! - `<cN>...</cN>` component with content, nestable
//! - `<cN/>` and `<cN></cN>` empty component
//! - `<pN/>` param
//! - anything else is literal text
//!
//! An opening `<cN>` closes at the next `</cN>` carrying the same number.
//! Nesting a component inside another one with the same number is not
//! supported. Tags that do not fit the grammar stay literal text.

use crate::accumulator::{component_key, param_key, MessageAccumulator};
use crate::diagnostics::LogLevel;
use crate::node::{Component, ComponentFlags, NodeId, NodeKind, Param};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LEADING_TAG: Regex = Regex::new(r"^<([cp])(\d+)(/?)>").unwrap();
}

/// A tag recognized at the start of the remaining input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Open { index: u32, len: usize },
    Empty { index: u32, len: usize },
    Param { index: u32, len: usize },
}

fn match_tag(input: &str) -> Option<Tag> {
    let caps = LEADING_TAG.captures(input)?;
    let len = caps.get(0)?.end();
    let index = caps[2].parse::<u32>().ok()?;
    let self_closing = !caps[3].is_empty();
    match (&caps[1], self_closing) {
        ("c", false) => Some(Tag::Open { index, len }),
        ("c", true) => Some(Tag::Empty { index, len }),
        ("p", true) => Some(Tag::Param { index, len }),
        _ => None,
    }
}

impl<E: Clone> MessageAccumulator<E> {
    /// Parse a tagged string into a new accumulator
    pub fn create(input: &str) -> Self {
        let mut ma = Self::new();
        ma.append_parsed(input, None);
        ma
    }

    /// Parse a translated string, taking each component's and param's
    /// metadata from `source` by number. Numbers missing from the source
    /// leave the metadata unset.
    pub fn create_with_source(input: &str, source: &MessageAccumulator<E>) -> Self {
        Self::create_with_mapping(input, source.get_mapping())
    }

    pub fn create_with_mapping(input: &str, mapping: &IndexMap<String, E>) -> Self {
        let mut ma = Self::new();
        ma.append_parsed(input, Some(mapping));
        ma
    }

    /// Parse `input` and append the resulting nodes to the current context.
    ///
    /// Parsed text counts towards `get_text_length`. The builder's own
    /// component and param counters are left alone.
    pub fn append_parsed(&mut self, input: &str, mapping: Option<&IndexMap<String, E>>) {
        let parent = self.current();
        let before = self.arena.len();
        self.parse_span(parent, input, mapping);
        let added = self.arena.len() - before;
        self.report(LogLevel::Debug, || {
            format!("parsed {} byte(s) into {} node(s)", input.len(), added)
        });
    }

    fn parse_span(&mut self, parent: NodeId, input: &str, mapping: Option<&IndexMap<String, E>>) {
        let mut text_start = 0;
        let mut cursor = 0;

        while let Some(offset) = input[cursor..].find('<') {
            let at = cursor + offset;
            let Some(tag) = match_tag(&input[at..]) else {
                cursor = at + 1;
                continue;
            };

            let end = match tag {
                Tag::Open { index, len } => {
                    let close = format!("</c{}>", index);
                    let body_start = at + len;
                    let Some(body_len) = input[body_start..].find(&close) else {
                        // unterminated, keep it as text
                        cursor = at + 1;
                        continue;
                    };
                    self.parse_text(parent, &input[text_start..at]);
                    let id = self.parse_component(parent, index, mapping);
                    self.parse_span(id, &input[body_start..body_start + body_len], mapping);
                    body_start + body_len + close.len()
                }
                Tag::Empty { index, len } => {
                    self.parse_text(parent, &input[text_start..at]);
                    self.parse_component(parent, index, mapping);
                    at + len
                }
                Tag::Param { index, len } => {
                    self.parse_text(parent, &input[text_start..at]);
                    let extra = lookup(mapping, param_key(index));
                    if let Some(extra) = &extra {
                        self.mapping.insert(param_key(index), extra.clone());
                    }
                    self.arena.append(parent, NodeKind::Param(Param::new(index, extra)));
                    at + len
                }
            };
            text_start = end;
            cursor = end;
        }

        self.parse_text(parent, &input[text_start..]);
    }

    fn parse_component(
        &mut self,
        parent: NodeId,
        index: u32,
        mapping: Option<&IndexMap<String, E>>,
    ) -> NodeId {
        let extra = lookup(mapping, component_key(index));
        if let Some(extra) = &extra {
            self.mapping.insert(component_key(index), extra.clone());
        }
        let id = self
            .arena
            .append(parent, NodeKind::Component(Component::new(index, extra, false)));
        if let NodeKind::Component(component) = &mut self.arena.get_mut(id).kind {
            component.flags.insert(ComponentFlags::CLOSED);
        }
        id
    }

    fn parse_text(&mut self, parent: NodeId, text: &str) {
        // the parser never creates empty text nodes
        if text.is_empty() {
            return;
        }
        self.arena.append(parent, NodeKind::Text(text.to_string()));
        self.text.push_str(text);
    }
}

fn lookup<E: Clone>(mapping: Option<&IndexMap<String, E>>, key: String) -> Option<E> {
    mapping.and_then(|m| m.get(&key)).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_tag() {
        let cases = vec![
            ("<c0>rest", Some(Tag::Open { index: 0, len: 4 })),
            ("<c12/>", Some(Tag::Empty { index: 12, len: 6 })),
            ("<p3/>", Some(Tag::Param { index: 3, len: 5 })),
            ("<p3>", None),
            ("</c0>", None),
            ("<b>", None),
            ("<c99999999999>", None),
            ("< c0>", None),
        ];
        for (input, expected) in cases {
            assert_eq!(match_tag(input), expected, "Failed for input: {}", input);
        }
    }
}
