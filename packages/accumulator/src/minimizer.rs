//! Minimizer Module
//!
//! Strips the markup a translator does not need to see: components that wrap
//! the whole message, components at either edge that hold nothing but
//! whitespace, and whitespace at either edge. Everything removed is recorded
//! as prefix and suffix fragments so it can be put back around the
//! translated minimal string.
//!
//! Minimization rewrites the tree in place and cannot be undone. Clone the
//! accumulator first when both forms are needed.

use crate::accumulator::{component_key, param_key, MessageAccumulator};
use crate::diagnostics::LogLevel;
use crate::node::{Boundary, NodeId, NodeKind};
use crate::whitespace::{split_leading, split_trailing};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::VecDeque;

/// One piece of what the minimizer removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Fragment<E> {
    /// The start and/or end of a removed component
    Boundary {
        extra: Option<E>,
        #[serde(rename = "use")]
        usage: Boundary,
    },
    /// Removed text, usually whitespace
    Text { value: String },
}

impl<E> Fragment<E> {
    pub fn boundary(extra: Option<E>, usage: Boundary) -> Self {
        Fragment::Boundary { extra, usage }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Fragment::Text { value: value.into() }
    }

    pub fn extra(&self) -> Option<&E> {
        match self {
            Fragment::Boundary { extra, .. } => extra.as_ref(),
            Fragment::Text { .. } => None,
        }
    }

    pub fn usage(&self) -> Option<Boundary> {
        match self {
            Fragment::Boundary { usage, .. } => Some(*usage),
            Fragment::Text { .. } => None,
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Fragment::Text { value } => Some(value),
            Fragment::Boundary { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum MinimizeState<E> {
    Unminimized,
    Minimized {
        prefix: Vec<Fragment<E>>,
        suffix: Vec<Fragment<E>>,
    },
}

impl<E: Clone> MessageAccumulator<E> {
    /// Minimize the tree unless that already happened
    pub fn minimize(&mut self) {
        if self.is_minimized() {
            return;
        }
        let (prefix, suffix) = self.strip_edges();
        let kept = self.renumber();
        self.reattach_current();
        self.report(LogLevel::Debug, || {
            format!(
                "minimized message: {} prefix fragment(s), {} suffix fragment(s), {} component(s) kept",
                prefix.len(),
                suffix.len(),
                kept
            )
        });
        self.state = MinimizeState::Minimized { prefix, suffix };
    }

    pub fn is_minimized(&self) -> bool {
        matches!(self.state, MinimizeState::Minimized { .. })
    }

    /// The message without its decorative outer markup, components
    /// renumbered from 0
    pub fn get_minimal_string(&mut self) -> String {
        self.minimize();
        self.get_string()
    }

    /// Everything stripped from the start, in document order
    pub fn get_prefix(&mut self) -> &[Fragment<E>] {
        self.minimize();
        match &self.state {
            MinimizeState::Minimized { prefix, .. } => prefix.as_slice(),
            MinimizeState::Unminimized => &[],
        }
    }

    /// Everything stripped from the end, in document order
    pub fn get_suffix(&mut self) -> &[Fragment<E>] {
        self.minimize();
        match &self.state {
            MinimizeState::Minimized { suffix, .. } => suffix.as_slice(),
            MinimizeState::Unminimized => &[],
        }
    }

    fn strip_edges(&mut self) -> (Vec<Fragment<E>>, Vec<Fragment<E>>) {
        let root = self.arena.root();
        let mut prefix = Vec::new();
        let mut suffix = VecDeque::new();

        loop {
            let mut changed = false;

            // a single component wrapping everything
            loop {
                let only = match self.arena.get(root).children() {
                    [only] => *only,
                    _ => break,
                };
                let Some(component) = self.arena.get(only).component() else {
                    break;
                };
                if component.keep() {
                    break;
                }
                let extra = component.extra.clone();
                let inner = self.arena.take_children(only);
                if inner.is_empty() {
                    prefix.push(Fragment::boundary(extra, Boundary::StartEnd));
                } else {
                    prefix.push(Fragment::boundary(extra.clone(), Boundary::Start));
                    suffix.push_front(Fragment::boundary(extra, Boundary::End));
                }
                self.arena.set_children(root, inner);
                changed = true;
            }

            while let Some(&first) = self.arena.get(root).children().first() {
                if !self.arena.is_blank(first) {
                    break;
                }
                prefix.extend(self.fragments_of(first));
                self.arena.remove_child(root, 0);
                changed = true;
            }

            while let Some(&last) = self.arena.get(root).children().last() {
                if !self.arena.is_blank(last) {
                    break;
                }
                for fragment in self.fragments_of(last).into_iter().rev() {
                    suffix.push_front(fragment);
                }
                let position = self.arena.get(root).children().len() - 1;
                self.arena.remove_child(root, position);
                changed = true;
            }

            if !changed {
                break;
            }
        }

        if let Some(&first) = self.arena.get(root).children().first() {
            if let NodeKind::Text(value) = &mut self.arena.get_mut(first).kind {
                let (space, rest) = split_leading(value);
                let (space, rest) = (space.to_string(), rest.to_string());
                if !space.is_empty() {
                    prefix.push(Fragment::text(space));
                    *value = rest;
                }
            }
        }
        if let Some(&last) = self.arena.get(root).children().last() {
            if let NodeKind::Text(value) = &mut self.arena.get_mut(last).kind {
                let (rest, space) = split_trailing(value);
                let (rest, space) = (rest.to_string(), space.to_string());
                if !space.is_empty() {
                    suffix.push_front(Fragment::text(space));
                    *value = rest;
                }
            }
        }

        (prefix, suffix.into())
    }

    /// Fragments for a removed subtree, in document order. Empty text leaves
    /// no fragment behind.
    fn fragments_of(&self, id: NodeId) -> Vec<Fragment<E>> {
        self.arena
            .flatten(id)
            .into_iter()
            .filter_map(|(node, boundary)| match (&self.arena.get(node).kind, boundary) {
                (NodeKind::Text(value), _) if !value.is_empty() => Some(Fragment::text(value.clone())),
                (NodeKind::Component(component), Some(usage)) => {
                    Some(Fragment::boundary(component.extra.clone(), usage))
                }
                _ => None,
            })
            .collect()
    }

    /// Number the surviving components depth first from 0 and rebuild the
    /// mapping from the survivors. Returns the number of components kept.
    fn renumber(&mut self) -> u32 {
        let mut mapping = IndexMap::new();
        let mut next = 0;

        for (id, boundary) in self.arena.flatten(self.arena.root()) {
            match &mut self.arena.get_mut(id).kind {
                NodeKind::Component(component) if boundary != Some(Boundary::End) => {
                    component.index = next;
                    if let Some(extra) = &component.extra {
                        mapping.insert(component_key(next), extra.clone());
                    }
                    next += 1;
                }
                NodeKind::Param(param) => {
                    if let Some(extra) = &param.extra {
                        mapping.insert(param_key(param.index), extra.clone());
                    }
                }
                _ => {}
            }
        }

        self.mapping = mapping;
        next
    }
}
