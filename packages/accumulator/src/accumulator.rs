//! Accumulator Module
//!
//! The message tree and its incremental builder. A caller walking its own
//! source representation pushes a component whenever it enters a span of
//! markup, adds text and params inside it, and pops when it leaves.

use crate::config::{AccumulatorOptions, UnbalancedPopStrategy};
use crate::diagnostics::{DiagnosticSink, LogLevel, TracingSink};
use crate::error::{AccumulatorError, Result};
use crate::minimizer::MinimizeState;
use crate::node::{Component, ComponentFlags, Node, NodeArena, NodeId, NodeKind, Param};
use crate::whitespace;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

pub(crate) fn component_key(index: u32) -> String {
    format!("c{}", index)
}

pub(crate) fn param_key(index: u32) -> String {
    format!("p{}", index)
}

/// A translatable message with its components and params, stored as a tree.
///
/// `E` is the caller's metadata for each component or param. The tree never
/// inspects it; use a reference or a cheap handle type when the metadata is
/// owned elsewhere.
#[derive(Clone)]
pub struct MessageAccumulator<E> {
    pub(crate) arena: NodeArena<E>,
    current: NodeId,
    component_index: u32,
    param_index: u32,
    pub(crate) text: String,
    pub(crate) mapping: IndexMap<String, E>,
    options: AccumulatorOptions,
    pub(crate) sink: Arc<dyn DiagnosticSink>,
    unbalanced_pops: usize,
    pub(crate) state: MinimizeState<E>,
}

impl<E> Default for MessageAccumulator<E> {
    fn default() -> Self {
        Self::with_options(AccumulatorOptions::default())
    }
}

impl<E: fmt::Debug> fmt::Debug for MessageAccumulator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageAccumulator")
            .field("arena", &self.arena)
            .field("current", &self.current)
            .field("component_index", &self.component_index)
            .field("param_index", &self.param_index)
            .field("mapping", &self.mapping)
            .field("options", &self.options)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<E> MessageAccumulator<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: AccumulatorOptions) -> Self {
        let arena = NodeArena::new();
        let current = arena.root();
        MessageAccumulator {
            arena,
            current,
            component_index: 0,
            param_index: 0,
            text: String::new(),
            mapping: IndexMap::new(),
            options,
            sink: Arc::new(TracingSink),
            unbalanced_pops: 0,
            state: MinimizeState::Unminimized,
        }
    }

    /// Replaces the diagnostic sink
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn options(&self) -> &AccumulatorOptions {
        &self.options
    }

    /// Add text to the current context.
    ///
    /// Passing `None` is a no-op. An empty string still creates an (empty)
    /// text node.
    pub fn add_text<'t>(&mut self, text: impl Into<Option<&'t str>>) {
        let Some(text) = text.into() else {
            return;
        };
        let value = if self.options.collapse_whitespace {
            whitespace::collapse(text)
        } else {
            text.to_string()
        };
        self.arena.append(self.current, NodeKind::Text(value));
        self.text.push_str(text);
    }

    // Accessors

    pub fn root(&self) -> NodeId {
        self.arena.root()
    }

    /// The context new nodes are added to: the root or an open component
    pub fn current(&self) -> NodeId {
        self.current
    }

    /// Move the context to the nearest ancestor still reachable from the
    /// root. Minimizing can detach the component that was open.
    pub(crate) fn reattach_current(&mut self) {
        let mut cursor = Some(self.current);
        while let Some(id) = cursor {
            if self.arena.is_attached(id) {
                self.current = id;
                return;
            }
            cursor = self.arena.get(id).parent();
        }
        self.current = self.arena.root();
    }

    pub fn node(&self, id: NodeId) -> &Node<E> {
        self.arena.get(id)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.arena.get(id).children()
    }

    pub fn arena(&self) -> &NodeArena<E> {
        &self.arena
    }

    /// Number of non-whitespace characters of all text ever added.
    ///
    /// Components and params do not count, and minimization does not
    /// change the result.
    pub fn get_text_length(&self) -> usize {
        whitespace::non_whitespace_len(&self.text)
    }

    /// Depth of the current context; 0 at the root
    pub fn get_current_level(&self) -> usize {
        self.arena.depth(self.current)
    }

    /// True when no component has ever been pushed onto this accumulator.
    ///
    /// This is a property of the accumulator's history, not of the current
    /// context: after a push and a matching pop it stays false. Parsed
    /// components do not count as pushed.
    pub fn is_root(&self) -> bool {
        self.component_index == 0
    }

    pub fn get_extra(&self, index: u32) -> Option<&E> {
        self.mapping.get(&component_key(index))
    }

    pub fn get_param(&self, index: u32) -> Option<&E> {
        self.mapping.get(&param_key(index))
    }

    /// Mapping from `"c<N>"`/`"p<N>"` to the metadata given for that node
    pub fn get_mapping(&self) -> &IndexMap<String, E> {
        &self.mapping
    }

    /// Number of `pop` calls made with no open component
    pub fn unbalanced_pops(&self) -> usize {
        self.unbalanced_pops
    }

    pub(crate) fn report(&self, level: LogLevel, msg: impl FnOnce() -> String) {
        if !self.sink.is_enabled(level) {
            return;
        }
        let msg = msg();
        match level {
            LogLevel::Debug => self.sink.debug(&msg),
            LogLevel::Info => self.sink.info(&msg),
            LogLevel::Warn => self.sink.warn(&msg),
            LogLevel::Error => self.sink.error(&msg),
        }
    }
}

impl<E: Clone> MessageAccumulator<E> {
    /// Open a new component in the current context and make it current
    pub fn push(&mut self, extra: impl Into<Option<E>>) -> NodeId {
        self.push_component(extra, false)
    }

    /// Like `push`; a `keep` component is never stripped by the minimizer
    pub fn push_component(&mut self, extra: impl Into<Option<E>>, keep: bool) -> NodeId {
        let extra = extra.into();
        let index = self.component_index;
        self.component_index += 1;

        if let Some(extra) = &extra {
            self.mapping.insert(component_key(index), extra.clone());
        }
        let id = self
            .arena
            .append(self.current, NodeKind::Component(Component::new(index, extra, keep)));
        self.current = id;
        id
    }

    /// Add a substitution param leaf to the current context
    pub fn add_param(&mut self, extra: impl Into<Option<E>>) -> NodeId {
        let extra = extra.into();
        let index = self.param_index;
        self.param_index += 1;

        if let Some(extra) = &extra {
            self.mapping.insert(param_key(index), extra.clone());
        }
        self.arena
            .append(self.current, NodeKind::Param(Param::new(index, extra)))
    }

    /// Close the current component and return its metadata.
    ///
    /// With no open component this does nothing, returns `None` and reports
    /// the unbalanced pop according to the configured strategy.
    pub fn pop(&mut self) -> Option<E> {
        self.close_current().unwrap_or(None)
    }

    /// Like `pop`, but fails under `UnbalancedPopStrategy::Error`
    pub fn try_pop(&mut self) -> Result<Option<E>> {
        self.close_current()
    }

    fn close_current(&mut self) -> Result<Option<E>> {
        let Some(parent) = self.arena.get(self.current).parent() else {
            self.unbalanced_pops += 1;
            let count = self.unbalanced_pops;
            let describe = || format!("unbalanced pop #{}: no component is open", count);
            return match self.options.unbalanced_pop {
                UnbalancedPopStrategy::Ignore => Ok(None),
                UnbalancedPopStrategy::Warning => {
                    self.report(LogLevel::Warn, describe);
                    Ok(None)
                }
                UnbalancedPopStrategy::Error => {
                    self.report(LogLevel::Error, describe);
                    Err(AccumulatorError::UnbalancedPop { count })
                }
            };
        };

        let closed = self.current;
        self.current = parent;
        match &mut self.arena.get_mut(closed).kind {
            NodeKind::Component(component) => {
                component.flags.insert(ComponentFlags::CLOSED);
                Ok(component.extra.clone())
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys() {
        assert_eq!(component_key(3), "c3");
        assert_eq!(param_key(0), "p0");
    }

    #[test]
    fn test_counters_are_independent() {
        let mut ma: MessageAccumulator<u32> = MessageAccumulator::new();
        ma.add_param(10);
        let c = ma.push(20);
        let p = ma.add_param(30);
        assert_eq!(ma.node(c).component().map(|c| c.index), Some(0));
        assert_eq!(ma.node(p).param().map(|p| p.index), Some(1));
        assert_eq!(ma.node(p).parent(), Some(c));
    }

    #[test]
    fn test_collapse_whitespace_option() {
        let options = AccumulatorOptions {
            collapse_whitespace: true,
            ..Default::default()
        };
        let mut ma: MessageAccumulator<()> = MessageAccumulator::with_options(options);
        ma.add_text("  two\n\n words ");
        let first = ma.children(ma.root())[0];
        assert_eq!(ma.node(first).text(), Some(" two words "));
        assert_eq!(ma.get_text_length(), 8);
    }
}
