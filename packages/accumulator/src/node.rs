//! Node Module
//!
//! Arena-backed tree nodes for an accumulated message.
//! Every node lives in a `NodeArena` and is addressed by a `NodeId`; the
//! parent link is a plain id used for navigation only.

use crate::whitespace::is_blank_text;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Handle to a node inside a `NodeArena`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

bitflags! {
    /// State carried by a component node
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ComponentFlags: u8 {
        /// Survives minimization unconditionally
        const KEEP = 0b01;
        /// A matching `pop` was seen
        const CLOSED = 0b10;
    }
}

/// Which side of a component a flattened entry stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    Start,
    End,
    /// A childless component, opened and closed at once
    StartEnd,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Component<E> {
    pub index: u32,
    pub extra: Option<E>,
    pub flags: ComponentFlags,
}

impl<E> Component<E> {
    pub fn new(index: u32, extra: Option<E>, keep: bool) -> Self {
        let flags = if keep {
            ComponentFlags::KEEP
        } else {
            ComponentFlags::empty()
        };
        Component { index, extra, flags }
    }

    pub fn keep(&self) -> bool {
        self.flags.contains(ComponentFlags::KEEP)
    }

    pub fn closed(&self) -> bool {
        self.flags.contains(ComponentFlags::CLOSED)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param<E> {
    pub index: u32,
    pub extra: Option<E>,
}

impl<E> Param<E> {
    pub fn new(index: u32, extra: Option<E>) -> Self {
        Param { index, extra }
    }
}

/// Enum representing all possible message node types
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind<E> {
    Root,
    Text(String),
    Component(Component<E>),
    Param(Param<E>),
}

#[derive(Debug, Clone)]
pub struct Node<E> {
    pub kind: NodeKind<E>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl<E> Node<E> {
    fn new(kind: NodeKind<E>, parent: Option<NodeId>) -> Self {
        Node {
            kind,
            parent,
            children: Vec::new(),
        }
    }

    /// `None` for the root and for nodes the minimizer detached
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn component(&self) -> Option<&Component<E>> {
        match &self.kind {
            NodeKind::Component(component) => Some(component),
            _ => None,
        }
    }

    pub fn param(&self) -> Option<&Param<E>> {
        match &self.kind {
            NodeKind::Param(param) => Some(param),
            _ => None,
        }
    }

    /// Metadata of a component or param
    pub fn extra(&self) -> Option<&E> {
        match &self.kind {
            NodeKind::Component(component) => component.extra.as_ref(),
            NodeKind::Param(param) => param.extra.as_ref(),
            _ => None,
        }
    }
}

/// Owner of every node of one message tree. Slot 0 is always the root.
#[derive(Debug, Clone)]
pub struct NodeArena<E> {
    nodes: Vec<Node<E>>,
}

impl<E> Default for NodeArena<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> NodeArena<E> {
    pub fn new() -> Self {
        NodeArena {
            nodes: vec![Node::new(NodeKind::Root, None)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn get(&self, id: NodeId) -> &Node<E> {
        &self.nodes[id.0]
    }

    /// Number of allocated nodes, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the parent chain from `id` reaches the root
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(node) = cursor {
            if node == self.root() {
                return true;
            }
            cursor = self.nodes[node.0].parent;
        }
        false
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node<E> {
        &mut self.nodes[id.0]
    }

    /// Allocates a node and appends it to `parent`'s children
    pub(crate) fn append(&mut self, parent: NodeId, kind: NodeKind<E>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Replaces the children of `id`, detaching the previous ones
    pub(crate) fn set_children(&mut self, id: NodeId, children: Vec<NodeId>) {
        let previous = std::mem::replace(&mut self.nodes[id.0].children, children);
        for child in previous {
            self.nodes[child.0].parent = None;
        }
        let adopted = self.nodes[id.0].children.clone();
        for child in adopted {
            self.nodes[child.0].parent = Some(id);
        }
    }

    /// Takes the children out of `id`, leaving it childless
    pub(crate) fn take_children(&mut self, id: NodeId) -> Vec<NodeId> {
        std::mem::take(&mut self.nodes[id.0].children)
    }

    pub(crate) fn remove_child(&mut self, parent: NodeId, position: usize) -> NodeId {
        let child = self.nodes[parent.0].children.remove(position);
        self.nodes[child.0].parent = None;
        child
    }

    /// Number of parent links between `id` and the root
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut cursor = self.nodes[id.0].parent;
        while let Some(parent) = cursor {
            depth += 1;
            cursor = self.nodes[parent.0].parent;
        }
        depth
    }

    /// Depth-first linearization of the subtree at `id`.
    ///
    /// A component with children yields a `Start` entry, its descendants, then
    /// an `End` entry; a childless component yields a single `StartEnd` entry.
    /// Text and params carry no boundary. The root itself is not yielded.
    pub fn flatten(&self, id: NodeId) -> Vec<(NodeId, Option<Boundary>)> {
        let mut out = Vec::new();
        match self.nodes[id.0].kind {
            NodeKind::Root => {
                for &child in &self.nodes[id.0].children {
                    self.flatten_into(child, &mut out);
                }
            }
            _ => self.flatten_into(id, &mut out),
        }
        out
    }

    fn flatten_into(&self, id: NodeId, out: &mut Vec<(NodeId, Option<Boundary>)>) {
        let node = &self.nodes[id.0];
        match node.kind {
            NodeKind::Component(_) if node.children.is_empty() => {
                out.push((id, Some(Boundary::StartEnd)));
            }
            NodeKind::Component(_) | NodeKind::Root => {
                out.push((id, Some(Boundary::Start)));
                for &child in &node.children {
                    self.flatten_into(child, out);
                }
                out.push((id, Some(Boundary::End)));
            }
            NodeKind::Text(_) | NodeKind::Param(_) => out.push((id, None)),
        }
    }

    /// True when the subtree carries nothing a translator would see.
    ///
    /// Params and `keep` components are never blank.
    pub fn is_blank(&self, id: NodeId) -> bool {
        let node = &self.nodes[id.0];
        match &node.kind {
            NodeKind::Text(value) => is_blank_text(value),
            NodeKind::Param(_) => false,
            NodeKind::Component(component) if component.keep() => false,
            NodeKind::Component(_) | NodeKind::Root => {
                node.children.iter().all(|&child| self.is_blank(child))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (NodeArena<&'static str>, NodeId) {
        let mut arena = NodeArena::new();
        let root = arena.root();
        arena.append(root, NodeKind::Text("a ".to_string()));
        let bold = arena.append(root, NodeKind::Component(Component::new(0, Some("b"), false)));
        arena.append(bold, NodeKind::Text("bold".to_string()));
        arena.append(bold, NodeKind::Component(Component::new(1, None, false)));
        arena.append(root, NodeKind::Param(Param::new(0, Some("p"))));
        (arena, bold)
    }

    #[test]
    fn test_flatten_markers() {
        let (arena, bold) = sample();
        let markers: Vec<Option<Boundary>> =
            arena.flatten(arena.root()).into_iter().map(|(_, b)| b).collect();
        assert_eq!(
            markers,
            vec![
                None,
                Some(Boundary::Start),
                None,
                Some(Boundary::StartEnd),
                Some(Boundary::End),
                None,
            ]
        );
        assert_eq!(arena.flatten(bold).first(), Some(&(bold, Some(Boundary::Start))));
    }

    #[test]
    fn test_depth_and_parent() {
        let (arena, bold) = sample();
        let nested = arena.get(bold).children()[1];
        assert_eq!(arena.depth(arena.root()), 0);
        assert_eq!(arena.depth(bold), 1);
        assert_eq!(arena.depth(nested), 2);
        assert_eq!(arena.get(nested).parent(), Some(bold));
    }

    #[test]
    fn test_is_blank() {
        let mut arena: NodeArena<()> = NodeArena::new();
        let root = arena.root();
        let outer = arena.append(root, NodeKind::Component(Component::new(0, None, false)));
        arena.append(outer, NodeKind::Text(" \n\t".to_string()));
        let inner = arena.append(outer, NodeKind::Component(Component::new(1, None, false)));
        assert!(arena.is_blank(outer));

        arena.append(inner, NodeKind::Param(Param::new(0, None)));
        assert!(!arena.is_blank(outer));

        let kept = arena.append(root, NodeKind::Component(Component::new(2, None, true)));
        assert!(!arena.is_blank(kept));
    }

    #[test]
    fn test_set_children_detaches_previous() {
        let (mut arena, bold) = sample();
        let root = arena.root();
        let moved = arena.take_children(bold);
        arena.set_children(root, moved.clone());
        assert_eq!(arena.get(bold).parent(), None);
        for child in moved {
            assert_eq!(arena.get(child).parent(), Some(root));
        }
    }

    #[test]
    fn test_attachment_and_len() {
        let (mut arena, bold) = sample();
        assert_eq!(arena.len(), 6);
        let text = arena.get(bold).children()[0];
        assert!(arena.is_attached(text));

        let root = arena.root();
        arena.remove_child(root, 1);
        assert!(!arena.is_attached(bold));
        assert!(!arena.is_attached(text));
        assert!(arena.is_attached(root));
        // detached nodes stay allocated
        assert_eq!(arena.len(), 6);
    }
}
