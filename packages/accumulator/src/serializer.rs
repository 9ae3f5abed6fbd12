//! Serializer Module
//!
//! Renders a message tree as a tagged string. For trees produced by the
//! parser, parsing the output again yields the same string.

use crate::accumulator::MessageAccumulator;
use crate::node::{Boundary, NodeArena, NodeId, NodeKind};

/// Serialize the subtree at `id`, depth first, with no added whitespace
pub fn serialize<E>(arena: &NodeArena<E>, id: NodeId) -> String {
    let mut out = String::new();
    for (node, boundary) in arena.flatten(id) {
        match (&arena.get(node).kind, boundary) {
            (NodeKind::Text(value), _) => out.push_str(value),
            (NodeKind::Param(param), _) => out.push_str(&format!("<p{}/>", param.index)),
            (NodeKind::Component(component), Some(Boundary::Start)) => {
                out.push_str(&format!("<c{}>", component.index))
            }
            (NodeKind::Component(component), Some(Boundary::End)) => {
                out.push_str(&format!("</c{}>", component.index))
            }
            (NodeKind::Component(component), Some(Boundary::StartEnd)) => {
                out.push_str(&format!("<c{}/>", component.index))
            }
            _ => {}
        }
    }
    out
}

impl<E> MessageAccumulator<E> {
    /// The whole message as a tagged string.
    ///
    /// Once the accumulator has been minimized this is the minimal string.
    pub fn get_string(&self) -> String {
        serialize(&self.arena, self.arena.root())
    }

    pub fn serialize_node(&self, id: NodeId) -> String {
        serialize(&self.arena, id)
    }
}
