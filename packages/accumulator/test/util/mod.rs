#![allow(dead_code)]
#![allow(unused_imports)]

/**
 * Accumulator Test Utilities
 *
 * Shared builders and a tree humanizer for the integration tests
 */
use message_accumulator::{MessageAccumulator, NodeId, NodeKind};
use serde_json::{json, Value};

pub type Acc = MessageAccumulator<Value>;

/// `{"name": name}`, the metadata most tests attach to components
pub fn name(name: &str) -> Value {
    json!({ "name": name })
}

/// "You give <b>the ball</b> a big <i>kick</i> towards the goal." built into
/// the current context, `b` and `i` closed
pub fn add_ball_sentence(ma: &mut Acc) {
    ma.add_text("You give ");
    ma.push(name("b"));
    ma.add_text("the ball");
    ma.pop();
    ma.add_text(" a big ");
    ma.push(name("i"));
    ma.add_text("kick");
    ma.pop();
    ma.add_text(" towards the goal.");
}

/// The ball sentence wrapped in one outer component per name
pub fn wrapped_ball_sentence(outer: &[&str]) -> Acc {
    let mut ma = Acc::new();
    for n in outer {
        ma.push(name(n));
    }
    add_ball_sentence(&mut ma);
    for _ in outer {
        ma.pop();
    }
    ma
}

/// One row per node below `id`, depth first: `[kind, detail, depth]`
pub fn humanize(ma: &Acc, id: NodeId) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    humanize_into(ma, id, 0, &mut rows);
    rows
}

fn humanize_into(ma: &Acc, id: NodeId, depth: usize, rows: &mut Vec<Vec<String>>) {
    for &child in ma.children(id) {
        let row = match &ma.node(child).kind {
            NodeKind::Text(value) => vec!["Text".to_string(), value.clone()],
            NodeKind::Component(component) => {
                vec!["Component".to_string(), component.index.to_string()]
            }
            NodeKind::Param(param) => vec!["Param".to_string(), param.index.to_string()],
            NodeKind::Root => vec!["Root".to_string(), String::new()],
        };
        rows.push([row, vec![depth.to_string()]].concat());
        humanize_into(ma, child, depth + 1, rows);
    }
}

/// Shorthand for an expected `humanize` row
pub fn row(kind: &str, detail: &str, depth: usize) -> Vec<String> {
    vec![kind.to_string(), detail.to_string(), depth.to_string()]
}
