#![deny(clippy::all)]

/**
 * Message Accumulator
 *
 * Tree representation of a translatable message with embedded markup.
 * Build it while walking a source document, parse a translated tagged
 * string back into it, serialize it, and minimize it down to what a
 * translator actually needs to see.
 */

// Tree model
pub mod node;
pub mod whitespace;

// Configuration and diagnostics
pub mod config;
pub mod diagnostics;
pub mod error;

// Accumulator and its operations
mod accumulator;
mod minimizer;
mod parser;
mod serializer;

// Re-exports
pub use accumulator::MessageAccumulator;
pub use config::{AccumulatorOptions, UnbalancedPopStrategy};
pub use diagnostics::{CollectingSink, DiagnosticSink, LogLevel, NullSink, TracingSink};
pub use error::{AccumulatorError, Result};
pub use minimizer::Fragment;
pub use node::{Boundary, Component, ComponentFlags, Node, NodeArena, NodeId, NodeKind, Param};
pub use serializer::serialize;
