//! A structured editor core for mathematical expressions.
//!
//! Expressions are edited as [trees](node::Tree) rather than as text: fractions, powers, square
//! roots and matrices are nodes with slots, and the cursor moves between those slots. An
//! [EditSession] holds a tree, a cursor and a selection, and implements the editing operations;
//! a [Field] drives a session from input [events](event::Event).

#![no_std]
extern crate alloc;

pub mod error;
pub mod settings;
pub mod node;
pub mod nav;
pub mod selection;
pub mod parser;
pub mod render;
pub mod renderers;
pub mod clipboard;
pub mod event;
pub mod session;
pub mod field;

#[cfg(test)]
mod tests;

pub use crate::{
    error::{EditError, ParseError},
    field::{Field, FieldDelegate},
    node::{Fragment, NodeId, Token, Tree},
    session::{EditSession, EditState},
    settings::EditorSettings,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
