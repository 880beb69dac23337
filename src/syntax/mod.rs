//! Source model: parse seam, typed declaration nodes, and the builder.
//!
//! The model is a cheap immutable snapshot; it is rebuilt from scratch after
//! every rewrite pass because spans are only valid for the text they were
//! extracted from.

mod builder;
mod model;
mod parse;

pub use builder::build_model;
pub use model::{
    Container, DeclKind, Declaration, SourceModel, TopLevel, Visibility, WriteMode,
};
pub use parse::{ParseError, parse};
