//! Domain types and rules for the thread annotation service.
//!
//! This crate has no I/O dependencies so it can be used by the database,
//! client, and API layers alike: the annotation label enumeration, the
//! short-id generator, comment mutation rules, and the shared error
//! taxonomy all live here.

pub mod comment;
pub mod error;
pub mod id;
pub mod label;
pub mod pagination;
pub mod suggest;
pub mod validation;

pub use error::CoreError;
pub use label::AnnotationLabel;
