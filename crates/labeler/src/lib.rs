//! Client for the text-completion service used for AI-assisted labeling.
//!
//! Sends a fixed categorization prompt restricted to the annotation label
//! set and parses the completion into structured suggestions. The result
//! is advisory: it never creates a persisted annotation, and a parse or
//! upstream failure is always reported, never silently defaulted.

mod api;
mod parse;

pub use api::{LabelerApi, LabelerApiError, LabelerConfig};
pub use parse::LabelSuggestion;
