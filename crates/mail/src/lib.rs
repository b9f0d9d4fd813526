//! Client for the upstream email-thread service.
//!
//! The only thing the annotation service needs from the mail provider is
//! the participant set of a message: the from/to/cc addresses define who
//! is allowed to annotate or comment on that thread.

mod api;

pub use api::{MailApi, MailApiError, MailConfig, ParticipantSet};
