//! Short identifier generation for annotations.
//!
//! Annotation ids are 8-character base58 strings derived from a fresh
//! random UUID. Uniqueness is enforced by the database primary key, not
//! here: the repository create path retries with a fresh id when an
//! insert hits a unique violation.

/// Length of a generated annotation id.
pub const ANNOTATION_ID_LEN: usize = 8;

/// Maximum insert attempts before a create gives up.
///
/// Collisions in a 58^8 space are astronomically unlikely per attempt;
/// the bound exists so a persistent failure surfaces instead of looping.
pub const MAX_ID_ATTEMPTS: u32 = 3;

/// Generate a candidate annotation id.
///
/// Takes the first 10 bytes of a random UUIDv4, base58-encodes them, and
/// truncates the encoding to [`ANNOTATION_ID_LEN`] characters.
pub fn generate_annotation_id() -> String {
    let raw = uuid::Uuid::new_v4();
    let mut encoded = bs58::encode(&raw.as_bytes()[..10]).into_string();
    encoded.truncate(ANNOTATION_ID_LEN);
    encoded
}
