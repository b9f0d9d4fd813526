pub mod annotation;
pub mod annotation_comment;
