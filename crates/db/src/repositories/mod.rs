pub mod annotation_comment_repo;
pub mod annotation_repo;

pub use annotation_comment_repo::AnnotationCommentRepo;
pub use annotation_repo::AnnotationRepo;
