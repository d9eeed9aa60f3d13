//! `PostgreSQL` adapter for comment persistence.

mod models;
mod repository;

pub(crate) use models::CommentRow;
pub use repository::PostgresCommentRepository;
