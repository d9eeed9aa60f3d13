//! Service layer for comment threads.

mod threads;

pub use threads::{CommentService, CommentServiceError, CommentServiceResult};
