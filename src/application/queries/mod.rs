//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：处理所有读操作

mod candidate_queries;
mod cv_queries;
mod friend_queries;
mod photo_queries;

pub mod handlers;

pub use candidate_queries::*;
pub use cv_queries::*;
pub use friend_queries::*;
pub use photo_queries::*;
