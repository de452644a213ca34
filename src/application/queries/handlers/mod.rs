//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod candidate_handlers;
mod cv_handlers;
mod friend_handlers;
mod photo_handlers;

pub use candidate_handlers::*;
pub use cv_handlers::*;
pub use friend_handlers::*;
pub use photo_handlers::*;
