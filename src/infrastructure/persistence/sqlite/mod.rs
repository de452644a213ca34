//! SQLite Persistence - SQLite 数据库持久化实现

mod candidate_repo;
mod cv_repo;
mod database;
mod friend_repo;

pub use candidate_repo::*;
pub use cv_repo::*;
pub use database::*;
pub use friend_repo::*;
