//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理所有写操作

mod candidate_commands;
mod friend_commands;
mod photo_commands;

pub mod handlers;

pub use candidate_commands::*;
pub use friend_commands::*;
pub use photo_commands::*;
