//! Friendship Context - 好友关系限界上下文
//!
//! 好友关系是两个候选人之间带状态的有向边。
//! 添加只写入一条 caller -> friend 的边；拉黑需要同时更新两个方向。

mod value_objects;

pub use value_objects::FriendStatus;
