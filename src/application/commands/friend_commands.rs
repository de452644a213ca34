//! Friend Commands

use crate::domain::candidate::Email;

/// 添加好友命令（caller -> friend）
#[derive(Debug, Clone)]
pub struct AddFriend {
    pub email: Email,
    pub friend_id: String,
}

/// 拉黑好友命令（双向）
#[derive(Debug, Clone)]
pub struct BlockFriend {
    pub email: Email,
    pub friend_id: String,
}

/// 接受好友请求命令（friend -> caller 的 PENDING 边）
#[derive(Debug, Clone)]
pub struct AcceptFriend {
    pub email: Email,
    pub friend_id: String,
}
