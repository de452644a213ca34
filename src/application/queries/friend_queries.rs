//! Friend Queries

use crate::domain::candidate::Email;

/// 分页列出好友
#[derive(Debug, Clone)]
pub struct ListFriends {
    pub email: Email,
    pub limit: i64,
    /// 从 1 开始
    pub page: i64,
}
