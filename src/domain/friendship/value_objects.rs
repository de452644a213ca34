//! Friendship Context - Value Objects

use serde::{Deserialize, Serialize};

/// 好友边状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FriendStatus {
    /// 已发出请求，等待对方接受
    Pending,
    /// 有效好友
    Active,
    /// 已拉黑
    Blocked,
}

impl FriendStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendStatus::Pending => "PENDING",
            FriendStatus::Active => "ACTIVE",
            FriendStatus::Blocked => "BLOCKED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(FriendStatus::Pending),
            "ACTIVE" => Some(FriendStatus::Active),
            "BLOCKED" => Some(FriendStatus::Blocked),
            _ => None,
        }
    }

    /// 新建边的初始状态
    pub fn initial(require_accept: bool) -> Self {
        if require_accept {
            FriendStatus::Pending
        } else {
            FriendStatus::Active
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_names() {
        for status in [FriendStatus::Pending, FriendStatus::Active, FriendStatus::Blocked] {
            assert_eq!(FriendStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(FriendStatus::from_str("active"), None);
    }

    #[test]
    fn test_initial_status() {
        assert_eq!(FriendStatus::initial(false), FriendStatus::Active);
        assert_eq!(FriendStatus::initial(true), FriendStatus::Pending);
    }
}
