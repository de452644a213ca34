//! Candidate Commands

use crate::domain::candidate::{Email, ProfileFields};

/// 更新候选人资料命令
///
/// `email` 为已验证的主体；资料字段整体覆盖
#[derive(Debug, Clone)]
pub struct UpdateCandidate {
    pub email: Email,
    pub fields: ProfileFields,
}
