//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{BlobStoreError, RepositoryError};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 候选人不存在（按 id 或 email 查找）
    #[error("No user found with {0}")]
    CandidateNotFound(String),

    /// 其他资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 业务规则违反
    #[error("Business rule violation: {0}")]
    BusinessRuleViolation(String),

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl ApplicationError {
    /// 按 id 查找的候选人不存在
    pub fn candidate_not_found_by_id(id: impl std::fmt::Display) -> Self {
        Self::CandidateNotFound(format!("id {}", id))
    }

    /// 按 email 查找的候选人不存在
    pub fn candidate_not_found_by_email(email: impl std::fmt::Display) -> Self {
        Self::CandidateNotFound(format!("email {}", email))
    }

    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建业务规则违反错误
    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::BusinessRuleViolation(message.into())
    }

    /// 是否为基础设施层故障（数据库、对象存储），而非调用方可感知的业务错误
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::RepositoryError(_) | Self::StorageError(_))
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        Self::RepositoryError(err.to_string())
    }
}

impl From<BlobStoreError> for ApplicationError {
    fn from(err: BlobStoreError) -> Self {
        Self::StorageError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_not_found_message() {
        let err = ApplicationError::candidate_not_found_by_id(7);
        assert_eq!(err.to_string(), "No user found with id 7");

        let err = ApplicationError::candidate_not_found_by_email("a@x.com");
        assert_eq!(err.to_string(), "No user found with email a@x.com");
    }

    #[test]
    fn test_infrastructure_classification() {
        assert!(ApplicationError::from(RepositoryError::DatabaseError("x".into())).is_infrastructure());
        assert!(ApplicationError::from(BlobStoreError::IoError("x".into())).is_infrastructure());
        assert!(!ApplicationError::validation("x").is_infrastructure());
        assert!(!ApplicationError::candidate_not_found_by_id(1).is_infrastructure());
        assert!(!ApplicationError::not_found("Photo", "k").is_infrastructure());
    }
}
