//! Candidate Context - Value Objects

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::CandidateError;

/// 候选人唯一标识（由存储分配）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(i64);

impl CandidateId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl FromStr for CandidateId {
    type Err = CandidateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| CandidateError::InvalidId(s.to_string()))
    }
}

impl std::fmt::Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 候选人 email
///
/// 不变量:
/// - 作为外部身份键，更新资料时永不修改
/// - 必须包含 `@`，且两侧非空
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub fn new(email: impl Into<String>) -> Result<Self, CandidateError> {
        let email = email.into();
        let trimmed = email.trim();
        match trimmed.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self(trimmed.to_string()))
            }
            _ => Err(CandidateError::InvalidEmail(email)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 可更新的资料字段
///
/// 更新是整体覆盖：未提供的字段写入 NULL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFields {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub sector: Option<String>,
    pub job_title: Option<String>,
    pub company: Option<String>,
}
