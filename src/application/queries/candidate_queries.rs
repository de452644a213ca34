//! Candidate Queries

use crate::domain::candidate::Email;

/// 候选人查找方式
#[derive(Debug, Clone)]
pub enum CandidateLookup {
    /// 按存储 ID（来自公开查询参数，未校验）
    Id(String),
    /// 按已验证的 email
    Email(Email),
}

/// 获取候选人资料查询
#[derive(Debug, Clone)]
pub struct GetCandidate {
    pub lookup: CandidateLookup,
}

/// 按 email / 姓名搜索候选人
#[derive(Debug, Clone)]
pub struct FindCandidates {
    pub query: String,
}
