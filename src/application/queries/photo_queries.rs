//! Photo Queries

use super::CandidateLookup;

/// 获取候选人头像
#[derive(Debug, Clone)]
pub struct GetPicture {
    pub lookup: CandidateLookup,
}
