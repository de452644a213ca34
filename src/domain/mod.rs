//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Candidate Context: 候选人身份与资料
//! - Friendship Context: 候选人之间的有向好友关系

pub mod candidate;
pub mod friendship;
