//! Candidate Context - 候选人限界上下文
//!
//! 职责:
//! - 候选人标识（存储分配的整数主键 / 作为外部身份的 email）
//! - 可被更新的资料字段

mod errors;
mod value_objects;

pub use errors::CandidateError;
pub use value_objects::{CandidateId, Email, ProfileFields};
