//! Candidate Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CandidateError {
    #[error("无效的候选人 ID: {0}")]
    InvalidId(String),

    #[error("无效的 email: {0}")]
    InvalidEmail(String),
}
