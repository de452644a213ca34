//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{CandidateRecord, CandidateSummary, CvRecord, FriendListEntry};
use crate::domain::candidate::{CandidateId, ProfileFields};

// ============================================================================
// 通用
// ============================================================================

/// `{"message": "..."}`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Candidate DTOs
// ============================================================================

/// 候选人资料投影
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResponse {
    pub id: CandidateId,
    pub email: String,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub sector: Option<String>,
    pub job_title: Option<String>,
    pub photo: Option<String>,
    /// company 功能关闭时为 None，字段整体省略
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<Option<String>>,
    pub cv: Option<String>,
}

impl CandidateResponse {
    pub fn project(record: CandidateRecord, include_company: bool) -> Self {
        Self {
            id: record.id,
            email: record.email,
            name: record.name,
            gender: record.gender,
            sector: record.sector,
            job_title: record.job_title,
            photo: record.photo,
            company: include_company.then_some(record.company),
            cv: record.cv,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CandidateSummaryResponse {
    pub id: CandidateId,
    pub name: Option<String>,
    pub email: String,
}

impl From<CandidateSummary> for CandidateSummaryResponse {
    fn from(summary: CandidateSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            email: summary.email,
        }
    }
}

/// `POST /update` 请求体
#[derive(Debug, Deserialize)]
pub struct UpdateCandidateRequest {
    #[serde(default)]
    pub candidate: Option<CandidatePayload>,
}

/// 可写字段；缺失字段写为 null
///
/// 请求中的 email 字段被忽略，主体取自已校验的令牌
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePayload {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub sector: Option<String>,
    pub job_title: Option<String>,
    pub company: Option<String>,
}

impl From<CandidatePayload> for ProfileFields {
    fn from(payload: CandidatePayload) -> Self {
        ProfileFields {
            name: payload.name,
            gender: payload.gender,
            sector: payload.sector,
            job_title: payload.job_title,
            company: payload.company,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateCandidateResponse {
    pub message: String,
    pub candidate: CandidateResponse,
}

// ============================================================================
// Friend DTOs
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendResponse {
    pub friend_id: CandidateId,
    pub created: String,
    pub name: Option<String>,
}

impl From<FriendListEntry> for FriendResponse {
    fn from(entry: FriendListEntry) -> Self {
        Self {
            friend_id: entry.friend_id,
            created: entry.created,
            name: entry.name,
        }
    }
}

// ============================================================================
// CV DTOs
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CvResponse {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub created: Option<String>,
    pub is_default: bool,
    pub original_filename: Option<String>,
}

impl From<CvRecord> for CvResponse {
    fn from(cv: CvRecord) -> Self {
        Self {
            id: cv.id,
            email: cv.email,
            name: cv.name,
            created: cv.created,
            is_default: cv.is_default,
            original_filename: cv.original_filename,
        }
    }
}

// ============================================================================
// Photo DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct UpdatePictureResponseDto {
    pub message: String,
    pub photo: String,
}

// ============================================================================
// Query 参数
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct FindParams {
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateIdParams {
    #[serde(rename = "candidateId")]
    pub candidate_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FriendIdParams {
    #[serde(rename = "friendId")]
    pub friend_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub limit: Option<String>,
    pub page: Option<String>,
}

/// 非空的查询参数
pub fn required_param(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
