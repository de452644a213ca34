//! CV Queries

use crate::domain::candidate::Email;

/// 列出候选人的简历
#[derive(Debug, Clone)]
pub struct ListCvs {
    pub email: Email,
}
