//! Photo Commands

use crate::domain::candidate::Email;

/// 更新头像命令
#[derive(Debug, Clone)]
pub struct UpdatePicture {
    pub email: Email,
    pub data: Vec<u8>,
    pub content_type: String,
}
