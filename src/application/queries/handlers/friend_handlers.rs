//! Friend Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{FriendListEntry, FriendRepositoryPort};
use crate::application::queries::ListFriends;

/// ListFriends Handler
pub struct ListFriendsHandler {
    friend_repo: Arc<dyn FriendRepositoryPort>,
    max_page_size: u32,
}

impl ListFriendsHandler {
    pub fn new(friend_repo: Arc<dyn FriendRepositoryPort>, max_page_size: u32) -> Self {
        Self {
            friend_repo,
            max_page_size,
        }
    }

    pub async fn handle(&self, query: ListFriends) -> Result<Vec<FriendListEntry>, ApplicationError> {
        let (limit, offset) = page_window(query.limit, query.page, self.max_page_size)
            .ok_or_else(|| ApplicationError::validation("Invalid limit or page params"))?;

        let friends = self
            .friend_repo
            .list_active(&query.email, limit, offset)
            .await?;

        tracing::debug!(
            email = %query.email,
            limit = limit,
            offset = offset,
            results = friends.len(),
            "Listed friends"
        );

        Ok(friends)
    }
}

/// 计算 (limit, offset)，offset = (page - 1) * limit
///
/// 要求 page >= 1 且 1 <= limit <= max_page_size
fn page_window(limit: i64, page: i64, max_page_size: u32) -> Option<(u32, u64)> {
    if page < 1 || limit < 1 || limit > i64::from(max_page_size) {
        return None;
    }
    let offset = (page - 1).checked_mul(limit)?;
    Some((limit as u32, offset as u64))
}
