//! Friend Command Handlers

use chrono::Utc;
use std::sync::Arc;

use crate::application::commands::{AcceptFriend, AddFriend, BlockFriend};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    CandidateRecord, CandidateRepositoryPort, FriendRepositoryPort, Notification, NotifierPort,
    RepositoryError,
};
use crate::domain::candidate::{CandidateId, Email};
use crate::domain::friendship::FriendStatus;

/// 解析调用方（必须存在）
async fn resolve_caller(
    candidate_repo: &dyn CandidateRepositoryPort,
    email: &Email,
) -> Result<CandidateRecord, ApplicationError> {
    candidate_repo
        .find_by_email(email)
        .await?
        .ok_or_else(|| ApplicationError::candidate_not_found_by_email(email))
}

fn parse_friend_id(raw: &str) -> Result<CandidateId, ApplicationError> {
    raw.parse()
        .map_err(|_| ApplicationError::validation("Invalid friendId"))
}

// ============================================================================
// AddFriend
// ============================================================================

/// 添加好友响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddFriendResponse {
    pub friend_id: CandidateId,
    /// caller 与 friend 之间边的最终状态
    pub status: FriendStatus,
}

/// AddFriend Handler
///
/// 只写入 caller -> friend 一条边；对端已有待处理请求时直接接受。
/// 同方向重复与添加自己会被拒绝，反方向已有边时仍写入本方向
pub struct AddFriendHandler {
    candidate_repo: Arc<dyn CandidateRepositoryPort>,
    friend_repo: Arc<dyn FriendRepositoryPort>,
    notifier: Arc<dyn NotifierPort>,
    require_accept: bool,
    friends_url: String,
}

impl AddFriendHandler {
    pub fn new(
        candidate_repo: Arc<dyn CandidateRepositoryPort>,
        friend_repo: Arc<dyn FriendRepositoryPort>,
        notifier: Arc<dyn NotifierPort>,
        require_accept: bool,
        friends_url: impl Into<String>,
    ) -> Self {
        Self {
            candidate_repo,
            friend_repo,
            notifier,
            require_accept,
            friends_url: friends_url.into(),
        }
    }

    pub async fn handle(&self, command: AddFriend) -> Result<AddFriendResponse, ApplicationError> {
        tracing::info!(email = %command.email, friend_id = %command.friend_id, "Adding friend");

        let caller = self.candidate_repo.find_by_email(&command.email).await?;
        let friend = match command.friend_id.parse::<CandidateId>() {
            Ok(id) => self.candidate_repo.find_by_id(id).await?,
            Err(_) => None,
        };

        let (Some(caller), Some(friend)) = (caller, friend) else {
            return Err(ApplicationError::business_rule("Users do not exist"));
        };

        if caller.id == friend.id {
            return Err(ApplicationError::business_rule(
                "Cannot add yourself as a friend",
            ));
        }

        if self.friend_repo.find_edge(caller.id, friend.id).await?.is_some() {
            return Err(ApplicationError::business_rule(
                "Friend relationship already exists",
            ));
        }

        // 反方向的 ACTIVE/BLOCKED 边不影响本次写入；只有待处理请求会被直接接受
        let reverse = self.friend_repo.find_edge(friend.id, caller.id).await?;
        if reverse.is_some_and(|edge| edge.status == FriendStatus::Pending) {
            self.friend_repo.activate_pending(friend.id, caller.id).await?;
            tracing::info!(
                candidate_id = %caller.id,
                friend_id = %friend.id,
                "Pending request from friend accepted"
            );
            return Ok(AddFriendResponse {
                friend_id: friend.id,
                status: FriendStatus::Active,
            });
        }

        let status = FriendStatus::initial(self.require_accept);
        self.friend_repo
            .insert_edge(caller.id, friend.id, status, Utc::now())
            .await
            .map_err(|e| match e {
                RepositoryError::Duplicate(_) => {
                    ApplicationError::business_rule("Friend relationship already exists")
                }
                other => other.into(),
            })?;

        tracing::info!(
            candidate_id = %caller.id,
            friend_id = %friend.id,
            status = status.as_str(),
            "Friend edge created"
        );

        // 通知为尽力而为：边已提交，投递失败只记录
        let notification = Notification {
            email: friend.email.clone(),
            message: self.request_message(&caller),
        };
        if let Err(e) = self.notifier.send(notification).await {
            tracing::warn!(
                friend_id = %friend.id,
                error = %e,
                "Failed to send friend request notification"
            );
        }

        Ok(AddFriendResponse {
            friend_id: friend.id,
            status,
        })
    }

    fn request_message(&self, caller: &CandidateRecord) -> String {
        let display_name = caller.name.as_deref().unwrap_or(&caller.email);
        format!(
            "{} has sent you a friend request! visit <a href=\"{}\">Your Friends List</a> to view.",
            display_name, self.friends_url
        )
    }
}

// ============================================================================
// BlockFriend
// ============================================================================

/// 拉黑响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockFriendResponse {
    pub friend_id: CandidateId,
    /// 实际被更新的边数（0..=2）
    pub updated_edges: u64,
}

/// BlockFriend Handler
pub struct BlockFriendHandler {
    candidate_repo: Arc<dyn CandidateRepositoryPort>,
    friend_repo: Arc<dyn FriendRepositoryPort>,
}

impl BlockFriendHandler {
    pub fn new(
        candidate_repo: Arc<dyn CandidateRepositoryPort>,
        friend_repo: Arc<dyn FriendRepositoryPort>,
    ) -> Self {
        Self {
            candidate_repo,
            friend_repo,
        }
    }

    pub async fn handle(&self, command: BlockFriend) -> Result<BlockFriendResponse, ApplicationError> {
        let caller = resolve_caller(self.candidate_repo.as_ref(), &command.email).await?;
        let friend_id = parse_friend_id(&command.friend_id)?;

        let updated_edges = self.friend_repo.block_pair(caller.id, friend_id).await?;

        tracing::info!(
            candidate_id = %caller.id,
            friend_id = %friend_id,
            updated_edges = updated_edges,
            "Friend blocked"
        );

        Ok(BlockFriendResponse {
            friend_id,
            updated_edges,
        })
    }
}

// ============================================================================
// AcceptFriend
// ============================================================================

/// AcceptFriend Handler
pub struct AcceptFriendHandler {
    candidate_repo: Arc<dyn CandidateRepositoryPort>,
    friend_repo: Arc<dyn FriendRepositoryPort>,
}

impl AcceptFriendHandler {
    pub fn new(
        candidate_repo: Arc<dyn CandidateRepositoryPort>,
        friend_repo: Arc<dyn FriendRepositoryPort>,
    ) -> Self {
        Self {
            candidate_repo,
            friend_repo,
        }
    }

    pub async fn handle(&self, command: AcceptFriend) -> Result<CandidateId, ApplicationError> {
        let caller = resolve_caller(self.candidate_repo.as_ref(), &command.email).await?;
        let friend_id = parse_friend_id(&command.friend_id)?;

        if !self.friend_repo.activate_pending(friend_id, caller.id).await? {
            return Err(ApplicationError::business_rule("No pending friend request"));
        }

        tracing::info!(candidate_id = %caller.id, friend_id = %friend_id, "Friend request accepted");

        Ok(friend_id)
    }
}
