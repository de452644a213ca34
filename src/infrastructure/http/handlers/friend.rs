//! Friend HTTP Handlers

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::application::{AcceptFriend, AddFriend, BlockFriend, ListFriends};
use crate::infrastructure::http::auth::Authenticated;
use crate::infrastructure::http::dto::{
    required_param, FriendIdParams, FriendResponse, MessageResponse, PageParams,
};
use crate::infrastructure::http::error::{ApiError, ErrorPolicy};
use crate::infrastructure::http::state::AppState;

fn friend_id_param(params: FriendIdParams) -> Result<String, ApiError> {
    required_param(params.friend_id)
        .ok_or_else(|| ApiError::BadRequest("Missing friendId".to_string()))
}

/// 添加好友 (`POST /addfriend?friendId=`)
pub async fn add_friend(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FriendIdParams>,
    auth: Authenticated,
) -> Result<Json<MessageResponse>, ApiError> {
    let friend_id = friend_id_param(params)?;

    state
        .add_friend_handler
        .handle(AddFriend {
            email: auth.email,
            friend_id,
        })
        .await
        .map_err(|e| ErrorPolicy::ADD_FRIEND.map(e))?;

    Ok(Json(MessageResponse::new("Friend added successfully")))
}

/// 双向拉黑 (`POST /block?friendId=`)
pub async fn block_friend(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FriendIdParams>,
    auth: Authenticated,
) -> Result<Json<MessageResponse>, ApiError> {
    let friend_id = friend_id_param(params)?;

    let response = state
        .block_friend_handler
        .handle(BlockFriend {
            email: auth.email,
            friend_id,
        })
        .await
        .map_err(|e| ErrorPolicy::BLOCK_FRIEND.map(e))?;

    Ok(Json(MessageResponse::new(format!(
        "{} has been blocked",
        response.friend_id
    ))))
}

/// 接受好友请求 (`POST /acceptfriend?friendId=`)
pub async fn accept_friend(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FriendIdParams>,
    auth: Authenticated,
) -> Result<Json<MessageResponse>, ApiError> {
    let friend_id = friend_id_param(params)?;

    state
        .accept_friend_handler
        .handle(AcceptFriend {
            email: auth.email,
            friend_id,
        })
        .await
        .map_err(|e| ErrorPolicy::ACCEPT_FRIEND.map(e))?;

    Ok(Json(MessageResponse::new("Friend request accepted")))
}

/// 分页列出好友 (`POST /myfriends?limit=&page=`)
pub async fn list_friends(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
    auth: Authenticated,
) -> Result<Json<Vec<FriendResponse>>, ApiError> {
    let (Some(limit), Some(page)) = (required_param(params.limit), required_param(params.page))
    else {
        return Err(ApiError::BadRequest(
            "Missing limit or page params".to_string(),
        ));
    };

    let invalid = || ApiError::BadRequest("Invalid limit or page params".to_string());
    let limit: i64 = limit.trim().parse().map_err(|_| invalid())?;
    let page: i64 = page.trim().parse().map_err(|_| invalid())?;

    let friends = state
        .list_friends_handler
        .handle(ListFriends {
            email: auth.email,
            limit,
            page,
        })
        .await
        .map_err(|e| ErrorPolicy::LIST_FRIENDS.map(e))?;

    Ok(Json(friends.into_iter().map(Into::into).collect()))
}
