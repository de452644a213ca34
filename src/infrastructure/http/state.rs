//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use http::header::InvalidHeaderValue;
use std::sync::Arc;

use super::middleware::CorsPolicy;
use crate::application::{
    // Command handlers
    AcceptFriendHandler, AddFriendHandler, BlockFriendHandler, UpdateCandidateHandler,
    UpdatePictureHandler,
    // Query handlers
    FindCandidatesHandler, GetCandidateHandler, GetPictureHandler, ListCvsHandler,
    ListFriendsHandler,
    // Ports
    BlobStorePort, CandidateRepositoryPort, CvRepositoryPort, FriendRepositoryPort,
    IdentityVerifierPort, NotifierPort,
};
use crate::config::AppConfig;

/// HTTP 层运行参数，启动后不可变
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub default_photo_key: String,
    pub fallback_content_type: String,
    pub max_upload_size: usize,
    pub friends_url: String,
    pub require_accept: bool,
    pub max_page_size: u32,
    pub public_routes: bool,
    pub photo_upload: bool,
    pub company_field: bool,
    pub cors: CorsPolicy,
}

impl AppSettings {
    pub fn from_config(config: &AppConfig) -> Result<Self, InvalidHeaderValue> {
        Ok(Self {
            default_photo_key: config.storage.default_photo_key.clone(),
            fallback_content_type: config.storage.fallback_content_type.clone(),
            max_upload_size: config.storage.max_upload_size,
            friends_url: config.notify.friends_url.clone(),
            require_accept: config.friends.require_accept,
            max_page_size: config.friends.max_page_size,
            public_routes: config.features.public_routes,
            photo_upload: config.features.photo_upload,
            company_field: config.features.company_field,
            cors: CorsPolicy::from_config(&config.cors)?,
        })
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        let config = AppConfig::default();
        Self {
            default_photo_key: config.storage.default_photo_key,
            fallback_content_type: config.storage.fallback_content_type,
            max_upload_size: config.storage.max_upload_size,
            friends_url: config.notify.friends_url,
            require_accept: config.friends.require_accept,
            max_page_size: config.friends.max_page_size,
            public_routes: config.features.public_routes,
            photo_upload: config.features.photo_upload,
            company_field: config.features.company_field,
            cors: CorsPolicy::default(),
        }
    }
}

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub verifier: Arc<dyn IdentityVerifierPort>,

    // ========== Command Handlers ==========
    pub update_candidate_handler: UpdateCandidateHandler,
    pub add_friend_handler: AddFriendHandler,
    pub block_friend_handler: BlockFriendHandler,
    pub accept_friend_handler: AcceptFriendHandler,
    pub update_picture_handler: UpdatePictureHandler,

    // ========== Query Handlers ==========
    pub get_candidate_handler: GetCandidateHandler,
    pub find_candidates_handler: FindCandidatesHandler,
    pub list_friends_handler: ListFriendsHandler,
    pub list_cvs_handler: ListCvsHandler,
    pub get_picture_handler: GetPictureHandler,

    pub settings: AppSettings,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        candidate_repo: Arc<dyn CandidateRepositoryPort>,
        friend_repo: Arc<dyn FriendRepositoryPort>,
        cv_repo: Arc<dyn CvRepositoryPort>,
        blob_store: Arc<dyn BlobStorePort>,
        verifier: Arc<dyn IdentityVerifierPort>,
        notifier: Arc<dyn NotifierPort>,
        settings: AppSettings,
    ) -> Self {
        Self {
            verifier,

            // Command handlers
            update_candidate_handler: UpdateCandidateHandler::new(
                candidate_repo.clone(),
                settings.company_field,
            ),
            add_friend_handler: AddFriendHandler::new(
                candidate_repo.clone(),
                friend_repo.clone(),
                notifier,
                settings.require_accept,
                settings.friends_url.clone(),
            ),
            block_friend_handler: BlockFriendHandler::new(
                candidate_repo.clone(),
                friend_repo.clone(),
            ),
            accept_friend_handler: AcceptFriendHandler::new(
                candidate_repo.clone(),
                friend_repo.clone(),
            ),
            update_picture_handler: UpdatePictureHandler::new(
                candidate_repo.clone(),
                blob_store.clone(),
            ),

            // Query handlers
            get_candidate_handler: GetCandidateHandler::new(candidate_repo.clone()),
            find_candidates_handler: FindCandidatesHandler::new(candidate_repo.clone()),
            list_friends_handler: ListFriendsHandler::new(friend_repo, settings.max_page_size),
            list_cvs_handler: ListCvsHandler::new(candidate_repo.clone(), cv_repo),
            get_picture_handler: GetPictureHandler::new(
                candidate_repo,
                blob_store,
                settings.default_photo_key.clone(),
            ),

            settings,
        }
    }
}
