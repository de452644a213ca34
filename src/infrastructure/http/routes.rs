//! HTTP Routes
//!
//! API Endpoints:
//! - /               POST  当前用户资料
//! - /find           GET   搜索候选人（公开）
//! - /viewprofile    GET   按 id 查看资料（公开）
//! - /getpicture     GET   按 id 获取头像（公开）
//! - /getpicture     POST  当前用户头像
//! - /update         POST  更新资料
//! - /addfriend      POST  添加好友
//! - /acceptfriend   POST  接受好友请求
//! - /block          POST  拉黑好友
//! - /myfriends      POST  好友列表（分页）
//! - /listcvs        POST  简历列表
//! - /updatepicture  POST  上传头像
//!
//! 精确匹配；未匹配的路径或方法返回 404 `{"error":"Not found"}`

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, MethodRouter},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::{AppSettings, AppState};

type Route = MethodRouter<Arc<AppState>>;

/// 方法不匹配时同样返回 404
fn exact(route: Route) -> Route {
    route.fallback(handlers::not_found)
}

/// 创建所有路由
pub fn create_routes(settings: &AppSettings) -> Router<Arc<AppState>> {
    let mut router = Router::new()
        .route("/", exact(post(handlers::get_own_profile)))
        .route("/update", exact(post(handlers::update_profile)))
        .route("/addfriend", exact(post(handlers::add_friend)))
        .route("/acceptfriend", exact(post(handlers::accept_friend)))
        .route("/block", exact(post(handlers::block_friend)))
        .route("/myfriends", exact(post(handlers::list_friends)))
        .route("/listcvs", exact(post(handlers::list_cvs)));

    let picture = if settings.public_routes {
        get(handlers::get_picture_by_id).post(handlers::get_own_picture)
    } else {
        post(handlers::get_own_picture)
    };
    router = router.route("/getpicture", exact(picture));

    if settings.public_routes {
        router = router
            .route("/find", exact(get(handlers::find)))
            .route("/viewprofile", exact(get(handlers::view_profile)));
    }

    if settings.photo_upload {
        router = router.route(
            "/updatepicture",
            exact(
                post(handlers::update_picture)
                    .layer(DefaultBodyLimit::max(settings.max_upload_size)),
            ),
        );
    }

    router.fallback(handlers::not_found)
}
