//! Scrol - 候选人资料与好友 API
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Candidate Context: 候选人身份与资料
//! - Friendship Context: 好友边状态
//!
//! 应用层 (application/):
//! - Ports: 端口定义（Repositories, BlobStore, IdentityVerifier, Notifier）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API，令牌校验，CORS
//! - Persistence: SQLite 存储
//! - Adapters: 文件对象存储，身份校验客户端，通知客户端

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
mod test_support;

pub use config::{load_config, AppConfig};
