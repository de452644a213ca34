//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Repository、BlobStore、IdentityVerifier、Notifier）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    AcceptFriend,
    AddFriend,
    BlockFriend,
    UpdateCandidate,
    UpdatePicture,
    // Handlers
    handlers::{
        AcceptFriendHandler, AddFriendHandler, AddFriendResponse, BlockFriendHandler,
        BlockFriendResponse, UpdateCandidateHandler, UpdatePictureHandler, UpdatePictureResponse,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Blob store
    BlobBody,
    BlobObject,
    BlobStoreError,
    BlobStorePort,
    // Identity verifier
    IdentityVerifierPort,
    VerifiedIdentity,
    VerifierError,
    // Notifier
    Notification,
    NotifierPort,
    NotifyError,
    // Repositories
    CandidateRecord,
    CandidateRepositoryPort,
    CandidateSummary,
    CvRecord,
    CvRepositoryPort,
    FriendEdgeRecord,
    FriendListEntry,
    FriendRepositoryPort,
    RepositoryError,
};

pub use queries::{
    CandidateLookup,
    FindCandidates,
    GetCandidate,
    GetPicture,
    ListCvs,
    ListFriends,
    // Handlers
    handlers::{
        FindCandidatesHandler, GetCandidateHandler, GetPictureHandler, ListCvsHandler,
        ListFriendsHandler,
    },
};
