//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod blob_store;
mod identity_verifier;
mod notifier;
mod repositories;

pub use blob_store::{BlobBody, BlobObject, BlobStoreError, BlobStorePort};
pub use identity_verifier::{IdentityVerifierPort, VerifiedIdentity, VerifierError};
pub use notifier::{Notification, NotifierPort, NotifyError};
pub use repositories::{
    CandidateRecord, CandidateRepositoryPort, CandidateSummary, CvRecord, CvRepositoryPort,
    FriendEdgeRecord, FriendListEntry, FriendRepositoryPort, RepositoryError,
};
