//! Notify Adapter - 通知分发客户端

mod http_notifier;

pub use http_notifier::*;
