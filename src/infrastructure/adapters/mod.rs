//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod notify;
pub mod storage;
pub mod verifier;

pub use notify::*;
pub use storage::*;
pub use verifier::*;
