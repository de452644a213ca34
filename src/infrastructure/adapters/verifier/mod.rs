//! Verifier Adapter - 身份令牌校验

mod http_token_verifier;

pub use http_token_verifier::*;
