//! HTTP transport shared by the upstream API fetcher and the webhook notifier.
//!
//! - Request/response value types ([`HttpRequest`], [`HttpResponse`])
//! - Client abstraction ([`HttpClient`]) and its reqwest implementation ([`ReqwestClient`])
//! - Transport errors ([`HttpError`])

mod client;
mod error;
mod request;


pub use client::{ReqwestClient, USER_AGENT};
pub use error::HttpError;
pub use request::{HttpClient, HttpRequest, HttpResponse};
pub(crate) use request::body_suffix;
