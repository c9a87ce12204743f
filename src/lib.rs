//! Signed client for the video platform management API.
//!
//! 署名付きURLの組み立て、HTTP呼び出し、エラーレスポンスの型付けを提供する。
//!
//! ```rust,ignore
//! use jwmgmt::api::{Credentials, EndpointConfig, ManagementClient, Params};
//! use jwmgmt::api::transport::ReqwestTransport;
//!
//! let client = ManagementClient::with_transport(
//!     Credentials::new("key", "secret"),
//!     EndpointConfig::new("https", "api.jwplatform.com", "v1"),
//!     ReqwestTransport::new(std::time::Duration::from_secs(30))?,
//! );
//! let videos = client.get("/videos/list", &Params::new()).await?;
//! ```

pub mod api;
pub mod config;
pub mod domain;
pub mod error_severity;
