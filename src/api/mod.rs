//! 管理API通信モジュール
//!
//! - `encoding`: パラメータの正規化とパーセントエンコード
//! - `auth`: 認証情報と署名
//! - `request`: 署名付きURLの組み立て
//! - `transport`: HTTPトランスポート
//! - `client`: 呼び出しとレスポンス解釈
//! - `videos`: 動画操作のラッパー

pub mod auth;
pub mod client;
pub mod encoding;
pub mod error;
pub mod request;
pub mod transport;
pub mod types;
pub mod videos;

pub use auth::Credentials;
pub use client::ManagementClient;
pub use encoding::{ParamValue, Params};
pub use error::ManagementError;
pub use request::EndpointConfig;
pub use transport::HttpMethod;
pub use types::ApiResponse;
