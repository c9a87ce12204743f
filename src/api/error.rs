/// API層のエラー定義
///
/// 署名入力の不正、トランスポート障害、レスポンスのデコード失敗、
/// API が報告したエラーを区別して保持する。
/// API エラーはレスポンス本文をそのまま保持し、呼び出し側が詳細を参照できる。
use crate::api::transport::TransportError;
use crate::error_severity::ErrorSeverity;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManagementError {
    /// 署名できないパラメータ
    #[error("invalid request parameter '{key}': {reason}")]
    InvalidParameter { key: String, reason: String },

    /// トランスポート層のエラー（そのまま伝播）
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// レスポンス本文がJSONオブジェクトとして解釈できない
    #[error("failed to decode response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    /// API が `status: "error"` を返した
    #[error("API error: {endpoint} - {message}")]
    Api {
        endpoint: String,
        code: Option<String>,
        message: String,
        body: Map<String, Value>,
    },
}

impl ManagementError {
    /// パラメータエラーを作成
    pub fn invalid_parameter(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// デコードエラーを作成
    pub fn decode(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// エラーレスポンス本文から API エラーを作成
    ///
    /// `message` が無い場合は本文全体を文字列化してメッセージにする。
    pub fn api(endpoint: impl Into<String>, body: Map<String, Value>) -> Self {
        let code = body.get("code").and_then(scalar_text);
        let message = body
            .get("message")
            .and_then(scalar_text)
            .unwrap_or_else(|| Value::Object(body.clone()).to_string());

        Self::Api {
            endpoint: endpoint.into(),
            code,
            message,
            body,
        }
    }

    /// API エラーのレスポンス本文
    pub fn response_body(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidParameter { .. } => ErrorSeverity::UserError,
            Self::Transport(_) => ErrorSeverity::SystemError,
            Self::Decode { .. } => ErrorSeverity::SystemError,
            Self::Api { .. } => ErrorSeverity::UserError,
        }
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::InvalidParameter { .. } => {
                Some("Parameter values must be strings, numbers, booleans, lists or maps (null is not allowed).")
            }
            Self::Transport(e) => e.hint(),
            Self::Decode { .. } => {
                Some("The server did not return JSON. Check the configured server and API version.")
            }
            Self::Api { .. } => Some(
                "The platform rejected the request. Authentication failures (wrong key or secret) are reported the same way.",
            ),
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
