/// ドメイン層のエラー定義
///
/// コマンド引数の制約違反を構造化して定義。
/// 外部クレートのエラーは含まず、純粋に入力の制約違反を表現する。
use crate::error_severity::ErrorSeverity;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    /// `key=value` 形式でない引数
    #[error("invalid parameter argument '{arg}' (expected key=value)")]
    MalformedParameter { arg: String },

    /// 同じキーが複数回指定された
    #[error("parameter '{key}' was given more than once")]
    DuplicateParameter { key: String },

    /// APIパスが不正
    #[error("invalid API path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// 動画キーが不正
    #[error("invalid video key '{key}'")]
    InvalidVideoKey { key: String },

    /// 動画のソースURLが不正
    #[error("invalid source URL '{url}' (expected http:// or https://)")]
    InvalidSourceUrl { url: String },
}

impl DomainError {
    pub fn malformed_parameter(arg: impl Into<String>) -> Self {
        Self::MalformedParameter { arg: arg.into() }
    }

    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// エラーの深刻度を返す
    ///
    /// すべて利用者が直せる入力エラー
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::UserError
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::MalformedParameter { .. } => Some("Pass parameters as key=value, e.g. result_limit=10"),
            Self::DuplicateParameter { .. } => Some("Each parameter key may appear only once."),
            Self::InvalidPath { .. } => {
                Some("Give the API path without the version or query, e.g. /videos/list")
            }
            Self::InvalidVideoKey { .. } => {
                Some("Video keys are the short alphanumeric identifiers shown by 'jwmgmt list'.")
            }
            Self::InvalidSourceUrl { .. } => {
                Some("The platform downloads the file itself, so it must be a public http(s) URL.")
            }
        }
    }
}
