//! エラー深刻度と終了コード
//!
//! api / config / domain の各層のエラーはこの分類に写像され、
//! バイナリ側で終了コードの決定に使われる。
//! このモジュールは他のモジュールに依存しない。

use std::fmt;

/// エラーの深刻度と対応する終了コード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// 利用者が直せるエラー
    ///
    /// `key=value` 引数の形式違反、予約済みの `api_*` パラメータとの衝突、
    /// API が `status: "error"` で拒否したリクエスト。
    ///
    /// **Exit Code: 1**
    UserError,

    /// 設定エラー
    ///
    /// key / secret が未設定、設定ファイルの TOML が壊れている、
    /// protocol / server / version の値が不正。
    ///
    /// **Exit Code: 2**
    ConfigError,

    /// システムエラー
    ///
    /// 接続失敗やタイムアウト、本文が JSON オブジェクトでないレスポンス（Decode）、
    /// 設定ディレクトリの読み書き失敗。
    ///
    /// **Exit Code: 3**
    SystemError,
}

impl ErrorSeverity {
    /// 対応する Unix 終了コードを返す
    pub fn exit_code(self) -> i32 {
        match self {
            Self::UserError => 1,
            Self::ConfigError => 2,
            Self::SystemError => 3,
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserError => write!(f, "user error"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::SystemError => write!(f, "system error"),
        }
    }
}
