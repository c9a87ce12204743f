/// アプリケーション設定モジュール
///
/// ビルド時に config.toml から読み込まれる静的設定を管理します。
/// これらの設定は実行時には変更できません。
use serde::Deserialize;
use std::sync::LazyLock;

/// 埋め込み済みのアプリケーション設定
pub static APP_CONFIG: LazyLock<AppConfig> = LazyLock::new(AppConfig::load);

/// アプリケーション全体の設定
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub management: ManagementDefaults,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

/// 管理APIの接続先デフォルト
#[derive(Debug, Clone, Deserialize)]
pub struct ManagementDefaults {
    /// プロトコル（https / http）
    pub protocol: String,

    /// APIサーバーのホスト名
    pub server: String,

    /// APIバージョン
    pub version: String,
}

/// HTTP関連の設定
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// リクエストのタイムアウト(秒)
    pub timeout_seconds: u64,
}

/// ロギング関連の設定
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// ログレベル (trace, debug, info, warn, error)
    pub level: String,
}

impl AppConfig {
    /// ビルド時に埋め込まれたconfig.tomlから設定を読み込む
    ///
    /// # Panics
    /// 設定ファイルのパースに失敗した場合はパニックします。
    /// これはビルド時設定なので、実行時エラーではなくコンパイルエラーとして扱うべきです。
    pub fn load() -> Self {
        const CONFIG_STR: &str = include_str!("../../config.toml");
        toml::from_str(CONFIG_STR)
            .expect("Failed to parse embedded config.toml. This is a build-time configuration error.")
    }
}
