/// ユーザー設定モジュール
///
/// 実行時にユーザーディレクトリから読み込まれる動的設定を管理します。
/// Windows: C:\Users\<User>\AppData\Roaming\jwmgmt\config.toml
/// macOS:   /Users/<User>/Library/Application Support/jwmgmt/config.toml
/// Linux:   /home/<user>/.config/jwmgmt/config.toml
///
/// 初回起動時にデフォルトのテンプレートから自動的にconfig.tomlを作成します。
use crate::api::auth::Credentials;
use crate::config::error::ConfigError;
use crate::config::permissions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 使用可能なプロトコル
const SUPPORTED_PROTOCOLS: [&str; 2] = ["https", "http"];

/// `[management]` セクション
///
/// 未指定の項目はアプリケーション設定のデフォルトが使われる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagementSection {
    /// API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// API shared secret
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,

    /// プロトコルの上書き
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    /// サーバーの上書き
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,

    /// APIバージョンの上書き
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// ユーザー設定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub management: ManagementSection,
}

impl UserConfig {
    /// ユーザー設定ファイルのパスを取得
    ///
    /// # Errors
    /// 設定ディレクトリが取得できない場合に ConfigError::DirectoryNotFound を返します。
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .ok_or_else(|| ConfigError::directory_not_found("Failed to get user config directory"))
            .map(|config_dir| config_dir.join("jwmgmt").join("config.toml"))
    }

    /// ユーザー設定を読み込む
    ///
    /// 設定ファイルが存在しない場合は、デフォルトテンプレートから自動的に作成します。
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定したパスからユーザー設定を読み込む
    ///
    /// 読み込み後、自動的に検証を実行します（Fail Fast）。
    ///
    /// # Errors
    /// 設定ファイルの読み込み、パース、または検証に失敗した場合に ConfigError を返します。
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to read config file: {}", config_path.display()),
                e,
            )
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ConfigError::parse_error(
                format!("Failed to parse config file ({})", config_path.display()),
                e,
            )
        })?;

        config.validate()?;

        Ok(config)
    }

    /// デフォルト設定ファイルを作成
    fn create_default_config(config_path: &Path) -> Result<(), ConfigError> {
        create_parent_dir(config_path)?;

        fs::write(config_path, Self::default_toml_content()).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to create default config file: {}", config_path.display()),
                e,
            )
        })?;

        permissions::restrict_to_owner(config_path)
    }

    fn default_toml_content() -> &'static str {
        r#"# jwmgmt - User Configuration
# API credentials are stored here by 'jwmgmt login'

[management]
# key = "your-api-key"
# secret = "your-api-secret"

# Optional endpoint overrides (defaults: https / api.jwplatform.com / v1)
# protocol = "https"
# server = "api.jwplatform.com"
# version = "v1"
"#
    }

    /// ユーザー設定を保存する
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// 指定したパスにユーザー設定を保存する
    ///
    /// secret を含むため、保存後に所有者のみ読み書き可能にします。
    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        create_parent_dir(config_path)?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::serialize_error("Failed to serialize config", e))?;

        fs::write(config_path, content).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to write config file: {}", config_path.display()),
                e,
            )
        })?;

        permissions::restrict_to_owner(config_path)
    }

    /// ユーザー設定を検証
    ///
    /// # 検証内容
    /// - key / secret: 指定されている場合は空文字列でないこと
    /// - protocol: https または http
    /// - server: 空でなく、スキームやパスを含まないこと
    /// - version: 空でなく、スラッシュを含まないこと
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.management;

        if let Some(key) = &m.key {
            Self::validate_non_empty(key, "management.key")?;
        }
        if let Some(secret) = &m.secret {
            Self::validate_non_empty(secret, "management.secret")?;
        }
        if let Some(protocol) = &m.protocol {
            validate_protocol(protocol)?;
        }
        if let Some(server) = &m.server {
            validate_server(server)?;
        }
        if let Some(version) = &m.version {
            validate_version(version)?;
        }

        Ok(())
    }

    fn validate_non_empty(value: &str, field_name: &str) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::validation_error(format!(
                "{} cannot be empty. Please run 'jwmgmt login' again.",
                field_name
            )));
        }
        Ok(())
    }

    /// 認証情報を設定
    pub fn set_credentials(&mut self, key: String, secret: String) {
        self.management.key = Some(key);
        self.management.secret = Some(secret);
    }

    /// 認証情報が存在するかチェック
    pub fn has_credentials(&self) -> bool {
        self.management.key.is_some() && self.management.secret.is_some()
    }

    /// 認証情報を取得
    ///
    /// # Errors
    /// key または secret が未設定（空文字列を含む）の場合に
    /// ConfigError::CredentialsNotFound を返します。
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        match (&self.management.key, &self.management.secret) {
            (Some(key), Some(secret)) if !key.is_empty() && !secret.is_empty() => {
                Ok(Credentials::new(key.clone(), secret.clone()))
            }
            _ => Err(ConfigError::credentials_not_found(
                "management.key and management.secret are not set. Please run 'jwmgmt login' first.",
            )),
        }
    }

    /// 認証情報を削除
    pub fn clear_credentials(&mut self) {
        self.management.key = None;
        self.management.secret = None;
    }
}

pub(crate) fn validate_protocol(protocol: &str) -> Result<(), ConfigError> {
    if !SUPPORTED_PROTOCOLS.contains(&protocol) {
        return Err(ConfigError::validation_error(format!(
            "Invalid management.protocol '{}'. Must be one of: {}",
            protocol,
            SUPPORTED_PROTOCOLS.join(", ")
        )));
    }
    Ok(())
}

pub(crate) fn validate_server(server: &str) -> Result<(), ConfigError> {
    if server.trim().is_empty() || server.contains('/') || server.contains(char::is_whitespace) {
        return Err(ConfigError::validation_error(format!(
            "Invalid management.server '{}'. Use a bare host name such as api.jwplatform.com",
            server
        )));
    }
    Ok(())
}

pub(crate) fn validate_version(version: &str) -> Result<(), ConfigError> {
    if version.trim().is_empty() || version.contains('/') {
        return Err(ConfigError::validation_error(format!(
            "Invalid management.version '{}'. Use a single path segment such as v1",
            version
        )));
    }
    Ok(())
}

fn create_parent_dir(config_path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to create config directory: {}", parent.display()),
                e,
            )
        })?;
    }
    Ok(())
}
