/// 設定管理モジュール
///
/// このモジュールは2層の設定構造を提供します:
/// 1. AppConfig - ビルド時に埋め込まれる静的設定（APP_CONFIG）
/// 2. UserConfig - 実行時に読み込まれるユーザー設定（認証情報・接続先の上書き）
///
/// クライアントはどちらも直接参照しません。起動時に一度だけ `ClientConfig::resolve` で
/// 解決した値を受け取ります。
///
/// # 使用例
///
/// ```rust,ignore
/// use jwmgmt::config::{APP_CONFIG, ClientConfig, ConfigOverrides, UserConfig};
///
/// let user_config = UserConfig::load()?;
/// let config = ClientConfig::resolve(&APP_CONFIG, &user_config, &ConfigOverrides::default())?;
/// let client = ManagementClient::from_config(&config)?;
/// ```
pub mod app;
pub mod error;
pub mod permissions;
pub mod user;

pub use app::{APP_CONFIG, AppConfig};
pub use error::ConfigError;
pub use user::UserConfig;

use crate::api::auth::Credentials;
use crate::api::request::EndpointConfig;
use std::time::Duration;

/// コンストラクタ引数としての明示的な指定
///
/// 指定された値はユーザー設定やデフォルトより優先されます。
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub key: Option<String>,
    pub secret: Option<String>,
    pub protocol: Option<String>,
    pub server: Option<String>,
    pub version: Option<String>,
}

/// 解決済みのクライアント設定
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub credentials: Credentials,
    pub endpoint: EndpointConfig,
    pub timeout: Duration,
}

impl ClientConfig {
    /// 設定を解決する
    ///
    /// 優先順位: 明示的な指定 > ユーザー設定 > アプリケーション設定のデフォルト
    ///
    /// # Errors
    /// key または secret がどこにも無い場合は ConfigError::CredentialsNotFound、
    /// 接続先の値が不正な場合は ConfigError::ValidationError を返します。
    pub fn resolve(
        app: &AppConfig,
        user: &UserConfig,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let m = &user.management;
        let merged = UserConfig {
            management: user::ManagementSection {
                key: pick(&overrides.key, &m.key),
                secret: pick(&overrides.secret, &m.secret),
                protocol: pick(&overrides.protocol, &m.protocol),
                server: pick(&overrides.server, &m.server),
                version: pick(&overrides.version, &m.version),
            },
        };
        let credentials = merged.credentials()?;

        let resolved = merged.management;
        let protocol = resolved
            .protocol
            .unwrap_or_else(|| app.management.protocol.clone());
        let server = resolved
            .server
            .unwrap_or_else(|| app.management.server.clone());
        let version = resolved
            .version
            .unwrap_or_else(|| app.management.version.clone());

        user::validate_protocol(&protocol)?;
        user::validate_server(&server)?;
        user::validate_version(&version)?;

        Ok(Self {
            credentials,
            endpoint: EndpointConfig::new(protocol, server, version),
            timeout: Duration::from_secs(app.http.timeout_seconds),
        })
    }
}

fn pick(primary: &Option<String>, fallback: &Option<String>) -> Option<String> {
    primary.clone().or_else(|| fallback.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::user::ManagementSection;

    fn user_with_credentials() -> UserConfig {
        let mut user = UserConfig::default();
        user.set_credentials("user_key".to_string(), "user_secret".to_string());
        user
    }

    #[test]
    fn test_resolve_uses_app_defaults() {
        let config =
            ClientConfig::resolve(&APP_CONFIG, &user_with_credentials(), &ConfigOverrides::default())
                .expect("Failed to resolve");

        assert_eq!(config.endpoint, EndpointConfig::new("https", "api.jwplatform.com", "v1"));
        assert_eq!(config.credentials.key(), "user_key");
        assert_eq!(config.timeout, Duration::from_secs(APP_CONFIG.http.timeout_seconds));
    }

    #[test]
    fn test_user_config_overrides_defaults() {
        let mut user = user_with_credentials();
        user.management.server = Some("api.example.com".to_string());
        user.management.version = Some("v2".to_string());

        let config = ClientConfig::resolve(&APP_CONFIG, &user, &ConfigOverrides::default()).unwrap();

        assert_eq!(config.endpoint.host, "api.example.com");
        assert_eq!(config.endpoint.api_version, "v2");
        assert_eq!(config.endpoint.protocol, "https");
    }

    #[test]
    fn test_explicit_overrides_win() {
        let overrides = ConfigOverrides {
            key: Some("explicit_key".to_string()),
            secret: Some("explicit_secret".to_string()),
            protocol: Some("http".to_string()),
            ..Default::default()
        };

        let config = ClientConfig::resolve(&APP_CONFIG, &user_with_credentials(), &overrides).unwrap();

        assert_eq!(config.credentials.key(), "explicit_key");
        assert_eq!(config.credentials, Credentials::new("explicit_key", "explicit_secret"));
        assert_eq!(config.endpoint.protocol, "http");
    }

    #[test]
    fn test_missing_credentials() {
        let user = UserConfig {
            management: ManagementSection {
                key: Some("only_key".to_string()),
                ..Default::default()
            },
        };

        let result = ClientConfig::resolve(&APP_CONFIG, &user, &ConfigOverrides::default());
        assert!(matches!(result, Err(ConfigError::CredentialsNotFound { .. })));
    }

    #[test]
    fn test_override_fills_missing_secret() {
        let user = UserConfig {
            management: ManagementSection {
                key: Some("only_key".to_string()),
                ..Default::default()
            },
        };
        let overrides = ConfigOverrides {
            secret: Some("explicit_secret".to_string()),
            ..Default::default()
        };

        let config = ClientConfig::resolve(&APP_CONFIG, &user, &overrides).unwrap();
        assert_eq!(config.credentials, Credentials::new("only_key", "explicit_secret"));
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let overrides = ConfigOverrides {
            server: Some("https://api.example.com".to_string()),
            ..Default::default()
        };

        let result = ClientConfig::resolve(&APP_CONFIG, &user_with_credentials(), &overrides);
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }
}
