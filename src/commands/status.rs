/// ステータスコマンド
///
/// 保存された認証情報で管理APIにアクセスできるか確認します。
use crate::commands::login::verify_credentials;
use crate::commands::result::{CommandResult, StatusResult};
use anyhow::{Context, Result};
use jwmgmt::api::ManagementClient;
use jwmgmt::config::{APP_CONFIG, ClientConfig, ConfigOverrides, UserConfig};

/// ステータスコマンドを実行
pub async fn execute() -> Result<CommandResult> {
    let config = UserConfig::load().context("Failed to load configuration file")?;

    if !config.has_credentials() {
        return Ok(CommandResult::Status(StatusResult {
            is_authenticated: false,
            api_key: None,
            endpoint: default_endpoint(&config),
            error: None,
        }));
    }

    let client_config = ClientConfig::resolve(&APP_CONFIG, &config, &ConfigOverrides::default())
        .context("Failed to resolve API configuration")?;
    let client =
        ManagementClient::from_config(&client_config).context("Failed to create API client")?;

    let endpoint = client.endpoint().base_url("");
    let api_key = Some(client.credentials().masked_key());

    match verify_credentials(&client).await {
        Ok(()) => Ok(CommandResult::Status(StatusResult {
            is_authenticated: true,
            api_key,
            endpoint,
            error: None,
        })),
        Err(e) => Ok(CommandResult::Status(StatusResult {
            is_authenticated: false,
            api_key,
            endpoint,
            error: Some(e.to_string()),
        })),
    }
}

/// 認証情報が無い場合の表示用ベースURL
fn default_endpoint(config: &UserConfig) -> String {
    let m = &config.management;
    format!(
        "{}://{}/{}/",
        m.protocol.as_deref().unwrap_or(&APP_CONFIG.management.protocol),
        m.server.as_deref().unwrap_or(&APP_CONFIG.management.server),
        m.version.as_deref().unwrap_or(&APP_CONFIG.management.version),
    )
}
