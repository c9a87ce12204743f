/// ログインコマンド
///
/// API key と secret を検証し、ユーザー設定（config.toml）に保存します。
use crate::commands::result::{CommandResult, LoginResult};
use anyhow::{Context, Result};
use jwmgmt::api::{ManagementClient, ParamValue, Params};
use jwmgmt::api::client::ApiResult;
use jwmgmt::config::{APP_CONFIG, ClientConfig, ConfigOverrides, UserConfig};

/// 入力された認証情報
pub struct LoginCredentials {
    pub key: String,
    pub secret: String,
}

/// ログインコマンドを実行
///
/// # Arguments
/// * `credentials` - プレゼンテーション層で取得した認証情報
pub async fn execute(credentials: LoginCredentials) -> Result<CommandResult> {
    let mut config = UserConfig::load().context("Failed to load configuration file")?;
    let was_logged_in = config.has_credentials();

    // 保存済みの接続先上書きはそのまま使う
    let overrides = ConfigOverrides {
        key: Some(credentials.key.clone()),
        secret: Some(credentials.secret.clone()),
        ..Default::default()
    };
    let client_config = ClientConfig::resolve(&APP_CONFIG, &config, &overrides)
        .context("Failed to resolve API configuration")?;

    eprintln!("Verifying credentials...");
    let client =
        ManagementClient::from_config(&client_config).context("Failed to create API client")?;
    verify_credentials(&client)
        .await
        .context("Authentication failed. Please verify your API key and secret are correct.")?;

    let api_key = client.credentials().masked_key();
    config.set_credentials(credentials.key, credentials.secret);
    config.save().context("Failed to save configuration file")?;

    Ok(CommandResult::Login(LoginResult {
        was_logged_in,
        api_key,
    }))
}

/// 最小限の一覧取得で認証情報を確認する
///
/// 署名が誤っている場合もAPIは一般的なエラーを返すため、
/// 成功したかどうかだけを判定する。
pub async fn verify_credentials(client: &ManagementClient) -> ApiResult<()> {
    let params = Params::from([("result_limit".to_string(), ParamValue::from(1u32))]);
    client.list_videos(&params).await?;
    Ok(())
}
