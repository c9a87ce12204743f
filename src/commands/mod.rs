pub mod call;
pub mod create;
pub mod delete;
pub mod help;
pub mod list;
pub mod login;
pub mod logout;
pub mod result;
pub mod show;
pub mod sign;
pub mod status;
pub mod update;

pub use result::CommandResult;

use anyhow::{Context, Result};
use jwmgmt::api::ManagementClient;
use jwmgmt::config::{APP_CONFIG, ClientConfig, ConfigOverrides, UserConfig};

/// ユーザー設定から解決した設定を返す
///
/// 設定はここで一度だけ読み込み、以降の呼び出しでは参照しない。
pub fn resolve_config() -> Result<ClientConfig> {
    let user_config = UserConfig::load()
        .context("Failed to load user configuration. Please check your config.toml file.")?;

    ClientConfig::resolve(&APP_CONFIG, &user_config, &ConfigOverrides::default())
        .context("Failed to resolve API configuration")
}

/// 設定済みのAPIクライアントを作成
pub fn build_client() -> Result<ManagementClient> {
    let config = resolve_config()?;
    ManagementClient::from_config(&config).context("Failed to create API client")
}
