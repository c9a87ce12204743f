/// ログアウトコマンド
///
/// 保存されている API key と secret を削除します。
/// 接続先の上書き設定は残します。
use crate::commands::result::{CommandResult, LogoutResult};
use anyhow::{Context, Result};
use jwmgmt::config::UserConfig;

/// ログアウトコマンドを実行
pub async fn execute() -> Result<CommandResult> {
    let mut config = UserConfig::load().context("Failed to load configuration file")?;

    let was_logged_in = config.has_credentials();
    if !was_logged_in {
        return Ok(CommandResult::Logout(LogoutResult {
            was_logged_in: false,
        }));
    }

    config.clear_credentials();
    config.save().context("Failed to save configuration file")?;

    Ok(CommandResult::Logout(LogoutResult {
        was_logged_in: true,
    }))
}
