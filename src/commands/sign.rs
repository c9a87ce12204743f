/// 署名コマンド
///
/// 送信せずに署名付きURLだけを生成します。ブラウザやcurlで
/// 直接呼び出したい場合や、署名の確認に使います。
use crate::commands::build_client;
use crate::commands::result::{CommandResult, SignResult};
use anyhow::{Context, Result};
use jwmgmt::domain::{params, validator};

/// 署名コマンドを実行
///
/// # Arguments
/// * `path` - APIパス
/// * `args` - `key=value` 形式のパラメータ
pub async fn execute(path: &str, args: &[String]) -> Result<CommandResult> {
    validator::validate_api_path(path)?;
    let params = params::parse_params(args).context("Invalid request parameters")?;

    let client = build_client()?;
    let signed = client
        .signed_url(path, &params)
        .context("Failed to sign request")?;

    Ok(CommandResult::Sign(SignResult {
        url: signed.url,
        signature: signed.signature,
        params: signed.params,
    }))
}
