/// 任意呼び出しコマンド（get / post）
///
/// 任意のAPIパスを署名付きで呼び出し、レスポンスをそのまま返します。
use crate::commands::build_client;
use crate::commands::result::{CallResult, CommandResult};
use anyhow::{Context, Result};
use jwmgmt::api::HttpMethod;
use jwmgmt::domain::{params, validator};

/// 呼び出しコマンドを実行
///
/// # Arguments
/// * `method` - HTTPメソッド
/// * `path` - APIパス（例: "/videos/list"）
/// * `args` - `key=value` 形式のパラメータ
pub async fn execute(method: HttpMethod, path: &str, args: &[String]) -> Result<CommandResult> {
    validator::validate_api_path(path)?;
    let params = params::parse_params(args).context("Invalid request parameters")?;

    let client = build_client()?;
    let response = client
        .call(path, &params, method)
        .await
        .with_context(|| format!("{} {} failed", method, path))?;

    Ok(CommandResult::Call(CallResult {
        method,
        path: path.to_string(),
        response,
    }))
}
