use crate::commands::build_client;
use crate::commands::result::{CommandResult, ListResult};
use anyhow::{Context, Result};
use jwmgmt::api::types::VideoListResponse;
use jwmgmt::domain::params;

/// リストコマンドを実行する
///
/// /videos/list を呼び出して動画の一覧を取得します。
/// `result_limit=10` のような追加パラメータはそのまま送られます。
///
/// # 戻り値
/// 成功・失敗を示すResult<CommandResult>
pub async fn execute(args: &[String]) -> Result<CommandResult> {
    let params = params::parse_params(args).context("Invalid request parameters")?;

    let client = build_client()?;
    let raw = client
        .list_videos(&params)
        .await
        .context("Failed to fetch videos list")?;

    let list: VideoListResponse = raw
        .parse()
        .context("Unexpected /videos/list response format")?;
    let total_count = list.total.unwrap_or(list.videos.len() as u64);

    Ok(CommandResult::List(ListResult {
        videos: list.videos,
        total_count,
        raw,
    }))
}
