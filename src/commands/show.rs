use crate::commands::build_client;
use crate::commands::result::{CommandResult, ShowResult};
use anyhow::{Context, Result};
use jwmgmt::api::types::VideoShowResponse;
use jwmgmt::domain::validator;

/// 詳細コマンドを実行する
///
/// # 引数
/// * `video_key` - 対象の動画キー
pub async fn execute(video_key: &str) -> Result<CommandResult> {
    validator::validate_video_key(video_key)?;

    let client = build_client()?;
    let raw = client
        .show_video(video_key)
        .await
        .with_context(|| format!("Failed to fetch video {}", video_key))?;

    // 表示用の型に合わない場合も raw はそのまま返す
    let video = raw.parse::<VideoShowResponse>().ok().map(|r| r.video);

    Ok(CommandResult::Show(ShowResult { video, raw }))
}
