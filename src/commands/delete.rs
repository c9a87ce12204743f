use crate::commands::build_client;
use crate::commands::result::{CommandResult, DeleteResult};
use anyhow::{Context, Result};
use jwmgmt::domain::validator;

/// 削除コマンドを実行する
///
/// 指定された動画を /videos/delete で削除します。
///
/// # 引数
/// * `video_key` - 削除対象の動画キー
pub async fn execute(video_key: &str) -> Result<CommandResult> {
    validator::validate_video_key(video_key)?;

    let client = build_client()?;
    client
        .delete_video(video_key)
        .await
        .with_context(|| format!("Failed to delete video {}", video_key))?;

    Ok(CommandResult::Delete(DeleteResult {
        video_key: video_key.to_string(),
    }))
}
