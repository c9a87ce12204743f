/// 更新コマンド
///
/// title / description / author / tags を更新します。
/// 指定しなかった項目は空文字列で送られる点に注意（APIの仕様どおり上書きされる）。
use crate::commands::build_client;
use crate::commands::result::{CommandResult, UpdateResult};
use anyhow::{Context, Result};
use jwmgmt::domain::{params, validator};

/// 更新コマンドを実行
///
/// # Arguments
/// * `video_key` - 対象の動画キー
/// * `tags` - タグ（カンマ区切り）
/// * `args` - `key=value` 形式のメタデータ
pub async fn execute(video_key: &str, tags: &str, args: &[String]) -> Result<CommandResult> {
    validator::validate_video_key(video_key)?;
    let metadata = params::parse_params(args).context("Invalid video metadata")?;

    let client = build_client()?;
    client
        .update_video(video_key, &metadata, tags)
        .await
        .with_context(|| format!("Failed to update video {}", video_key))?;

    Ok(CommandResult::Update(UpdateResult {
        video_key: video_key.to_string(),
    }))
}
