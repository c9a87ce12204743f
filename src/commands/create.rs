/// 作成コマンド
///
/// 公開URLにある動画ファイルをプラットフォームに取り込ませます。
/// ファイルのアップロードは行いません（プラットフォーム側がダウンロードする）。
use crate::commands::build_client;
use crate::commands::result::{CommandResult, CreateResult};
use anyhow::{Context, Result};
use jwmgmt::api::types::VideoCreateResponse;
use jwmgmt::domain::{params, validator};

/// 作成コマンドを実行
///
/// # Arguments
/// * `source_url` - 動画ファイルのURL
/// * `tags` - タグ（カンマ区切り）
/// * `args` - `key=value` 形式のメタデータ（title など）
pub async fn execute(source_url: &str, tags: &str, args: &[String]) -> Result<CommandResult> {
    validator::validate_source_url(source_url)?;
    let metadata = params::parse_params(args).context("Invalid video metadata")?;

    let client = build_client()?;
    let raw = client
        .create_video(source_url, &metadata, tags)
        .await
        .context("Failed to create video")?;

    let video_key = raw
        .parse::<VideoCreateResponse>()
        .ok()
        .map(|r| r.video.key);

    Ok(CommandResult::Create(CreateResult {
        video_key,
        source_url: source_url.to_string(),
        raw,
    }))
}
