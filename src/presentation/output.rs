/// プレゼンテーション層: コマンド結果の出力
///
/// コマンド実行結果をユーザー向け（人間可読）または
/// 機械向け（JSON）形式で出力する責務を担います。
/// CLI使用方法の表示もこのモジュールが担当します。
use crate::commands::result::CommandResult;
use anyhow::Result;
use jwmgmt::api::types::VideoRecord;

/// ヘルプテキスト（単一の情報源）
const HELP_TEXT: &str = "jwmgmt
Signed command-line client for the video platform management API

Usage:
  jwmgmt [--machine] <command> [args...]

Global Flags:
  --machine        - Output machine-readable JSON to stdout (for scripting)
                     Works for both success and error cases

Available commands:
  login [--stdin]  - Store API credentials after verifying them
                     With --stdin: line 1 = API key, line 2 = API secret
  logout           - Remove stored API credentials
  status           - Check that the stored credentials work
  list [key=value...]
                   - List videos (e.g. result_limit=10)
  show <video_key> - Show a single video
  delete <video_key>
                   - Delete a video
  create <source_url> [--tags <tags>] [key=value...]
                   - Create a video from a public file URL
  update <video_key> [--tags <tags>] [key=value...]
                   - Update title, description, author and tags
                     (fields not given are sent as empty strings)
  get <path> [key=value...]
                   - Call any API path with GET
  post <path> [key=value...]
                   - Call any API path with POST (parameters stay in the query)
  sign <path> [key=value...]
                   - Print a signed URL without sending it
  help             - Display this help message

Configuration:
  Credentials and endpoint overrides are stored in the [management] section
  of the user config file (key, secret, protocol, server, version).

Logging:
  Set RUST_LOG (e.g. RUST_LOG=jwmgmt=debug) to see request logs on stderr.";

/// コマンド使用方法を表示する
pub fn print_usage() {
    eprintln!("{}", HELP_TEXT);
}

/// コマンド結果を適切な形式で出力する
///
/// # Output
/// * `machine_output = false`: 人間向けの詳細メッセージ（stderr）
/// * `machine_output = true`: 機械可読JSON（stdout）
pub fn output_result(result: &CommandResult, machine_output: bool) -> Result<()> {
    if machine_output {
        output_machine_readable(result)
    } else {
        output_human_readable(result)
    }
}

/// エラーを機械可読JSONで出力（stdout）
pub fn output_error_machine(message: &str, exit_code: i32, hint: Option<&str>) -> Result<()> {
    let json = serde_json::json!({
        "success": false,
        "error": message,
        "exit_code": exit_code,
        "hint": hint,
    });
    println!("{}", serde_json::to_string(&json)?);
    Ok(())
}

/// 人間向けの詳細メッセージを出力（stderr）
///
/// 署名付きURLと任意呼び出しのレスポンスだけは stdout に出す。
/// パイプで他のコマンドに渡す用途があるため。
fn output_human_readable(result: &CommandResult) -> Result<()> {
    match result {
        CommandResult::Login(r) => {
            eprintln!();
            eprintln!("✓ {}", result.success_message());
            eprintln!("API Key: {}", r.api_key);
            eprintln!("Credentials have been saved.");
        }
        CommandResult::Logout(_) => {
            eprintln!("{}", result.success_message());
        }
        CommandResult::Status(r) => {
            eprintln!();
            eprintln!("Endpoint: {}", r.endpoint);
            match (&r.api_key, r.is_authenticated) {
                (Some(key), true) => {
                    eprintln!("Authenticated");
                    eprintln!("API Key: {}", key);
                }
                (Some(key), false) => {
                    eprintln!("✗ Authentication failed");
                    eprintln!("  API Key: {}", key);
                    if let Some(error) = &r.error {
                        eprintln!("  Error: {}", error);
                    }
                    eprintln!();
                    eprintln!("Your key or secret may be wrong. Run 'jwmgmt login' to update them.");
                }
                (None, _) => {
                    eprintln!("Not logged in");
                    eprintln!("Please run 'jwmgmt login' to store your API credentials.");
                }
            }
        }
        CommandResult::Sign(r) => {
            eprintln!("Signature: {}", r.signature);
            println!("{}", r.url);
        }
        CommandResult::Call(r) => {
            eprintln!("{}", result.success_message());
            println!("{}", serde_json::to_string_pretty(&r.response)?);
        }
        CommandResult::List(r) => {
            eprintln!();
            if r.videos.is_empty() {
                eprintln!("No videos found.");
            } else {
                eprintln!("{}", result.success_message());
                eprintln!();
                for video in &r.videos {
                    print_video(video);
                    eprintln!("---");
                }
                if r.total_count > r.videos.len() as u64 {
                    eprintln!(
                        "Showing {} of {}. Use result_limit / result_offset to page.",
                        r.videos.len(),
                        r.total_count
                    );
                }
            }
        }
        CommandResult::Show(r) => {
            eprintln!();
            match &r.video {
                Some(video) => print_video(video),
                None => eprintln!("{}", serde_json::to_string_pretty(&r.raw)?),
            }
        }
        CommandResult::Create(r) => {
            eprintln!();
            eprintln!("✓ {}", result.success_message());
            eprintln!("Source: {}", r.source_url);
            if let Some(key) = &r.video_key {
                eprintln!("Video Key: {}", key);
            }
            eprintln!("The platform will fetch and transcode the file in the background.");
        }
        CommandResult::Update(r) => {
            eprintln!("✓ {}", result.success_message());
            eprintln!("Video Key: {}", r.video_key);
        }
        CommandResult::Delete(r) => {
            eprintln!("✓ {}", result.success_message());
            eprintln!("Video Key: {}", r.video_key);
        }
        CommandResult::Help => print_usage(),
    }

    Ok(())
}

fn print_video(video: &VideoRecord) {
    eprintln!("Video Key:   {}", video.key);
    if let Some(title) = &video.title {
        eprintln!("Title:       {}", title);
    }
    if let Some(status) = &video.status {
        eprintln!("Status:      {}", status);
    }
    if let Some(author) = video.author.as_deref().filter(|a| !a.is_empty()) {
        eprintln!("Author:      {}", author);
    }
    if let Some(description) = video.description.as_deref().filter(|d| !d.is_empty()) {
        eprintln!("Description: {}", description);
    }
}

/// 機械可読JSONを出力（stdout）
fn output_machine_readable(result: &CommandResult) -> Result<()> {
    println!("{}", serde_json::to_string(&machine_json(result))?);
    Ok(())
}

fn machine_json(result: &CommandResult) -> serde_json::Value {
    match result {
        // APIレスポンス全体を data として返す
        CommandResult::List(r) => serde_json::json!({
            "success": true,
            "command": "list",
            "data": r.raw,
            "total_count": r.total_count
        }),
        CommandResult::Show(r) => serde_json::json!({
            "success": true,
            "command": "show",
            "data": r.raw
        }),
        CommandResult::Create(r) => serde_json::json!({
            "success": true,
            "command": "create",
            "video_key": r.video_key,
            "source_url": r.source_url,
            "data": r.raw
        }),
        other => {
            let mut json = serde_json::to_value(other).unwrap_or_default();
            if let serde_json::Value::Object(map) = &mut json {
                map.insert("success".to_string(), serde_json::Value::Bool(true));
            }
            json
        }
    }
}
