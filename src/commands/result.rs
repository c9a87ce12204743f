/// コマンド実行結果を表す型
///
/// 各コマンドはこの型を返し、プレゼンテーション層（main.rs/cli.rs）で
/// 人間向けと機械向けの出力フォーマットを決定する。
use jwmgmt::api::types::{ApiResponse, VideoRecord};
use jwmgmt::api::{HttpMethod, Params};
use serde::Serialize;

/// コマンド実行結果の統一型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandResult {
    Login(LoginResult),
    Logout(LogoutResult),
    Status(StatusResult),
    Sign(SignResult),
    Call(CallResult),
    List(ListResult),
    Show(ShowResult),
    Create(CreateResult),
    Update(UpdateResult),
    Delete(DeleteResult),
    Help,
}

/// ログインコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    /// 既にログイン済みだったか（上書き更新の場合true）
    pub was_logged_in: bool,
    /// マスキングされた API key
    pub api_key: String,
}

/// ログアウトコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct LogoutResult {
    pub was_logged_in: bool,
}

/// ステータスコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct StatusResult {
    /// 認証が通っているか
    pub is_authenticated: bool,
    /// マスキングされた API key（認証情報がある場合）
    pub api_key: Option<String>,
    /// 接続先のベースURL
    pub endpoint: String,
    /// 認証に失敗した場合の理由
    pub error: Option<String>,
}

/// 署名コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct SignResult {
    pub url: String,
    pub signature: String,
    pub params: Params,
}

/// 任意呼び出し（get / post）の結果
#[derive(Debug, Clone, Serialize)]
pub struct CallResult {
    #[serde(serialize_with = "serialize_method")]
    pub method: HttpMethod,
    pub path: String,
    pub response: ApiResponse,
}

/// 一覧コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct ListResult {
    pub videos: Vec<VideoRecord>,
    pub total_count: u64,
    /// APIレスポンス全体（--machine 出力用）
    pub raw: ApiResponse,
}

/// 詳細コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct ShowResult {
    pub video: Option<VideoRecord>,
    pub raw: ApiResponse,
}

/// 作成コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct CreateResult {
    /// 作成された動画のキー（レスポンスに含まれる場合）
    pub video_key: Option<String>,
    pub source_url: String,
    pub raw: ApiResponse,
}

/// 更新コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct UpdateResult {
    pub video_key: String,
}

/// 削除コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResult {
    pub video_key: String,
}

fn serialize_method<S: serde::Serializer>(method: &HttpMethod, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(method.as_str())
}

impl CommandResult {
    /// 成功メッセージを取得（人間向け出力用）
    pub fn success_message(&self) -> String {
        match self {
            CommandResult::Login(r) => {
                if r.was_logged_in {
                    "Login credentials updated!".to_string()
                } else {
                    "Login successful!".to_string()
                }
            }
            CommandResult::Logout(r) => {
                if r.was_logged_in {
                    "Logged out successfully.".to_string()
                } else {
                    "Already logged out.".to_string()
                }
            }
            CommandResult::Status(r) => {
                if r.is_authenticated {
                    "Authenticated".to_string()
                } else {
                    "Not authenticated".to_string()
                }
            }
            CommandResult::Sign(_) => "Signed URL generated.".to_string(),
            CommandResult::Call(r) => format!("{} {} succeeded.", r.method, r.path),
            CommandResult::List(r) => format!("Found {} video(s).", r.total_count),
            CommandResult::Show(_) => "Video details retrieved.".to_string(),
            CommandResult::Create(_) => "Video created.".to_string(),
            CommandResult::Update(_) => "Video updated.".to_string(),
            CommandResult::Delete(_) => "Video deleted.".to_string(),
            CommandResult::Help => "".to_string(),
        }
    }
}
