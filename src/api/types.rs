/// API通信用の型定義
///
/// 管理APIのレスポンスはエンドポイントごとに形が異なるため、
/// 基本はJSONオブジェクトのまま保持し、必要な箇所だけ型付きで取り出す。
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// エラーを示す `status` の値
pub const STATUS_ERROR: &str = "error";

/// デコード済みレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiResponse(Map<String, Value>);

impl ApiResponse {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// `status` フィールド
    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(Value::as_str)
    }

    /// API がエラーを報告しているか
    pub fn is_error(&self) -> bool {
        self.status() == Some(STATUS_ERROR)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    /// 型付きの構造体として取り出す
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.0.clone()))
    }
}

/// 動画情報（/videos/list, /videos/show）
///
/// 表示に使うフィールドのみ。それ以外は ApiResponse から直接参照する。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRecord {
    pub key: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// /videos/list のレスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub videos: Vec<VideoRecord>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// /videos/show のレスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct VideoShowResponse {
    pub video: VideoRecord,
}

/// /videos/create のレスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct VideoCreateResponse {
    pub video: VideoKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoKey {
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> ApiResponse {
        serde_json::from_str(json).expect("Failed to parse")
    }

    #[test]
    fn test_status_detection() {
        assert!(response(r#"{"status":"error","message":"x"}"#).is_error());
        assert!(!response(r#"{"status":"ok"}"#).is_error());
        assert!(!response(r#"{"videos":[]}"#).is_error());
        assert_eq!(response(r#"{"videos":[]}"#).status(), None);
    }

    #[test]
    fn test_video_list_deserialization() {
        let json = r#"{
            "status": "ok",
            "videos": [
                {"key": "abc123", "title": "First", "status": "ready", "duration": "12.5"},
                {"key": "def456"}
            ],
            "total": 2
        }"#;

        let list: VideoListResponse = response(json).parse().expect("Failed to parse");

        assert_eq!(list.videos.len(), 2);
        assert_eq!(list.videos[0].key, "abc123");
        assert_eq!(list.videos[0].title.as_deref(), Some("First"));
        assert!(list.videos[1].title.is_none());
        assert_eq!(list.total, Some(2));
    }

    #[test]
    fn test_video_create_deserialization() {
        let created: VideoCreateResponse = response(r#"{"status":"ok","video":{"key":"n3wk3y"}}"#)
            .parse()
            .expect("Failed to parse");

        assert_eq!(created.video.key, "n3wk3y");
    }

    #[test]
    fn test_transparent_serialization() {
        let original = r#"{"status":"ok","videos":[]}"#;
        let serialized = serde_json::to_string(&response(original)).unwrap();
        assert_eq!(serialized, original);
    }
}
