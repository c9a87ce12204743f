/// 動画管理操作
///
/// `call` の上に載るデータ整形だけのラッパー。独自のロジックは持たない。
use crate::api::client::{ApiResult, ManagementClient};
use crate::api::encoding::{ParamValue, Params};
use crate::api::transport::HttpTransport;
use crate::api::types::ApiResponse;

pub const CREATE_PATH: &str = "/videos/create";
pub const UPDATE_PATH: &str = "/videos/update/";
pub const LIST_PATH: &str = "/videos/list";
pub const SHOW_PATH: &str = "/videos/show";
pub const DELETE_PATH: &str = "/videos/delete";

/// 更新時に必ず送るメタデータ項目
const UPDATE_FIELDS: [&str; 3] = ["title", "description", "author"];

/// 動画作成パラメータを組み立てる
///
/// 基本レコード `{sourcetype: "file", download_url, tags}` に metadata を重ねる。
/// キーが衝突した場合は metadata が優先。
pub fn create_video_params(source_url: &str, metadata: &Params, tags: &str) -> Params {
    let mut params = Params::new();
    params.insert("sourcetype".to_string(), ParamValue::from("file"));
    params.insert("download_url".to_string(), ParamValue::from(source_url));
    params.insert("tags".to_string(), ParamValue::from(tags));

    params.extend(metadata.iter().map(|(k, v)| (k.clone(), v.clone())));
    params
}

/// 動画更新パラメータを組み立てる
///
/// title / description / author が無いか空なら空文字列を送る。
/// それ以外の metadata の項目は送らない。
pub fn update_video_params(video_key: &str, metadata: &Params, tags: &str) -> Params {
    let mut params = Params::new();
    params.insert("video_key".to_string(), ParamValue::from(video_key));
    params.insert("tags".to_string(), ParamValue::from(tags));

    for field in UPDATE_FIELDS {
        let value = match metadata.get(field) {
            Some(value) if !value.is_empty() => value.clone(),
            _ => ParamValue::from(""),
        };
        params.insert(field.to_string(), value);
    }

    params
}

impl<T: HttpTransport> ManagementClient<T> {
    /// URLを指定して動画を作成
    pub async fn create_video(
        &self,
        source_url: &str,
        metadata: &Params,
        tags: &str,
    ) -> ApiResult<ApiResponse> {
        self.post(CREATE_PATH, &create_video_params(source_url, metadata, tags))
            .await
    }

    /// 動画のメタデータを更新
    pub async fn update_video(
        &self,
        video_key: &str,
        metadata: &Params,
        tags: &str,
    ) -> ApiResult<ApiResponse> {
        self.post(UPDATE_PATH, &update_video_params(video_key, metadata, tags))
            .await
    }

    /// 動画一覧を取得
    pub async fn list_videos(&self, params: &Params) -> ApiResult<ApiResponse> {
        self.get(LIST_PATH, params).await
    }

    /// 動画の詳細を取得
    pub async fn show_video(&self, video_key: &str) -> ApiResult<ApiResponse> {
        self.get(SHOW_PATH, &video_key_param(video_key)).await
    }

    /// 動画を削除
    pub async fn delete_video(&self, video_key: &str) -> ApiResult<ApiResponse> {
        self.post(DELETE_PATH, &video_key_param(video_key)).await
    }
}

fn video_key_param(video_key: &str) -> Params {
    Params::from([("video_key".to_string(), ParamValue::from(video_key))])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::testing::{FakeTransport, client as test_client};
    use crate::api::transport::HttpMethod;

    fn metadata(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), ParamValue::from(*v)))
            .collect()
    }

    #[test]
    fn test_update_params_fill_missing_fields() {
        let params = update_video_params("tok", &metadata(&[("title", "T")]), "");

        let expected = metadata(&[
            ("video_key", "tok"),
            ("title", "T"),
            ("description", ""),
            ("author", ""),
            ("tags", ""),
        ]);
        assert_eq!(params, expected);
    }

    #[test]
    fn test_update_params_empty_nested_values_become_empty_strings() {
        let mut meta = Params::new();
        meta.insert("title".to_string(), ParamValue::List(vec![]));
        meta.insert("description".to_string(), ParamValue::Map(Default::default()));
        meta.insert("author".to_string(), ParamValue::List(vec![ParamValue::from("A")]));

        let params = update_video_params("tok", &meta, "");

        assert_eq!(params["title"], ParamValue::from(""));
        assert_eq!(params["description"], ParamValue::from(""));
        assert_eq!(params["author"], ParamValue::List(vec![ParamValue::from("A")]));
        assert_eq!(
            crate::api::encoding::canonical_query(&params),
            "author%5B0%5D=A&description=&tags=&title=&video_key=tok"
        );
    }

    #[test]
    fn test_update_params_ignore_other_metadata() {
        let params = update_video_params(
            "tok",
            &metadata(&[("title", ""), ("author", "A"), ("link", "https://example.com")]),
            "news,sports",
        );

        assert_eq!(params["title"], ParamValue::from(""));
        assert_eq!(params["author"], ParamValue::from("A"));
        assert_eq!(params["tags"], ParamValue::from("news,sports"));
        assert!(!params.contains_key("link"));
    }

    #[test]
    fn test_create_params_metadata_overrides_base() {
        let params = create_video_params(
            "https://cdn.example.com/v.mp4",
            &metadata(&[("tags", "override")]),
            "",
        );

        assert_eq!(params["tags"], ParamValue::from("override"));
        assert_eq!(params["sourcetype"], ParamValue::from("file"));
        assert_eq!(
            params["download_url"],
            ParamValue::from("https://cdn.example.com/v.mp4")
        );
    }

    #[test]
    fn test_create_params_keep_base_and_extra_metadata() {
        let params = create_video_params(
            "https://cdn.example.com/v.mp4",
            &metadata(&[("title", "Launch")]),
            "promo",
        );

        assert_eq!(params.len(), 4);
        assert_eq!(params["tags"], ParamValue::from("promo"));
        assert_eq!(params["title"], ParamValue::from("Launch"));
    }

    #[tokio::test]
    async fn test_create_video_posts_to_create_path() {
        let client = test_client(FakeTransport::replying(
            r#"{"status":"ok","video":{"key":"n3wk3y"}}"#,
        ));

        let response = client
            .create_video("https://cdn.example.com/v.mp4", &Params::new(), "")
            .await
            .unwrap();

        let sent = client_last_request(&client);
        assert_eq!(sent.method, HttpMethod::Post);
        assert!(sent.url.starts_with("https://api.example.com/v1/videos/create?"));
        assert!(sent.url.contains("download_url=https%3A%2F%2Fcdn.example.com%2Fv.mp4"));
        assert!(sent.url.contains("sourcetype=file"));
        assert_eq!(response.status(), Some("ok"));
    }

    #[tokio::test]
    async fn test_update_video_posts_to_update_path() {
        let client = test_client(FakeTransport::replying(r#"{"status":"ok"}"#));

        client
            .update_video("tok", &metadata(&[("title", "T")]), "")
            .await
            .unwrap();

        let sent = client_last_request(&client);
        assert_eq!(sent.method, HttpMethod::Post);
        assert!(sent.url.starts_with("https://api.example.com/v1/videos/update/?"));
        assert!(sent.url.contains("&author=&"));
        assert!(sent.url.contains("video_key=tok"));
    }

    #[tokio::test]
    async fn test_show_and_delete_send_video_key() {
        let client = test_client(FakeTransport::replying(r#"{"status":"ok"}"#));
        client.show_video("abc").await.unwrap();
        let sent = client_last_request(&client);
        assert_eq!(sent.method, HttpMethod::Get);
        assert!(sent.url.starts_with("https://api.example.com/v1/videos/show?"));
        assert!(sent.url.ends_with("&video_key=abc"));

        let client = test_client(FakeTransport::replying(r#"{"status":"ok"}"#));
        client.delete_video("abc").await.unwrap();
        let sent = client_last_request(&client);
        assert_eq!(sent.method, HttpMethod::Post);
        assert!(sent.url.starts_with("https://api.example.com/v1/videos/delete?"));
    }

    fn client_last_request(
        client: &ManagementClient<FakeTransport>,
    ) -> crate::api::transport::HttpRequest {
        client.transport().last_request()
    }
}
