//! 署名付きリクエストURLの組み立て
//!
//! 呼び出し側のパラメータにシステムパラメータ（nonce / timestamp / key / format）を
//! 注入し、署名を計算してから `api_signature` として追加する。
use crate::api::auth::{Credentials, SIGNATURE_PARAM};
use crate::api::encoding::{ParamValue, Params, canonical_query};
use crate::api::error::ManagementError;
use rand::Rng;

pub const NONCE_PARAM: &str = "api_nonce";
pub const TIMESTAMP_PARAM: &str = "api_timestamp";
pub const KEY_PARAM: &str = "api_key";
pub const FORMAT_PARAM: &str = "api_format";

/// レスポンス形式（固定）
pub const RESPONSE_FORMAT: &str = "json";

/// nonce の最大値（8桁）
pub const MAX_NONCE: u32 = 99_999_999;

/// 呼び出し側が指定できないパラメータ名
pub const RESERVED_PARAMS: [&str; 5] = [
    NONCE_PARAM,
    TIMESTAMP_PARAM,
    KEY_PARAM,
    FORMAT_PARAM,
    SIGNATURE_PARAM,
];

/// nonce の生成元
pub trait NonceSource: Send + Sync {
    /// `0..=MAX_NONCE` の値を返す
    fn next_nonce(&self) -> u32;
}

/// 現在時刻の取得元
pub trait Clock: Send + Sync {
    /// Unix時刻（秒）
    fn unix_timestamp(&self) -> i64;
}

/// 乱数による nonce
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomNonce;

impl NonceSource for RandomNonce {
    fn next_nonce(&self) -> u32 {
        rand::thread_rng().gen_range(0..=MAX_NONCE)
    }
}

/// システム時計
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_timestamp(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// 接続先の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub protocol: String,
    pub host: String,
    pub api_version: String,
}

impl EndpointConfig {
    pub fn new(
        protocol: impl Into<String>,
        host: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            protocol: protocol.into(),
            host: host.into(),
            api_version: api_version.into(),
        }
    }

    /// クエリを含まないURLを構築
    ///
    /// パス先頭のスラッシュは取り除く。
    pub fn base_url(&self, path: &str) -> String {
        format!(
            "{}://{}/{}/{}",
            self.protocol,
            self.host,
            self.api_version,
            path.trim_start_matches('/')
        )
    }
}

/// 署名済みリクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// 完全なURL（クエリ込み）
    pub url: String,
    /// クエリ文字列
    pub query: String,
    /// `api_signature` の値
    pub signature: String,
    /// 署名を含む最終パラメータ
    pub params: Params,
}

/// nonce を8桁ゼロ埋めの文字列にする
pub fn format_nonce(nonce: u32) -> String {
    format!("{:08}", nonce.min(MAX_NONCE))
}

/// 署名済みリクエストを組み立てる
///
/// # Arguments
/// * `endpoint` - 接続先
/// * `credentials` - 認証情報
/// * `path` - APIパス（例: "/videos/list"）
/// * `params` - 呼び出し側のパラメータ
/// * `nonce` - nonce 値
/// * `timestamp` - Unix時刻（秒）
///
/// # Errors
/// 呼び出し側のパラメータにシステムパラメータ名が含まれる場合は
/// ManagementError::InvalidParameter を返す。
pub fn assemble(
    endpoint: &EndpointConfig,
    credentials: &Credentials,
    path: &str,
    params: &Params,
    nonce: u32,
    timestamp: i64,
) -> Result<SignedRequest, ManagementError> {
    if let Some(reserved) = RESERVED_PARAMS.iter().find(|name| params.contains_key(**name)) {
        return Err(ManagementError::invalid_parameter(
            *reserved,
            "system parameters are set by the client and cannot be supplied",
        ));
    }

    let mut merged = params.clone();
    merged.insert(NONCE_PARAM.to_string(), ParamValue::from(format_nonce(nonce)));
    merged.insert(TIMESTAMP_PARAM.to_string(), ParamValue::from(timestamp));
    merged.insert(KEY_PARAM.to_string(), ParamValue::from(credentials.key()));
    merged.insert(FORMAT_PARAM.to_string(), ParamValue::from(RESPONSE_FORMAT));

    let signature = credentials.sign(&merged)?;
    merged.insert(SIGNATURE_PARAM.to_string(), ParamValue::from(&signature));

    let query = canonical_query(&merged);
    let url = format!("{}?{}", endpoint.base_url(path), query);

    Ok(SignedRequest {
        url,
        query,
        signature,
        params: merged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> EndpointConfig {
        EndpointConfig::new("https", "api.example.com", "v1")
    }

    fn credentials() -> Credentials {
        Credentials::new("key123", "s3cret")
    }

    #[test]
    fn test_base_url_strips_leading_slash() {
        assert_eq!(
            endpoint().base_url("/videos/list"),
            "https://api.example.com/v1/videos/list"
        );
        assert_eq!(
            endpoint().base_url("videos/list"),
            "https://api.example.com/v1/videos/list"
        );
        assert_eq!(
            endpoint().base_url("//videos/update/"),
            "https://api.example.com/v1/videos/update/"
        );
    }

    #[test]
    fn test_format_nonce_zero_padded() {
        assert_eq!(format_nonce(0), "00000000");
        assert_eq!(format_nonce(42), "00000042");
        assert_eq!(format_nonce(MAX_NONCE), "99999999");
        assert_eq!(format_nonce(u32::MAX), "99999999");
    }

    #[test]
    fn test_random_nonce_in_range() {
        let source = RandomNonce;
        for _ in 0..1000 {
            assert!(source.next_nonce() <= MAX_NONCE);
        }
    }

    #[test]
    fn test_system_clock_is_recent() {
        // 2023-11-14 以降であること
        assert!(SystemClock.unix_timestamp() > 1_700_000_000);
    }

    #[test]
    fn test_assemble_known_request() {
        let mut params = Params::new();
        params.insert("result_limit".to_string(), ParamValue::from(1u32));

        let request = assemble(
            &endpoint(),
            &credentials(),
            "/videos/list",
            &params,
            42,
            1_700_000_000,
        )
        .unwrap();

        assert_eq!(request.signature, "2d370587148b15c86c9c3aca7b1dd424e5614845");
        assert_eq!(
            request.url,
            "https://api.example.com/v1/videos/list?api_format=json&api_key=key123&api_nonce=00000042&api_signature=2d370587148b15c86c9c3aca7b1dd424e5614845&api_timestamp=1700000000&result_limit=1"
        );
        assert!(request.url.ends_with(&request.query));
    }

    #[test]
    fn test_assemble_injects_system_params() {
        let request = assemble(
            &endpoint(),
            &credentials(),
            "videos/list",
            &Params::new(),
            7,
            1_700_000_123,
        )
        .unwrap();

        assert_eq!(request.params[NONCE_PARAM], ParamValue::from("00000007"));
        assert_eq!(request.params[TIMESTAMP_PARAM], ParamValue::from("1700000123"));
        assert_eq!(request.params[KEY_PARAM], ParamValue::from("key123"));
        assert_eq!(request.params[FORMAT_PARAM], ParamValue::from("json"));
        assert_eq!(
            request.params[SIGNATURE_PARAM],
            ParamValue::from(request.signature.as_str())
        );
        assert_eq!(request.params.len(), 5);
    }

    #[test]
    fn test_signature_computed_before_its_field_exists() {
        let request = assemble(
            &endpoint(),
            &credentials(),
            "/videos/list",
            &Params::new(),
            42,
            1_700_000_000,
        )
        .unwrap();

        // 署名フィールドを除いた集合で再計算すると一致する
        let mut without_signature = request.params.clone();
        without_signature.remove(SIGNATURE_PARAM);
        assert_eq!(
            credentials().sign(&without_signature).unwrap(),
            request.signature
        );

        // 署名フィールドを残したまま再署名することはできない
        assert!(credentials().sign(&request.params).is_err());
    }

    #[test]
    fn test_assemble_rejects_reserved_params() {
        for reserved in RESERVED_PARAMS {
            let mut params = Params::new();
            params.insert(reserved.to_string(), ParamValue::from("x"));

            let result = assemble(&endpoint(), &credentials(), "/videos/list", &params, 1, 1);
            assert!(
                matches!(result, Err(ManagementError::InvalidParameter { ref key, .. }) if key == reserved),
                "{} should be rejected",
                reserved
            );
        }
    }

    #[test]
    fn test_assemble_encodes_query_values() {
        let mut params = Params::new();
        params.insert("title".to_string(), ParamValue::from("My Video & more"));

        let request = assemble(&endpoint(), &credentials(), "/videos/update/", &params, 1, 1).unwrap();

        assert!(request.url.starts_with("https://api.example.com/v1/videos/update/?"));
        assert!(request.query.contains("title=My%20Video%20%26%20more"));
        assert!(!request.query.contains('+'));
    }
}
