/// 管理APIクライアント
///
/// 署名付きURLを組み立て、トランスポートで1回だけ送信し、
/// JSONレスポンスを解釈する。リトライやキャッシュは行わない。
use crate::api::auth::Credentials;
use crate::api::encoding::Params;
use crate::api::error::ManagementError;
use crate::api::request::{
    self, Clock, EndpointConfig, NonceSource, RandomNonce, SignedRequest, SystemClock,
};
use crate::api::transport::{HttpMethod, HttpRequest, HttpTransport, ReqwestTransport};
use crate::api::types::ApiResponse;
use crate::config::ClientConfig;
use serde_json::Value;
use tracing::{debug, warn};

/// APIクライアントの結果型
pub type ApiResult<T> = Result<T, ManagementError>;

/// 送信時のヘッダー
const REQUEST_HEADERS: [(&str, &str); 2] = [
    ("Accept", "application/json"),
    ("Content-Type", "application/json"),
];

/// 管理APIクライアント
pub struct ManagementClient<T = ReqwestTransport> {
    credentials: Credentials,
    endpoint: EndpointConfig,
    transport: T,
    nonce: Box<dyn NonceSource>,
    clock: Box<dyn Clock>,
}

impl ManagementClient<ReqwestTransport> {
    /// 解決済みの設定からクライアントを作成
    pub fn from_config(config: &ClientConfig) -> ApiResult<Self> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::with_transport(
            config.credentials.clone(),
            config.endpoint.clone(),
            transport,
        ))
    }
}

impl<T: HttpTransport> ManagementClient<T> {
    /// トランスポートを指定してクライアントを作成
    pub fn with_transport(credentials: Credentials, endpoint: EndpointConfig, transport: T) -> Self {
        Self {
            credentials,
            endpoint,
            transport,
            nonce: Box::new(RandomNonce),
            clock: Box::new(SystemClock),
        }
    }

    /// nonce の生成元を差し替える
    pub fn with_nonce_source(mut self, nonce: impl NonceSource + 'static) -> Self {
        self.nonce = Box::new(nonce);
        self
    }

    /// 時計を差し替える
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn endpoint(&self) -> &EndpointConfig {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 送信せずに署名付きURLを生成
    pub fn signed_url(&self, path: &str, params: &Params) -> ApiResult<SignedRequest> {
        request::assemble(
            &self.endpoint,
            &self.credentials,
            path,
            params,
            self.nonce.next_nonce(),
            self.clock.unix_timestamp(),
        )
    }

    /// APIを呼び出す
    ///
    /// # Arguments
    /// * `path` - APIパス（例: "/videos/list"）
    /// * `params` - 呼び出し側のパラメータ
    /// * `method` - HTTPメソッド
    ///
    /// # Errors
    /// パラメータ不正、トランスポート障害、デコード失敗、
    /// API が `status: "error"` を返した場合にそれぞれのエラーを返す。
    pub async fn call(&self, path: &str, params: &Params, method: HttpMethod) -> ApiResult<ApiResponse> {
        let signed = self.signed_url(path, params)?;
        let request = HttpRequest {
            method,
            url: signed.url,
            headers: REQUEST_HEADERS.to_vec(),
        };

        debug!(%method, path, "sending management API request");
        let response = self.transport.send(&request).await?;
        debug!(%method, path, status = response.status, "received response");

        let decoded = Self::decode_response(path, &response.body)?;
        if decoded.is_error() {
            let err = ManagementError::api(path, decoded.into_inner());
            if let ManagementError::Api { code, .. } = &err {
                warn!(%method, path, code = code.as_deref().unwrap_or("unknown"), "API reported an error");
            }
            return Err(err);
        }

        Ok(decoded)
    }

    /// GETで呼び出す
    pub async fn get(&self, path: &str, params: &Params) -> ApiResult<ApiResponse> {
        self.call(path, params, HttpMethod::Get).await
    }

    /// POSTで呼び出す（パラメータはクエリで送る）
    pub async fn post(&self, path: &str, params: &Params) -> ApiResult<ApiResponse> {
        self.call(path, params, HttpMethod::Post).await
    }

    /// レスポンス本文をJSONオブジェクトとしてデコード
    ///
    /// HTTPステータスは見ない。エラー判定は本文の `status` のみで行う。
    pub fn decode_response(path: &str, body: &str) -> ApiResult<ApiResponse> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ManagementError::decode(path, format!("invalid JSON: {}", e)))?;

        match value {
            Value::Object(map) => Ok(ApiResponse::new(map)),
            other => Err(ManagementError::decode(
                path,
                format!("expected a JSON object, found {}", json_kind(&other)),
            )),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::api::transport::{HttpResponse, TransportError};
    use std::sync::Mutex;

    /// 固定レスポンスを返し、送信内容を記録するトランスポート
    pub struct FakeTransport {
        responses: Mutex<Vec<Result<HttpResponse, TransportError>>>,
        pub sent: Mutex<Vec<HttpRequest>>,
    }

    impl FakeTransport {
        pub fn replying(body: &str) -> Self {
            Self::with_result(Ok(HttpResponse {
                status: 200,
                body: body.to_string(),
            }))
        }

        pub fn with_result(result: Result<HttpResponse, TransportError>) -> Self {
            Self {
                responses: Mutex::new(vec![result]),
                sent: Mutex::new(Vec::new()),
            }
        }

        pub fn last_request(&self) -> HttpRequest {
            self.sent
                .lock()
                .unwrap()
                .last()
                .cloned()
                .expect("no request was sent")
        }
    }

    impl HttpTransport for FakeTransport {
        async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            self.sent.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(TransportError::network("no scripted response")))
        }
    }

    pub struct FixedNonce(pub u32);

    impl NonceSource for FixedNonce {
        fn next_nonce(&self) -> u32 {
            self.0
        }
    }

    pub struct FixedClock(pub i64);

    impl Clock for FixedClock {
        fn unix_timestamp(&self) -> i64 {
            self.0
        }
    }

    pub fn client(transport: FakeTransport) -> ManagementClient<FakeTransport> {
        ManagementClient::with_transport(
            Credentials::new("key123", "s3cret"),
            EndpointConfig::new("https", "api.example.com", "v1"),
            transport,
        )
        .with_nonce_source(FixedNonce(42))
        .with_clock(FixedClock(1_700_000_000))
    }
}
