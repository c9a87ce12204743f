/// HTTPトランスポート
///
/// 署名済みURLを実際に送信する外部コラボレーター。
/// クライアント本体はこのトレイト越しにのみ通信するため、
/// テストではインメモリ実装に差し替えられる。
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// HTTPメソッド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 送信するリクエスト
///
/// パラメータはすべてURLのクエリに含まれる。POSTでも本文は送らない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(&'static str, &'static str)>,
}

/// 受信したレスポンス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// トランスポート層のエラー
#[derive(Error, Debug)]
pub enum TransportError {
    /// ネットワークエラー（接続失敗、DNS、TLS など）
    #[error("network error: {message}")]
    Network { message: String },

    /// タイムアウト
    #[error("operation timed out: {operation}")]
    Timeout { operation: String },
}

impl TransportError {
    /// ネットワークエラーを作成
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// タイムアウトエラーを作成
    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Network { .. } => Some("Check your network connection and the configured server."),
            Self::Timeout { .. } => Some("The server did not respond in time. Try again later."),
        }
    }
}

/// HTTPトランスポートの抽象
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    /// リクエストを1回だけ送信し、本文を最後まで読み込んで返す
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// reqwest による標準トランスポート
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// タイムアウトを指定してトランスポートを作成
    ///
    /// # Arguments
    /// * `timeout` - リクエスト全体のタイムアウト
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(*name, *value);
        }

        // 署名入りURLはエラーメッセージに含めない
        let operation = request.method.as_str();
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::timeout(format!("{} request", operation))
            } else if e.is_connect() {
                TransportError::network(format!(
                    "Connection failed for {} request: {}",
                    operation,
                    e.without_url()
                ))
            } else {
                TransportError::network(format!(
                    "Request failed for {} request: {}",
                    operation,
                    e.without_url()
                ))
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::timeout(format!("reading {} response", operation))
            } else {
                TransportError::network(format!(
                    "Failed to read response body: {}",
                    e.without_url()
                ))
            }
        })?;

        Ok(HttpResponse { status, body })
    }
}
