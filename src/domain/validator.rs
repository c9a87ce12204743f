/// ドメインサービス: 引数バリデーション
///
/// API呼び出しの前にコマンド引数を検証する。
/// 署名やURL組み立ての段階で壊れた値が紛れ込まないようにする。
use crate::domain::error::DomainError;

/// APIパスを検証する
///
/// 先頭のスラッシュはあってもなくてもよい。クエリやフラグメントは
/// クライアントが組み立てるため含めてはいけない。
pub fn validate_api_path(path: &str) -> Result<(), DomainError> {
    let trimmed = path.trim_start_matches('/');

    if trimmed.is_empty() {
        return Err(DomainError::invalid_path(path, "path is empty"));
    }
    if trimmed.contains(['?', '#']) {
        return Err(DomainError::invalid_path(
            path,
            "query and fragment are built by the client; pass parameters as key=value",
        ));
    }
    if trimmed.contains(char::is_whitespace) {
        return Err(DomainError::invalid_path(path, "path contains whitespace"));
    }

    Ok(())
}

/// 動画キーを検証する
pub fn validate_video_key(key: &str) -> Result<(), DomainError> {
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(DomainError::InvalidVideoKey {
            key: key.to_string(),
        });
    }
    Ok(())
}

/// 動画のソースURLを検証する
pub fn validate_source_url(url: &str) -> Result<(), DomainError> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));

    match rest {
        Some(host_and_path) if !host_and_path.is_empty() => Ok(()),
        _ => Err(DomainError::InvalidSourceUrl {
            url: url.to_string(),
        }),
    }
}
