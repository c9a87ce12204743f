/// 認証情報とリクエスト署名
///
/// API key と shared secret を保持し、パラメータから署名を生成します。
/// 署名は「ソート済み・エンコード済みの key=value を & で連結した文字列」に
/// secret をそのまま連結し、SHA-1 の16進ダイジェストを取ったものです。
use crate::api::encoding::{Params, canonical_query};
use crate::api::error::ManagementError;
use sha1::{Digest, Sha1};
use std::fmt;

/// 署名パラメータ名
pub const SIGNATURE_PARAM: &str = "api_signature";

/// API認証情報
///
/// secret はログやデバッグ出力に含めない。
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key: String,
    secret: String,
}

impl Credentials {
    /// 新しい認証情報を作成
    ///
    /// # Arguments
    /// * `key` - API key
    /// * `secret` - API shared secret
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// API keyを取得
    pub fn key(&self) -> &str {
        &self.key
    }

    /// API keyをマスキングして表示
    pub fn masked_key(&self) -> String {
        let chars: Vec<char> = self.key.chars().collect();
        if chars.len() <= 8 {
            "*".repeat(chars.len())
        } else {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{}***{}", head, tail)
        }
    }

    /// パラメータに対する署名を計算
    ///
    /// # Errors
    /// パラメータに `api_signature` が既に含まれている場合は
    /// ManagementError::InvalidParameter を返す。署名は自分自身を含められない。
    pub fn sign(&self, params: &Params) -> Result<String, ManagementError> {
        let base = signature_base_string(params)?;

        let mut hasher = Sha1::new();
        hasher.update(base.as_bytes());
        hasher.update(self.secret.as_bytes());

        Ok(hex::encode(hasher.finalize()))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.masked_key())
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// 署名ベース文字列を生成
pub fn signature_base_string(params: &Params) -> Result<String, ManagementError> {
    if params.contains_key(SIGNATURE_PARAM) {
        return Err(ManagementError::invalid_parameter(
            SIGNATURE_PARAM,
            "the signature cannot be part of the string it signs",
        ));
    }

    Ok(canonical_query(params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::encoding::ParamValue;

    fn system_params() -> Params {
        let mut params = Params::new();
        params.insert("api_nonce".to_string(), ParamValue::from("00000042"));
        params.insert("api_timestamp".to_string(), ParamValue::from(1_700_000_000i64));
        params.insert("api_key".to_string(), ParamValue::from("key123"));
        params.insert("api_format".to_string(), ParamValue::from("json"));
        params
    }

    #[test]
    fn test_signature_base_string() {
        let mut params = system_params();
        params.insert("title".to_string(), ParamValue::from("Hello World~"));

        let base = signature_base_string(&params).unwrap();
        assert_eq!(
            base,
            "api_format=json&api_key=key123&api_nonce=00000042&api_timestamp=1700000000&title=Hello%20World~"
        );
    }

    #[test]
    fn test_known_signature() {
        let credentials = Credentials::new("key123", "s3cret");
        let mut params = system_params();
        params.insert("title".to_string(), ParamValue::from("Hello World~"));

        let signature = credentials.sign(&params).unwrap();
        assert_eq!(signature, "84df9c3b041265814592d983aefb160c064d4e3d");
    }

    #[test]
    fn test_known_signature_with_reserved_characters() {
        let credentials = Credentials::new("key123", "s3cret");
        let mut params = system_params();
        params.insert("title".to_string(), ParamValue::from("Café & Bar"));
        params.insert("tags".to_string(), ParamValue::from("a,b"));

        assert_eq!(
            credentials.sign(&params).unwrap(),
            "969c3ef332ab36a8eb7ae01bf4a6dd370098caef"
        );
    }

    #[test]
    fn test_signature_is_lowercase_hex() {
        let credentials = Credentials::new("k", "s");
        let signature = credentials.sign(&system_params()).unwrap();

        assert_eq!(signature.len(), 40);
        assert!(signature.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_signature_is_deterministic_and_order_independent() {
        let credentials = Credentials::new("key123", "s3cret");

        let mut forward = Params::new();
        for (k, v) in [("b", "2"), ("a", "1"), ("c", "3")] {
            forward.insert(k.to_string(), ParamValue::from(v));
        }
        let mut reverse = Params::new();
        for (k, v) in [("c", "3"), ("a", "1"), ("b", "2")] {
            reverse.insert(k.to_string(), ParamValue::from(v));
        }

        let first = credentials.sign(&forward).unwrap();
        assert_eq!(first, credentials.sign(&forward).unwrap());
        assert_eq!(first, credentials.sign(&reverse).unwrap());
    }

    #[test]
    fn test_signature_depends_on_secret() {
        let params = system_params();
        let a = Credentials::new("key123", "secret-a").sign(&params).unwrap();
        let b = Credentials::new("key123", "secret-b").sign(&params).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_signature_param_cannot_be_signed() {
        let credentials = Credentials::new("key123", "s3cret");
        let mut params = system_params();
        params.insert(SIGNATURE_PARAM.to_string(), ParamValue::from("deadbeef"));

        let result = credentials.sign(&params);
        assert!(matches!(
            result,
            Err(ManagementError::InvalidParameter { ref key, .. }) if key == SIGNATURE_PARAM
        ));
    }

    #[test]
    fn test_key_masking() {
        let credentials = Credentials::new("abcdef123456789", "secret");

        let masked = credentials.masked_key();
        assert!(masked.starts_with("abcd"));
        assert!(masked.contains("***"));
        assert!(masked.ends_with("6789"));
        assert!(!masked.contains("ef12345"));
    }

    #[test]
    fn test_short_key_masking() {
        let credentials = Credentials::new("short", "secret");
        assert_eq!(credentials.masked_key(), "*****");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let credentials = Credentials::new("abcdef123456789", "super-secret-value");
        let debug = format!("{:?}", credentials);

        assert!(!debug.contains("super-secret-value"));
        assert!(!debug.contains("abcdef123456789"));
        assert!(debug.contains("<redacted>"));
    }
}
