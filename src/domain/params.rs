/// ドメインサービス: パラメータ引数の解析
///
/// `key=value` 形式のコマンド引数をリクエストパラメータに変換する。
/// 値の中の `=` はそのまま残す（最初の `=` だけで分割）。
use crate::api::encoding::{ParamValue, Params};
use crate::domain::error::DomainError;

/// `key=value` 引数の列をパラメータに変換する
///
/// # Errors
/// `=` を含まない、キーが空、または同じキーが重複している場合に DomainError を返す。
pub fn parse_params<S: AsRef<str>>(args: &[S]) -> Result<Params, DomainError> {
    let mut params = Params::new();

    for arg in args {
        let arg = arg.as_ref();
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| DomainError::malformed_parameter(arg))?;

        if key.is_empty() {
            return Err(DomainError::malformed_parameter(arg));
        }
        if params
            .insert(key.to_string(), ParamValue::from(value))
            .is_some()
        {
            return Err(DomainError::DuplicateParameter {
                key: key.to_string(),
            });
        }
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params() {
        let params = parse_params(&["title=My Video", "result_limit=10", "empty="]).unwrap();

        assert_eq!(params.len(), 3);
        assert_eq!(params["title"], ParamValue::from("My Video"));
        assert_eq!(params["result_limit"], ParamValue::from("10"));
        assert_eq!(params["empty"], ParamValue::from(""));
    }

    #[test]
    fn test_value_may_contain_equals() {
        let params = parse_params(&["search=a=b"]).unwrap();
        assert_eq!(params["search"], ParamValue::from("a=b"));
    }

    #[test]
    fn test_malformed_arguments() {
        assert_eq!(
            parse_params(&["novalue"]),
            Err(DomainError::malformed_parameter("novalue"))
        );
        assert!(parse_params(&["=value"]).is_err());
    }

    #[test]
    fn test_duplicate_key() {
        assert_eq!(
            parse_params(&["a=1", "a=2"]),
            Err(DomainError::DuplicateParameter {
                key: "a".to_string()
            })
        );
    }

    #[test]
    fn test_empty_args() {
        let empty: [&str; 0] = [];
        assert!(parse_params(&empty).unwrap().is_empty());
    }
}
