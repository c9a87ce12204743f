//! リクエストパラメータの正規化とエンコーディング
//!
//! 署名ベース文字列とクエリ文字列は同じ正規化ルールで生成される。
//! 両者がずれると署名検証がサーバー側で黙って失敗するため、
//! シリアライズ処理はすべてこのモジュールに集約する。
use crate::api::error::ManagementError;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// リクエストパラメータ
///
/// キーのバイト順（辞書順）が正規順序。BTreeMap なので挿入順は関係しない。
pub type Params = BTreeMap<String, ParamValue>;

/// パラメータ値（スカラーまたは入れ子のリスト／マップ）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Scalar(String),
    List(Vec<ParamValue>),
    Map(BTreeMap<String, ParamValue>),
}

impl ParamValue {
    /// 空文字列、空リスト、空マップのいずれか
    ///
    /// 空のリスト／マップは展開しても1組も生成しない。
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Scalar(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Map(entries) => entries.is_empty(),
        }
    }

    /// JSON値からパラメータ値へ変換
    ///
    /// `null` は署名できないため、空文字列に落とさず明示的にエラーにする。
    ///
    /// # Arguments
    /// * `key` - エラーメッセージ用のパラメータ名
    /// * `value` - 変換元のJSON値
    pub fn from_json(key: &str, value: &Value) -> Result<Self, ManagementError> {
        match value {
            Value::Null => Err(ManagementError::invalid_parameter(
                key,
                "null values cannot be encoded into a signed request",
            )),
            Value::Bool(b) => Ok(Self::from(*b)),
            Value::Number(n) => Ok(Self::Scalar(n.to_string())),
            Value::String(s) => Ok(Self::Scalar(s.clone())),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| Self::from_json(&format!("{}[{}]", key, i), item))
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| {
                    Self::from_json(&format!("{}[{}]", key, k), v).map(|pv| (k.clone(), pv))
                })
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(Self::Map),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Scalar(value.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Scalar(if value { "true" } else { "false" }.to_string())
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(value: $t) -> Self {
                    Self::Scalar(value.to_string())
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u32, u64, usize);

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// JSONオブジェクトからパラメータマップを生成
///
/// # Errors
/// オブジェクト以外、または `null` を含む場合に ManagementError::InvalidParameter を返す。
pub fn params_from_json(value: &Value) -> Result<Params, ManagementError> {
    let Value::Object(map) = value else {
        return Err(ManagementError::invalid_parameter(
            "<root>",
            "request parameters must be a JSON object",
        ));
    };

    map.iter()
        .map(|(k, v)| ParamValue::from_json(k, v).map(|pv| (k.clone(), pv)))
        .collect()
}

/// RFC 3986 準拠のパーセントエンコード
///
/// 非予約文字（英数字と `-` `_` `.` `~`）以外はすべて `%XX` になる。
/// スペースは `+` ではなく `%20`。
pub fn encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// 値を構造を保ったまま要素ごとにエンコード
pub fn encode_value(value: &ParamValue) -> ParamValue {
    match value {
        ParamValue::Scalar(s) => ParamValue::Scalar(encode(s)),
        ParamValue::List(items) => ParamValue::List(items.iter().map(encode_value).collect()),
        ParamValue::Map(map) => ParamValue::Map(
            map.iter()
                .map(|(k, v)| (encode(k), encode_value(v)))
                .collect(),
        ),
    }
}

/// 入れ子の値を `(名前, スカラー値)` の組に展開する
///
/// リストは `key[0]`, `key[1]`、マップは `key[sub]` の形式。
/// 戻り値はエンコード前の生の文字列。
pub fn flatten(key: &str, value: &ParamValue) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    flatten_into(key, value, &mut pairs);
    pairs
}

fn flatten_into(key: &str, value: &ParamValue, out: &mut Vec<(String, String)>) {
    match value {
        ParamValue::Scalar(s) => out.push((key.to_string(), s.clone())),
        ParamValue::List(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten_into(&format!("{}[{}]", key, i), item, out);
            }
        }
        ParamValue::Map(map) => {
            for (sub, item) in map {
                flatten_into(&format!("{}[{}]", key, sub), item, out);
            }
        }
    }
}

/// 正規化されたクエリ文字列を生成
///
/// トップレベルのキー順に `key=value` を `&` で連結する。
/// 署名ベース文字列とURLのクエリ部の両方がこの出力を使う。
pub fn canonical_query(params: &Params) -> String {
    params
        .iter()
        .flat_map(|(key, value)| flatten(key, value))
        .map(|(k, v)| format!("{}={}", encode(&k), encode(&v)))
        .collect::<Vec<_>>()
        .join("&")
}
