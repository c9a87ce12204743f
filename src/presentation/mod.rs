/// プレゼンテーション層モジュール
///
/// コマンド結果とユーザー入出力の橋渡しを行います。
///
/// # モジュール
/// - `input`: ユーザー入力処理
/// - `output`: コマンド結果の出力（人間向け・機械向け）

pub mod input;
pub mod output;
