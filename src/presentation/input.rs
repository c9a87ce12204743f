/// プレゼンテーション層: ユーザー入力処理
///
/// stdin から認証情報を取得し、アプリケーション層で使用可能な形式に変換します。
use crate::commands::login::LoginCredentials;
use anyhow::{Context, Result, bail};
use std::io::{self, BufRead, Write};

/// 対話的に認証情報を取得
pub fn read_credentials_interactive() -> Result<LoginCredentials> {
    eprintln!("Logging in to the management API...");
    eprintln!();
    eprintln!("Please enter your API key and secret.");
    eprintln!("You can find them in your dashboard under Account > API Keys.");
    eprintln!();

    eprint!("API Key: ");
    io::stderr().flush()?;
    let key = read_line(&mut io::stdin().lock(), "API key")?;

    eprint!("API Secret: ");
    io::stderr().flush()?;
    let secret = read_line(&mut io::stdin().lock(), "API secret")?;

    Ok(LoginCredentials { key, secret })
}

/// stdin からパイプで認証情報を取得（2行形式）
///
/// 形式:
///   1行目: API key
///   2行目: API secret
pub fn read_credentials_from_stdin() -> Result<LoginCredentials> {
    read_credentials_from(&mut io::stdin().lock())
}

fn read_credentials_from(reader: &mut impl BufRead) -> Result<LoginCredentials> {
    let key = read_line(reader, "API key (line 1)")?;
    let secret = read_line(reader, "API secret (line 2)")?;
    Ok(LoginCredentials { key, secret })
}

fn read_line(reader: &mut impl BufRead, what: &str) -> Result<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .with_context(|| format!("Failed to read {} from input", what))?;
    let value = line.trim().to_string();

    if value.is_empty() {
        bail!("{} cannot be empty.", what);
    }

    Ok(value)
}
