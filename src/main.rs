mod cli;
mod commands;
mod presentation;

use jwmgmt::api::ManagementError;
use jwmgmt::api::transport::TransportError;
use jwmgmt::config::{APP_CONFIG, ConfigError};
use jwmgmt::domain::error::DomainError;
use jwmgmt::error_severity::ErrorSeverity;
use presentation::output;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let parsed = cli::split_global_flags(&args);

    let outcome = match cli::dispatch(&parsed.args).await {
        Ok(result) => output::output_result(&result, parsed.machine_output),
        Err(e) => Err(e),
    };

    if let Err(e) = outcome {
        handle_error(e, parsed.machine_output);
    }
}

/// ログ出力を初期化する（stderr）
///
/// RUST_LOG が無ければ埋め込み設定のレベルを使う。
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&APP_CONFIG.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// エラーハンドリングとユーザーへの表示
///
/// anyhow::Error から元のエラー型を downcast して、
/// エラーの種類に応じた exit code とメッセージを決定する。
fn handle_error(error: anyhow::Error, machine_output: bool) {
    let exit_code = determine_exit_code(&error);
    let hint = get_error_hint(&error);

    if machine_output {
        let message = error
            .chain()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(": ");
        if output::output_error_machine(&message, exit_code, hint.as_deref()).is_err() {
            eprintln!("Error: {}", message);
        }
        std::process::exit(exit_code);
    }

    eprintln!("Error: {}", error);

    let chain: Vec<_> = error.chain().skip(1).collect();
    if !chain.is_empty() {
        eprintln!("\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            eprintln!("  {}: {}", i + 1, cause);
        }
    }

    if let Some(hint) = hint {
        eprintln!("\nHint: {}", hint);
    }

    std::process::exit(exit_code);
}

/// エラーチェーンから深刻度を決定
fn determine_severity(error: &anyhow::Error) -> Option<ErrorSeverity> {
    error.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<DomainError>() {
            return Some(e.severity());
        }
        if let Some(e) = cause.downcast_ref::<ManagementError>() {
            return Some(e.severity());
        }
        if cause.downcast_ref::<TransportError>().is_some() {
            return Some(ErrorSeverity::SystemError);
        }
        if let Some(e) = cause.downcast_ref::<ConfigError>() {
            return Some(e.severity());
        }
        None
    })
}

/// エラーチェーンから適切な終了コードを決定
fn determine_exit_code(error: &anyhow::Error) -> i32 {
    // 不明なエラーの場合はデフォルトの終了コード
    determine_severity(error).map_or(1, ErrorSeverity::exit_code)
}

/// エラーに対するユーザー向けヒントを取得
fn get_error_hint(error: &anyhow::Error) -> Option<String> {
    error.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<DomainError>() {
            return e.hint().map(str::to_string);
        }
        if let Some(e) = cause.downcast_ref::<ManagementError>() {
            return e.hint().map(str::to_string);
        }
        if let Some(e) = cause.downcast_ref::<TransportError>() {
            return e.hint().map(str::to_string);
        }
        if let Some(e) = cause.downcast_ref::<ConfigError>() {
            return e.hint().map(str::to_string);
        }
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_code_for_config_error() {
        let error = anyhow::Error::from(ConfigError::credentials_not_found("missing"))
            .context("Failed to resolve API configuration");

        assert_eq!(determine_exit_code(&error), 2);
        assert!(get_error_hint(&error).unwrap().contains("login"));
    }

    #[test]
    fn test_exit_code_for_transport_error() {
        let result: Result<(), ManagementError> =
            Err(ManagementError::from(TransportError::network("connection refused")));
        let error = result.context("List command failed").unwrap_err();

        assert_eq!(determine_exit_code(&error), 3);
    }

    #[test]
    fn test_exit_code_for_domain_error() {
        let error = anyhow::Error::from(DomainError::malformed_parameter("oops"));
        assert_eq!(determine_exit_code(&error), 1);
    }

    #[test]
    fn test_unknown_error_defaults_to_one() {
        let error = anyhow::anyhow!("something else");
        assert_eq!(determine_exit_code(&error), 1);
        assert!(get_error_hint(&error).is_none());
    }
}
