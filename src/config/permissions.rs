/// ファイルパーミッション管理モジュール
///
/// API secret を含む config.toml を所有者のみがアクセス可能にします。
///
/// Unix系 (Linux, macOS): 0600 (rw-------)
/// その他: プラットフォームの既定（ユーザープロファイル配下）に任せる
use crate::config::error::ConfigError;
use std::path::Path;

/// secret を含むファイルを所有者限定にする
///
/// # Errors
/// ファイルが存在しない場合、またはパーミッション設定に失敗した場合に ConfigError を返します。
pub fn restrict_to_owner(file_path: &Path) -> Result<(), ConfigError> {
    if !file_path.exists() {
        return Err(ConfigError::file_system(
            format!("Config file not found: {}", file_path.display()),
            std::io::Error::new(std::io::ErrorKind::NotFound, "File does not exist"),
        ));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(file_path, std::fs::Permissions::from_mode(0o600)).map_err(|e| {
            ConfigError::file_system(
                format!(
                    "Failed to set permissions (0600) for config file: {}",
                    file_path.display()
                ),
                e,
            )
        })
    }

    #[cfg(not(unix))]
    {
        Ok(())
    }
}
