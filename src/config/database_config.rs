// ==========================================
// 生产管理系统 - 数据库配置
// ==========================================
// 来源: config/database.json（启动时读取一次）
// 数据库文件路径解析顺序:
// 1. 环境变量 LINE_REFDATA_DB_PATH
// 2. 配置文件中的 path
// 3. 用户数据目录/line-refdata/<database>.db
// 4. ./data/<database>.db
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 配置文件路径覆写
pub const CONFIG_PATH_ENV: &str = "LINE_REFDATA_CONFIG";
/// 数据库文件路径覆写
pub const DB_PATH_ENV: &str = "LINE_REFDATA_DB_PATH";

pub const DEFAULT_CONFIG_PATH: &str = "config/database.json";
pub const DEFAULT_DATABASE: &str = "production_management";

const DATA_DIR_NAME: &str = "line-refdata";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件格式错误: {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("配置项无效: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// 数据库名（同时作为默认文件名）
    #[serde(default = "default_database")]
    pub database: String,

    /// 显式指定的数据库文件
    #[serde(default)]
    pub path: Option<String>,
}

fn default_database() -> String {
    DEFAULT_DATABASE.to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            path: None,
        }
    }
}

impl DatabaseConfig {
    /// 从文件加载
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let config: DatabaseConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: display,
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// 加载配置；文件不存在时使用默认值，格式错误仍然报错
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .ok()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        match Self::load(&path) {
            Ok(config) => {
                tracing::info!("已加载数据库配置: {}", path);
                Ok(config)
            }
            Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("配置文件不存在，使用默认配置: {}", path);
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let name = self.database.trim();
        if name.is_empty() {
            return Err(ConfigError::Invalid("database 不能为空".to_string()));
        }
        if name.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(format!("database 不能包含路径分隔符: {}", name)));
        }
        Ok(())
    }

    /// 解析数据库文件路径（必要时创建所在目录）
    pub fn resolve_db_path(&self) -> String {
        if let Ok(path) = std::env::var(DB_PATH_ENV) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }

        if let Some(path) = self.path.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            return path.to_string();
        }

        let file_name = format!("{}.db", self.database.trim());
        let dir = dirs::data_dir()
            .map(|d| d.join(DATA_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("./data"));

        // best-effort: 目录创建失败时由打开数据库时报告连接错误
        if let Err(e) = std::fs::create_dir_all(&dir) {
            tracing::warn!("创建数据目录失败: {}: {}", dir.display(), e);
        }
        dir.join(file_name).to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = DatabaseConfig::default();
        assert_eq!(config.database, "production_management");
        assert!(config.path.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"database": "line_test", "path": "/tmp/x.db"}}"#).unwrap();

        let config = DatabaseConfig::load(file.path()).unwrap();
        assert_eq!(config.database, "line_test");
        assert_eq!(config.path.as_deref(), Some("/tmp/x.db"));
    }

    #[test]
    fn test_load_rejects_bad_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"database": "a/b"}}"#).unwrap();
        assert!(matches!(
            DatabaseConfig::load(file.path()),
            Err(ConfigError::Invalid(_))
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"database": "x", "host": "localhost"}}"#).unwrap();
        assert!(matches!(
            DatabaseConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = DatabaseConfig::load("/nonexistent/database.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_explicit_path_wins_over_data_dir() {
        if std::env::var(DB_PATH_ENV).is_ok() {
            return;
        }
        let config = DatabaseConfig {
            database: "x".to_string(),
            path: Some("/tmp/explicit.db".to_string()),
        };
        assert_eq!(config.resolve_db_path(), "/tmp/explicit.db");
    }
}
