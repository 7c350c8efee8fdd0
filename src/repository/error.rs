// ==========================================
// 生产管理系统 - 仓储层错误类型
// ==========================================
// 约束错误按 SQLite 扩展错误码分类，不依赖错误文本匹配
// 工具: thiserror 派生宏
// ==========================================

use rusqlite::ffi;
use rusqlite::ErrorCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// 约束种类（来自扩展错误码）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConstraintKind {
    Unique,
    PrimaryKey,
    ForeignKey,
    Check,
    NotNull,
    Other,
}

impl ConstraintKind {
    pub fn from_extended_code(extended_code: i32) -> Self {
        match extended_code {
            ffi::SQLITE_CONSTRAINT_UNIQUE => ConstraintKind::Unique,
            ffi::SQLITE_CONSTRAINT_PRIMARYKEY => ConstraintKind::PrimaryKey,
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => ConstraintKind::ForeignKey,
            ffi::SQLITE_CONSTRAINT_CHECK => ConstraintKind::Check,
            ffi::SQLITE_CONSTRAINT_NOTNULL => ConstraintKind::NotNull,
            _ => ConstraintKind::Other,
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConstraintKind::Unique => "UNIQUE",
            ConstraintKind::PrimaryKey => "PRIMARY KEY",
            ConstraintKind::ForeignKey => "FOREIGN KEY",
            ConstraintKind::Check => "CHECK",
            ConstraintKind::NotNull => "NOT NULL",
            ConstraintKind::Other => "OTHER",
        };
        write!(f, "{}", s)
    }
}

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 连接生命周期 =====
    #[error("数据库未连接")]
    NotConnected,

    #[error("数据库连接失败: {0}")]
    ConnectivityError(String),

    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    // ===== 约束错误 =====
    /// constraint: 引擎报告的约束明细（UNIQUE/NOT NULL 为 表.列 列表，CHECK 为约束名）
    #[error("{kind} 约束违反: {message}")]
    ConstraintViolation {
        kind: ConstraintKind,
        constraint: Option<String>,
        message: String,
    },

    // ===== 数据库错误 =====
    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("数据库查询失败: {0}")]
    DatabaseQueryError(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RepositoryError {
    pub fn constraint_kind(&self) -> Option<ConstraintKind> {
        match self {
            RepositoryError::ConstraintViolation { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// 从引擎消息中截取约束明细，如 "UNIQUE constraint failed: t.c" -> "t.c"
fn constraint_detail(message: &str) -> Option<String> {
    message
        .split_once("failed:")
        .map(|(_, detail)| detail.trim().to_string())
        .filter(|detail| !detail.is_empty())
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ffi_err, msg) => {
                let message = msg.unwrap_or_else(|| ffi_err.to_string());
                match ffi_err.code {
                    ErrorCode::ConstraintViolation => RepositoryError::ConstraintViolation {
                        kind: ConstraintKind::from_extended_code(ffi_err.extended_code),
                        constraint: constraint_detail(&message),
                        message,
                    },
                    ErrorCode::CannotOpen
                    | ErrorCode::NotADatabase
                    | ErrorCode::SystemIoFailure
                    | ErrorCode::DatabaseBusy
                    | ErrorCode::DatabaseLocked
                    | ErrorCode::PermissionDenied
                    | ErrorCode::DatabaseCorrupt => RepositoryError::ConnectivityError(message),
                    _ => RepositoryError::DatabaseQueryError(message),
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
