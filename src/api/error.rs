// ==========================================
// 生产管理系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，将Repository错误转换为面向用户的错误消息
// 约束: 约束违反需指明实体与字段；失败不吞掉、不重试
// ==========================================

use crate::domain::types::{field_label, Entity};
use crate::i18n::{t, t_with_args};
use crate::repository::error::{ConstraintKind, RepositoryError};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 连接错误
    // ==========================================
    #[error("数据库未连接")]
    NotConnected,

    #[error("数据库连接失败: {0}")]
    ConnectivityError(String),

    // ==========================================
    // 数据约束错误
    // ==========================================
    /// 存储层约束违反（唯一/检查/非空/外键）
    ///
    /// field 为出错的列名，无法定位时为空串
    #[error("{message}")]
    ConstraintViolation {
        entity: Entity,
        field: String,
        message: String,
    },

    /// 引用的上级记录不存在
    #[error("{}(id={id})不存在", .entity.label())]
    ReferenceNotFound { entity: Entity, id: i64 },

    /// 写入前检查发现的重复记录
    #[error("{message}")]
    DuplicateEntry {
        field: String,
        value: String,
        message: String,
    },

    // ==========================================
    // 请求错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("未知错误: {0}")]
    Unknown(String),
}

impl ApiError {
    /// 错误代码（返回给前端）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotConnected => "NOT_CONNECTED",
            ApiError::ConnectivityError(_) => "CONNECTIVITY_ERROR",
            ApiError::ConstraintViolation { .. } => "CONSTRAINT_VIOLATION",
            ApiError::ReferenceNotFound { .. } => "REFERENCE_NOT_FOUND",
            ApiError::DuplicateEntry { .. } => "DUPLICATE_ENTRY",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Unknown(_) => "UNKNOWN",
        }
    }

    /// 结构化详情（可选）
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::ConstraintViolation { entity, field, .. } => Some(serde_json::json!({
                "entity": entity,
                "field": field,
            })),
            ApiError::ReferenceNotFound { entity, id } => Some(serde_json::json!({
                "entity": entity,
                "id": id,
            })),
            ApiError::DuplicateEntry { field, value, .. } => Some(serde_json::json!({
                "field": field,
                "value": value,
            })),
            _ => None,
        }
    }
}

// ==========================================
// 从 RepositoryError 转换（无实体上下文）
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotConnected => ApiError::NotConnected,
            RepositoryError::ConnectivityError(msg) => ApiError::ConnectivityError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::ConnectivityError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::Unknown(msg),
            RepositoryError::Other(err) => ApiError::Unknown(err.to_string()),
            constraint @ RepositoryError::ConstraintViolation { .. } => {
                ApiError::Unknown(constraint.to_string())
            }
        }
    }
}

/// 带实体上下文的错误转换
///
/// # 参数
/// - entity: 正在写入的实体
/// - submitted: 本次提交的 (列名, 值)，用于在消息中回显出错的值
///
/// # 示例
/// 唯一约束 `production_lines.line_number` → `生产线的生产线编号 "L1" 已存在`
pub fn classify_repository_error<S: AsRef<str>>(
    err: RepositoryError,
    entity: Entity,
    submitted: &[(&str, S)],
) -> ApiError {
    let (kind, constraint, raw) = match err {
        RepositoryError::ConstraintViolation {
            kind,
            constraint,
            message,
        } => (kind, constraint, message),
        other => return ApiError::from(other),
    };

    let entity_label = entity.label();
    let value_of = |column: &str| {
        submitted
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, v)| v.as_ref().to_string())
    };

    match kind {
        ConstraintKind::Unique | ConstraintKind::PrimaryKey => {
            let columns = constraint
                .as_deref()
                .map(constraint_columns)
                .unwrap_or_default();
            match columns.as_slice() {
                [column] => {
                    let value = value_of(column.as_str()).unwrap_or_default();
                    let field = field_label(column);
                    ApiError::ConstraintViolation {
                        entity,
                        field: column.clone(),
                        message: t_with_args(
                            "error.duplicate_value",
                            &[
                                ("entity", entity_label.as_str()),
                                ("field", field.as_str()),
                                ("value", value.as_str()),
                            ],
                        ),
                    }
                }
                _ => {
                    let fields = columns
                        .iter()
                        .map(|c| field_label(c))
                        .collect::<Vec<_>>()
                        .join("、");
                    ApiError::ConstraintViolation {
                        entity,
                        field: columns.join(","),
                        message: t_with_args(
                            "error.duplicate_record",
                            &[("entity", entity_label.as_str()), ("fields", fields.as_str())],
                        ),
                    }
                }
            }
        }
        ConstraintKind::Check => {
            let name = constraint.unwrap_or_default();
            let column = submitted
                .iter()
                .map(|(c, _)| *c)
                .find(|c| name.ends_with(&format!("_{}", c)))
                .map(str::to_string)
                .unwrap_or_else(|| name.clone());
            let value = value_of(column.as_str()).unwrap_or_default();
            let field = field_label(&column);
            ApiError::ConstraintViolation {
                entity,
                field: column,
                message: t_with_args(
                    "error.check_failed",
                    &[
                        ("entity", entity_label.as_str()),
                        ("field", field.as_str()),
                        ("value", value.as_str()),
                    ],
                ),
            }
        }
        ConstraintKind::NotNull => {
            let column = constraint
                .as_deref()
                .map(constraint_columns)
                .and_then(|cols| cols.into_iter().next())
                .unwrap_or_default();
            let field = field_label(&column);
            ApiError::ConstraintViolation {
                entity,
                field: column,
                message: t_with_args(
                    "error.not_null",
                    &[("entity", entity_label.as_str()), ("field", field.as_str())],
                ),
            }
        }
        ConstraintKind::ForeignKey => ApiError::ConstraintViolation {
            entity,
            field: String::new(),
            message: t_with_args("error.foreign_key", &[("entity", entity_label.as_str())]),
        },
        ConstraintKind::Other => ApiError::ConstraintViolation {
            entity,
            field: constraint.unwrap_or_default(),
            message: format!("{}: {}", t("error.constraint_other"), raw),
        },
    }
}

/// "t.a, t.b" -> ["a", "b"]
fn constraint_columns(detail: &str) -> Vec<String> {
    detail
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.rsplit_once('.')
                .map(|(_, column)| column)
                .unwrap_or(part)
                .to_string()
        })
        .filter(|c| !c.is_empty())
        .collect()
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{set_locale, LOCALE_TEST_LOCK};

    fn unique(detail: &str) -> RepositoryError {
        RepositoryError::ConstraintViolation {
            kind: ConstraintKind::Unique,
            constraint: Some(detail.to_string()),
            message: format!("UNIQUE constraint failed: {}", detail),
        }
    }

    #[test]
    fn test_constraint_columns() {
        assert_eq!(constraint_columns("production_lines.line_number"), vec!["line_number"]);
        assert_eq!(
            constraint_columns("t.production_line_id, t.code_type, t.code_value"),
            vec!["production_line_id", "code_type", "code_value"]
        );
    }

    #[test]
    fn test_unique_violation_names_entity_and_field() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");

        let err = classify_repository_error(
            unique("production_lines.line_number"),
            Entity::ProductionLine,
            &[("line_number", "L1")],
        );
        match err {
            ApiError::ConstraintViolation {
                entity,
                field,
                message,
            } => {
                assert_eq!(entity, Entity::ProductionLine);
                assert_eq!(field, "line_number");
                assert!(message.contains("生产线编号"));
                assert!(message.contains("\"L1\""));
            }
            other => panic!("Expected ConstraintViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_check_violation_resolves_column_from_constraint_name() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");

        let err = classify_repository_error(
            RepositoryError::ConstraintViolation {
                kind: ConstraintKind::Check,
                constraint: Some("ck_production_lines_shift".to_string()),
                message: "CHECK constraint failed: ck_production_lines_shift".to_string(),
            },
            Entity::ProductionLine,
            &[("line_number", "L1"), ("shift", "-1")],
        );
        match err {
            ApiError::ConstraintViolation { field, message, .. } => {
                assert_eq!(field, "shift");
                assert!(message.contains("-1"));
            }
            other => panic!("Expected ConstraintViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_non_constraint_errors_pass_through() {
        let err = classify_repository_error::<&str>(
            RepositoryError::NotConnected,
            Entity::PlannedColor,
            &[],
        );
        assert!(matches!(err, ApiError::NotConnected));

        let err: ApiError = RepositoryError::LockError("poisoned".to_string()).into();
        assert!(matches!(err, ApiError::ConnectivityError(ref m) if m.contains("poisoned")));

        let err: ApiError = RepositoryError::DatabaseQueryError("near \"SELEC\"".to_string()).into();
        assert_eq!(err.code(), "UNKNOWN");
        assert!(err.to_string().contains("SELEC"));
    }

    #[test]
    fn test_details() {
        let err = ApiError::DuplicateEntry {
            field: "WhiteBodyCode".to_string(),
            value: "AB12".to_string(),
            message: "dup".to_string(),
        };
        assert_eq!(err.code(), "DUPLICATE_ENTRY");
        assert_eq!(
            err.details(),
            Some(serde_json::json!({"field": "WhiteBodyCode", "value": "AB12"}))
        );

        let err = ApiError::ReferenceNotFound {
            entity: Entity::ProductionLine,
            id: 42,
        };
        assert_eq!(
            err.details(),
            Some(serde_json::json!({"entity": "production_line", "id": 42}))
        );
    }
}
