// ==========================================
// 生产管理系统 - 请求参数校验
// ==========================================
// 职责: 请求载荷的结构解析与字段校验
// 约束: 校验在大小写规范化之前执行；失败一律返回 InvalidInput
// ==========================================

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::types::field_label;

/// 请求载荷字段校验
pub trait Validate {
    fn validate(&self) -> ApiResult<()>;
}

/// 将 JSON 载荷解析为请求结构（缺字段、多字段、类型不符均拒绝）
pub fn parse_payload<T: DeserializeOwned>(payload: Value) -> ApiResult<T> {
    serde_json::from_value(payload).map_err(|e| ApiError::InvalidInput(format!("请求参数格式错误: {}", e)))
}

/// 解析并校验
pub fn parse_validated<T: DeserializeOwned + Validate>(payload: Value) -> ApiResult<T> {
    let request: T = parse_payload(payload)?;
    request.validate()?;
    Ok(request)
}

/// 必填文本不能为空白
pub fn require_text(column: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidInput(format!("{}不能为空", field_label(column))));
    }
    Ok(())
}

pub fn require_non_negative_int(column: &str, value: i64) -> ApiResult<()> {
    if value < 0 {
        return Err(ApiError::InvalidInput(format!(
            "{}不能为负数: {}",
            field_label(column),
            value
        )));
    }
    Ok(())
}

pub fn require_non_negative(column: &str, value: f64) -> ApiResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ApiError::InvalidInput(format!(
            "{}必须为非负数: {}",
            field_label(column),
            value
        )));
    }
    Ok(())
}

/// 百分比取值 0~100
pub fn require_percentage(column: &str, value: f64) -> ApiResult<()> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(ApiError::InvalidInput(format!(
            "{}必须在0~100之间: {}",
            field_label(column),
            value
        )));
    }
    Ok(())
}

pub fn require_positive_id(column: &str, id: i64) -> ApiResult<()> {
    if id <= 0 {
        return Err(ApiError::InvalidInput(format!(
            "{}必须为正整数: {}",
            field_label(column),
            id
        )));
    }
    Ok(())
}
