// ==========================================
// 生产管理系统 - 请求分发
// ==========================================
// 职责: 按通道名将前端请求分发到对应 API
// 返回:
// - 查询: 记录列表（JSON 数组）
// - 新增: { "success": true, "id": <id> }
// - 修改/删除: { "success": true }
// - 失败: ErrorResponse { code, message, details }
// ==========================================

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::api::{
    parse_payload, parse_validated, ApiError, ApiResult, CreatedResponse, IdRequest,
    PlannedColorApi, ProductionLineApi, SpecialEngineApi, SpecialInfoApi, SuccessResponse,
};
use crate::app::state::AppState;
use crate::operator::{resolve_operator, OperatorResolver};
use crate::perf::PerfGuard;

// ==========================================
// ErrorResponse - 错误响应
// ==========================================

/// 错误响应（返回给前端）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,

    /// 错误消息
    pub message: String,

    /// 详细信息（可选）
    pub details: Option<Value>,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            details: err.details(),
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ErrorResponse {}

// ==========================================
// Channel - 通道名
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    GetCurrentUser,
    GetProductionLines,
    AddProductionLine,
    UpdateProductionLine,
    DeleteProductionLine,
    GetProductionLineSpecialInfo,
    AddProductionLineSpecialInfo,
    DeleteProductionLineSpecialInfo,
    GetSpecialEngines,
    AddSpecialEngine,
    UpdateSpecialEngine,
    DeleteSpecialEngine,
    GetPlannedColors,
    AddPlannedColor,
    UpdatePlannedColor,
    DeletePlannedColor,
}

impl Channel {
    pub const ALL: [Channel; 16] = [
        Channel::GetCurrentUser,
        Channel::GetProductionLines,
        Channel::AddProductionLine,
        Channel::UpdateProductionLine,
        Channel::DeleteProductionLine,
        Channel::GetProductionLineSpecialInfo,
        Channel::AddProductionLineSpecialInfo,
        Channel::DeleteProductionLineSpecialInfo,
        Channel::GetSpecialEngines,
        Channel::AddSpecialEngine,
        Channel::UpdateSpecialEngine,
        Channel::DeleteSpecialEngine,
        Channel::GetPlannedColors,
        Channel::AddPlannedColor,
        Channel::UpdatePlannedColor,
        Channel::DeletePlannedColor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::GetCurrentUser => "get-current-user",
            Channel::GetProductionLines => "get-production-lines",
            Channel::AddProductionLine => "add-production-line",
            Channel::UpdateProductionLine => "update-production-line",
            Channel::DeleteProductionLine => "delete-production-line",
            Channel::GetProductionLineSpecialInfo => "get-production-line-special-info",
            Channel::AddProductionLineSpecialInfo => "add-production-line-special-info",
            Channel::DeleteProductionLineSpecialInfo => "delete-production-line-special-info",
            Channel::GetSpecialEngines => "get-special-engines",
            Channel::AddSpecialEngine => "add-special-engine",
            Channel::UpdateSpecialEngine => "update-special-engine",
            Channel::DeleteSpecialEngine => "delete-special-engine",
            Channel::GetPlannedColors => "get-planned-colors",
            Channel::AddPlannedColor => "add-planned-color",
            Channel::UpdatePlannedColor => "update-planned-color",
            Channel::DeletePlannedColor => "delete-planned-color",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ApiError::InvalidInput(format!("未知通道: {}", s)))
    }
}

// ==========================================
// Dispatcher - 请求分发器
// ==========================================
#[derive(Clone)]
pub struct Dispatcher {
    production_line_api: Arc<ProductionLineApi>,
    special_info_api: Arc<SpecialInfoApi>,
    special_engine_api: Arc<SpecialEngineApi>,
    planned_color_api: Arc<PlannedColorApi>,
    operator: Arc<dyn OperatorResolver>,
}

impl Dispatcher {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            production_line_api: state.production_line_api.clone(),
            special_info_api: state.special_info_api.clone(),
            special_engine_api: state.special_engine_api.clone(),
            planned_color_api: state.planned_color_api.clone(),
            operator: state.operator.clone(),
        }
    }

    /// 分发一次请求
    ///
    /// # 参数
    /// - channel: 通道名（如 "add-production-line"）
    /// - payload: 请求载荷；无参数的查询通道忽略载荷
    pub fn dispatch(&self, channel: &str, payload: Value) -> Result<Value, ErrorResponse> {
        let channel = Channel::from_str(channel).map_err(|e| {
            tracing::warn!("{}", e);
            ErrorResponse::from(&e)
        })?;

        let _perf = PerfGuard::new(channel.as_str());
        self.dispatch_channel(channel, payload).map_err(|e| {
            tracing::error!("{} 失败: {}", channel, e);
            ErrorResponse::from(&e)
        })
    }

    fn dispatch_channel(&self, channel: Channel, payload: Value) -> ApiResult<Value> {
        match channel {
            Channel::GetCurrentUser => Ok(Value::String(resolve_operator(self.operator.as_ref()))),

            // ===== 生产线 =====
            Channel::GetProductionLines => to_json(self.production_line_api.list_lines()?),
            Channel::AddProductionLine => {
                let id = self.production_line_api.create_line(parse_payload(payload)?)?;
                to_json(CreatedResponse::new(id))
            }
            Channel::UpdateProductionLine => {
                self.production_line_api.update_line(parse_payload(payload)?)?;
                to_json(SuccessResponse::ok())
            }
            Channel::DeleteProductionLine => {
                let req: IdRequest = parse_validated(payload)?;
                self.production_line_api.delete_line(req.id)?;
                to_json(SuccessResponse::ok())
            }

            // ===== 生产线特殊信息 =====
            Channel::GetProductionLineSpecialInfo => {
                let query = parse_payload(payload)?;
                to_json(self.special_info_api.list_special_info(&query)?)
            }
            Channel::AddProductionLineSpecialInfo => {
                let id = self.special_info_api.create_special_info(parse_payload(payload)?)?;
                to_json(CreatedResponse::new(id))
            }
            Channel::DeleteProductionLineSpecialInfo => {
                let req: IdRequest = parse_validated(payload)?;
                self.special_info_api.delete_special_info(req.id)?;
                to_json(SuccessResponse::ok())
            }

            // ===== 特殊发动机 =====
            Channel::GetSpecialEngines => to_json(self.special_engine_api.list_engines()?),
            Channel::AddSpecialEngine => {
                let id = self.special_engine_api.create_engine(parse_payload(payload)?)?;
                to_json(CreatedResponse::new(id))
            }
            Channel::UpdateSpecialEngine => {
                self.special_engine_api.update_engine(parse_payload(payload)?)?;
                to_json(SuccessResponse::ok())
            }
            Channel::DeleteSpecialEngine => {
                let req: IdRequest = parse_validated(payload)?;
                self.special_engine_api.delete_engine(req.id)?;
                to_json(SuccessResponse::ok())
            }

            // ===== 计划用颜色 =====
            Channel::GetPlannedColors => to_json(self.planned_color_api.list_colors()?),
            Channel::AddPlannedColor => {
                let id = self.planned_color_api.create_color(parse_payload(payload)?)?;
                to_json(CreatedResponse::new(id))
            }
            Channel::UpdatePlannedColor => {
                self.planned_color_api.update_color(parse_payload(payload)?)?;
                to_json(SuccessResponse::ok())
            }
            Channel::DeletePlannedColor => {
                let req: IdRequest = parse_validated(payload)?;
                self.planned_color_api.delete_color(req.id)?;
                to_json(SuccessResponse::ok())
            }
        }
    }
}

fn to_json<T: Serialize>(value: T) -> ApiResult<Value> {
    serde_json::to_value(value).map_err(|e| ApiError::Unknown(format!("结果序列化失败: {}", e)))
}
