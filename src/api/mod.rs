// ==========================================
// 生产管理系统 - API 层
// ==========================================
// 职责: 提供基础数据 API 接口,供分发器与 Tauri 命令调用
// ==========================================

pub mod common;
pub mod error;
pub mod planned_color_api;
pub mod production_line_api;
pub mod special_engine_api;
pub mod special_info_api;
pub mod validator;

// 重导出核心类型
pub use common::{CreatedResponse, IdRequest, SuccessResponse};
pub use error::{classify_repository_error, ApiError, ApiResult};
pub use planned_color_api::{PlannedColorApi, UpdatePlannedColorRequest};
pub use production_line_api::{ProductionLineApi, UpdateProductionLineRequest};
pub use special_engine_api::{SpecialEngineApi, UpdateSpecialEngineRequest};
pub use special_info_api::SpecialInfoApi;
pub use validator::{parse_payload, parse_validated, Validate};
