// ==========================================
// 生产管理系统 - API 公共请求/响应结构
// ==========================================

use serde::{Deserialize, Serialize};

use crate::api::error::ApiResult;
use crate::api::validator::{require_positive_id, Validate};

/// 按 id 操作的请求（删除）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdRequest {
    pub id: i64,
}

impl Validate for IdRequest {
    fn validate(&self) -> ApiResult<()> {
        require_positive_id("id", self.id)
    }
}

/// 新增成功: { "success": true, "id": <id> }
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: i64,
}

impl CreatedResponse {
    pub fn new(id: i64) -> Self {
        Self { success: true, id }
    }
}

/// 更新/删除成功: { "success": true }
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
