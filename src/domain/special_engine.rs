// ==========================================
// 生产管理系统 - 特殊发动机领域模型
// ==========================================
// 对应表: special_engines
// 规则: 发动机代码全局唯一，按原样存储（不转大写）
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialEngine {
    pub id: i64,
    pub engine_code: String,
    pub gear: String,
    pub engine_name: String,
    pub operator_id: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecialEngineDraft {
    pub engine_code: String,
    pub gear: String,
    pub engine_name: String,
}
