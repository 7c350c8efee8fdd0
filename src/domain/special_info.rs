// ==========================================
// 生产管理系统 - 生产线特殊信息领域模型
// ==========================================
// 对应表: production_line_special_info
// 规则: (生产线, 代码类型, 代码值) 唯一；白车身码大写存储
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CodeType, LineType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialInfo {
    pub id: i64,
    pub production_line_id: i64,
    pub code_type: CodeType,
    pub code_value: String,
    /// 冗余自所属生产线的类型（创建时查询填充）
    pub line_type: LineType,
    pub operator_id: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// 新增特殊信息的输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecialInfoDraft {
    pub production_line_id: i64,
    pub code_type: CodeType,
    pub code_value: String,
}

impl SpecialInfoDraft {
    pub fn normalize(&mut self) {
        self.code_value = self.code_type.normalize_value(&self.code_value);
    }
}

/// 按生产线 + 代码类型查询特殊信息
///
/// 兼容前端的 lineId/codeType 写法
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecialInfoQuery {
    #[serde(rename = "lineId", alias = "line_id", alias = "production_line_id")]
    pub line_id: i64,
    #[serde(rename = "codeType", alias = "code_type")]
    pub code_type: CodeType,
}
