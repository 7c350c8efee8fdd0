// ==========================================
// 生产管理系统 - 生产线领域模型
// ==========================================
// 对应表: production_lines
// 规则: 生产线编号、名称统一大写存储；编号全局唯一
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::LineType;

// ==========================================
// ProductionLine - 生产线
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionLine {
    pub id: i64,
    pub line_number: String,         // 生产线编号（唯一，大写）
    pub line_name: String,           // 生产线名称（大写）
    pub line_type: LineType,         // 生产线类型
    pub shift: i64,                  // 班次
    pub speed: f64,                  // 线速
    pub efficiency: f64,             // 效率（%）
    pub group: Option<i64>,          // 组别
    pub flow_code: Option<String>,   // 流向代码
    pub abbreviation: Option<String>, // 简称
    pub operator_id: Option<String>, // 最后操作人
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

// ==========================================
// ProductionLineDraft - 新增/更新生产线的输入
// ==========================================
/// 前端提交的生产线数据（不含 id 与时间戳）
///
/// 未知字段直接拒绝，避免前端拼写错误被静默忽略
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductionLineDraft {
    pub line_number: String,
    pub line_name: String,
    pub line_type: LineType,
    pub shift: i64,
    pub speed: f64,
    pub efficiency: f64,
    #[serde(default)]
    pub group: Option<i64>,
    #[serde(default)]
    pub flow_code: Option<String>,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

impl ProductionLineDraft {
    /// 编号与名称转为大写
    pub fn normalize(&mut self) {
        self.line_number = self.line_number.to_uppercase();
        self.line_name = self.line_name.to_uppercase();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProductionLineDraft {
        ProductionLineDraft {
            line_number: "l01".to_string(),
            line_name: "body line a".to_string(),
            line_type: LineType::Body,
            shift: 2,
            speed: 60.0,
            efficiency: 95.5,
            group: None,
            flow_code: Some("fc1".to_string()),
            abbreviation: None,
        }
    }

    #[test]
    fn test_normalize_uppercases_number_and_name_only() {
        let mut d = draft();
        d.normalize();
        assert_eq!(d.line_number, "L01");
        assert_eq!(d.line_name, "BODY LINE A");
        assert_eq!(d.flow_code.as_deref(), Some("fc1"));
    }

    #[test]
    fn test_draft_rejects_unknown_fields() {
        let json = serde_json::json!({
            "line_number": "L01",
            "line_name": "A",
            "line_type": "车身",
            "shift": 1,
            "speed": 1.0,
            "efficiency": 90.0,
            "colour": "red"
        });
        assert!(serde_json::from_value::<ProductionLineDraft>(json).is_err());
    }

    #[test]
    fn test_draft_optional_fields_default_to_none() {
        let json = serde_json::json!({
            "line_number": "L01",
            "line_name": "A",
            "line_type": "总装",
            "shift": 1,
            "speed": 1.0,
            "efficiency": 90.0
        });
        let d: ProductionLineDraft = serde_json::from_value(json).unwrap();
        assert_eq!(d.group, None);
        assert_eq!(d.line_type, LineType::FinalAssembly);
    }
}
