// ==========================================
// 生产管理系统 - 计划用颜色领域模型
// ==========================================
// 对应表: planned_colors
// 规则: 颜色代码全局唯一，按原样存储
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedColor {
    pub id: i64,
    pub color_code: String,
    pub color_name: String,
    pub top_coat_color: Option<String>, // 面漆颜色
    pub operator_id: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlannedColorDraft {
    pub color_code: String,
    pub color_name: String,
    #[serde(default)]
    pub top_coat_color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_coat_color_is_optional() {
        let d: PlannedColorDraft = serde_json::from_value(serde_json::json!({
            "color_code": "C100",
            "color_name": "Pearl White"
        }))
        .unwrap();
        assert_eq!(d.top_coat_color, None);
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let err = serde_json::from_value::<PlannedColorDraft>(serde_json::json!({
            "color_code": "C100"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("color_name"));
    }
}
