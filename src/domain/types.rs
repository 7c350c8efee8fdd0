// ==========================================
// 生产管理系统 - 领域类型定义
// ==========================================
// 枚举值与数据库 CHECK 约束保持一致
// ==========================================

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::i18n::{t, t_or};

// ==========================================
// 生产线类型 (Line Type)
// ==========================================
// 数据库存储值: 车身 / 涂装 / 总装
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineType {
    #[serde(rename = "车身")]
    Body, // 车身
    #[serde(rename = "涂装")]
    Paint, // 涂装
    #[serde(rename = "总装")]
    FinalAssembly, // 总装
}

impl LineType {
    pub const ALL: [LineType; 3] = [LineType::Body, LineType::Paint, LineType::FinalAssembly];

    pub fn to_db_str(&self) -> &'static str {
        match self {
            LineType::Body => "车身",
            LineType::Paint => "涂装",
            LineType::FinalAssembly => "总装",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim() {
            "车身" => Some(LineType::Body),
            "涂装" => Some(LineType::Paint),
            "总装" => Some(LineType::FinalAssembly),
            _ => None,
        }
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl ToSql for LineType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_db_str()))
    }
}

impl FromSql for LineType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        LineType::from_db_str(s).ok_or(FromSqlError::InvalidType)
    }
}

// ==========================================
// 特殊信息代码类型 (Code Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeType {
    WhiteBodyCode, // 白车身码（存储时转大写）
    ColorCode,     // 颜色码（原样存储）
}

impl CodeType {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            CodeType::WhiteBodyCode => "WhiteBodyCode",
            CodeType::ColorCode => "ColorCode",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim() {
            "WhiteBodyCode" => Some(CodeType::WhiteBodyCode),
            "ColorCode" => Some(CodeType::ColorCode),
            _ => None,
        }
    }

    /// 按代码类型规范化代码值
    pub fn normalize_value(&self, value: &str) -> String {
        match self {
            CodeType::WhiteBodyCode => value.to_uppercase(),
            CodeType::ColorCode => value.to_string(),
        }
    }

    /// 面向用户的名称（白车身码 / 颜色码）
    pub fn label(&self) -> String {
        t(&format!("code_type.{}", self.to_db_str()))
    }
}

impl fmt::Display for CodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl ToSql for CodeType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_db_str()))
    }
}

impl FromSql for CodeType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        CodeType::from_db_str(s).ok_or(FromSqlError::InvalidType)
    }
}

// ==========================================
// 实体种类 (Entity)
// ==========================================
// 用于错误信息中标明出错的实体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    ProductionLine,
    SpecialInfo,
    SpecialEngine,
    PlannedColor,
}

impl Entity {
    pub fn table(&self) -> &'static str {
        match self {
            Entity::ProductionLine => "production_lines",
            Entity::SpecialInfo => "production_line_special_info",
            Entity::SpecialEngine => "special_engines",
            Entity::PlannedColor => "planned_colors",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Entity::ProductionLine => "production_line",
            Entity::SpecialInfo => "special_info",
            Entity::SpecialEngine => "special_engine",
            Entity::PlannedColor => "planned_color",
        }
    }

    pub fn label(&self) -> String {
        t(&format!("entity.{}", self.key()))
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// 字段的用户可读名称（缺少翻译时退回列名）
pub fn field_label(column: &str) -> String {
    t_or(&format!("field.{}", column), column)
}
