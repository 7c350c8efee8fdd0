// ==========================================
// 生产管理系统 - 领域模型层
// ==========================================
// 职责: 定义基础数据实体、输入结构与枚举类型
// 红线: 不含数据访问逻辑
// ==========================================

pub mod planned_color;
pub mod production_line;
pub mod special_engine;
pub mod special_info;
pub mod types;

// 重导出核心类型
pub use planned_color::{PlannedColor, PlannedColorDraft};
pub use production_line::{ProductionLine, ProductionLineDraft};
pub use special_engine::{SpecialEngine, SpecialEngineDraft};
pub use special_info::{SpecialInfo, SpecialInfoDraft, SpecialInfoQuery};
pub use types::{field_label, CodeType, Entity, LineType};
