// ==========================================
// 生产管理系统 - 基础数据核心库
// ==========================================
// 技术栈: Rust + SQLite（可选 Tauri 桌面壳）
// 范围: 生产线、生产线特殊信息、特殊发动机、计划用颜色的维护
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 配置层 - 启动配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA/建表）
pub mod db;

// 操作人识别
pub mod operator;

// 日志系统
pub mod logging;

// SQL 性能统计
pub mod perf;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 分发、桥接与 Tauri 集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CodeType, Entity, LineType};

// 领域实体
pub use domain::{PlannedColor, ProductionLine, SpecialEngine, SpecialInfo};

// 数据存储
pub use repository::{DataStore, ExecOutcome, RepositoryError};

// API
pub use api::{
    ApiError, ApiResult, PlannedColorApi, ProductionLineApi, SpecialEngineApi, SpecialInfoApi,
};

// 应用
pub use app::{AppState, BridgeHandle, Dispatcher, ErrorResponse};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "生产管理系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
