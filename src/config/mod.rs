// ==========================================
// 生产管理系统 - 配置层
// ==========================================
// 职责: 启动配置加载（数据库名与文件路径）
// ==========================================

pub mod database_config;

pub use database_config::{ConfigError, DatabaseConfig};
