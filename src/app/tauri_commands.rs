// ==========================================
// 生产管理系统 - Tauri 命令（按实体拆分）
// ==========================================
// 职责: Tauri 命令定义，连接前端与后端 API
// 命令名与前端通道一一对应（get-production-lines → get_production_lines）
// ==========================================

#![cfg(feature = "tauri-app")]

mod common;
mod planned_color;
mod production_line;
mod special_engine;
mod special_info;
mod user;

pub use planned_color::*;
pub use production_line::*;
pub use special_engine::*;
pub use special_info::*;
pub use user::*;
