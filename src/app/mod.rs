// ==========================================
// 生产管理系统 - 应用层
// ==========================================
// 职责: 应用状态、请求分发与桥接，Tauri 集成（可选）
// ==========================================

pub mod bridge;
pub mod dispatch;
pub mod state;
pub mod tauri_commands;

// 重导出
pub use bridge::{spawn_bridge, BridgeHandle, RequestEnvelope, ResponseEnvelope, DEFAULT_QUEUE_CAPACITY};
pub use dispatch::{Channel, Dispatcher, ErrorResponse};
pub use state::AppState;

#[cfg(feature = "tauri-app")]
pub use tauri_commands::*;
