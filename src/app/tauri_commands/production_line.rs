use crate::api::{CreatedResponse, SuccessResponse, UpdateProductionLineRequest};
use crate::app::state::AppState;
use crate::domain::production_line::ProductionLineDraft;

use super::common::run_blocking;

// ==========================================
// 生产线相关命令
// ==========================================

/// 查询全部生产线
#[tauri::command(rename_all = "snake_case")]
pub async fn get_production_lines(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let api = state.production_line_api.clone();
    run_blocking("ipc.get_production_lines", move || api.list_lines()).await
}

/// 新增生产线
#[tauri::command(rename_all = "snake_case")]
pub async fn add_production_line(
    state: tauri::State<'_, AppState>,
    data: ProductionLineDraft,
) -> Result<String, String> {
    let api = state.production_line_api.clone();
    run_blocking("ipc.add_production_line", move || {
        api.create_line(data).map(CreatedResponse::new)
    })
    .await
}

/// 修改生产线
#[tauri::command(rename_all = "snake_case")]
pub async fn update_production_line(
    state: tauri::State<'_, AppState>,
    data: UpdateProductionLineRequest,
) -> Result<String, String> {
    let api = state.production_line_api.clone();
    run_blocking("ipc.update_production_line", move || {
        api.update_line(data).map(|_| SuccessResponse::ok())
    })
    .await
}

/// 删除生产线（级联删除特殊信息）
#[tauri::command(rename_all = "snake_case")]
pub async fn delete_production_line(
    state: tauri::State<'_, AppState>,
    id: i64,
) -> Result<String, String> {
    let api = state.production_line_api.clone();
    run_blocking("ipc.delete_production_line", move || {
        api.delete_line(id).map(|_| SuccessResponse::ok())
    })
    .await
}
