use crate::api::{CreatedResponse, SuccessResponse, UpdatePlannedColorRequest};
use crate::app::state::AppState;
use crate::domain::planned_color::PlannedColorDraft;

use super::common::run_blocking;

// ==========================================
// 计划用颜色相关命令
// ==========================================

#[tauri::command(rename_all = "snake_case")]
pub async fn get_planned_colors(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let api = state.planned_color_api.clone();
    run_blocking("ipc.get_planned_colors", move || api.list_colors()).await
}

#[tauri::command(rename_all = "snake_case")]
pub async fn add_planned_color(
    state: tauri::State<'_, AppState>,
    data: PlannedColorDraft,
) -> Result<String, String> {
    let api = state.planned_color_api.clone();
    run_blocking("ipc.add_planned_color", move || {
        api.create_color(data).map(CreatedResponse::new)
    })
    .await
}

#[tauri::command(rename_all = "snake_case")]
pub async fn update_planned_color(
    state: tauri::State<'_, AppState>,
    data: UpdatePlannedColorRequest,
) -> Result<String, String> {
    let api = state.planned_color_api.clone();
    run_blocking("ipc.update_planned_color", move || {
        api.update_color(data).map(|_| SuccessResponse::ok())
    })
    .await
}

#[tauri::command(rename_all = "snake_case")]
pub async fn delete_planned_color(
    state: tauri::State<'_, AppState>,
    id: i64,
) -> Result<String, String> {
    let api = state.planned_color_api.clone();
    run_blocking("ipc.delete_planned_color", move || {
        api.delete_color(id).map(|_| SuccessResponse::ok())
    })
    .await
}
