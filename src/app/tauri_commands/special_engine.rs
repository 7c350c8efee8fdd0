use crate::api::{CreatedResponse, SuccessResponse, UpdateSpecialEngineRequest};
use crate::app::state::AppState;
use crate::domain::special_engine::SpecialEngineDraft;

use super::common::run_blocking;

// ==========================================
// 特殊发动机相关命令
// ==========================================

#[tauri::command(rename_all = "snake_case")]
pub async fn get_special_engines(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let api = state.special_engine_api.clone();
    run_blocking("ipc.get_special_engines", move || api.list_engines()).await
}

#[tauri::command(rename_all = "snake_case")]
pub async fn add_special_engine(
    state: tauri::State<'_, AppState>,
    data: SpecialEngineDraft,
) -> Result<String, String> {
    let api = state.special_engine_api.clone();
    run_blocking("ipc.add_special_engine", move || {
        api.create_engine(data).map(CreatedResponse::new)
    })
    .await
}

#[tauri::command(rename_all = "snake_case")]
pub async fn update_special_engine(
    state: tauri::State<'_, AppState>,
    data: UpdateSpecialEngineRequest,
) -> Result<String, String> {
    let api = state.special_engine_api.clone();
    run_blocking("ipc.update_special_engine", move || {
        api.update_engine(data).map(|_| SuccessResponse::ok())
    })
    .await
}

#[tauri::command(rename_all = "snake_case")]
pub async fn delete_special_engine(
    state: tauri::State<'_, AppState>,
    id: i64,
) -> Result<String, String> {
    let api = state.special_engine_api.clone();
    run_blocking("ipc.delete_special_engine", move || {
        api.delete_engine(id).map(|_| SuccessResponse::ok())
    })
    .await
}
