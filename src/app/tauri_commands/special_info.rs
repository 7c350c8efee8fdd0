use crate::api::{CreatedResponse, SuccessResponse};
use crate::app::state::AppState;
use crate::domain::special_info::{SpecialInfoDraft, SpecialInfoQuery};

use super::common::run_blocking;

// ==========================================
// 生产线特殊信息相关命令
// ==========================================

#[tauri::command(rename_all = "snake_case")]
pub async fn get_production_line_special_info(
    state: tauri::State<'_, AppState>,
    query: SpecialInfoQuery,
) -> Result<String, String> {
    let api = state.special_info_api.clone();
    run_blocking("ipc.get_production_line_special_info", move || {
        api.list_special_info(&query)
    })
    .await
}

#[tauri::command(rename_all = "snake_case")]
pub async fn add_production_line_special_info(
    state: tauri::State<'_, AppState>,
    data: SpecialInfoDraft,
) -> Result<String, String> {
    let api = state.special_info_api.clone();
    run_blocking("ipc.add_production_line_special_info", move || {
        api.create_special_info(data).map(CreatedResponse::new)
    })
    .await
}

#[tauri::command(rename_all = "snake_case")]
pub async fn delete_production_line_special_info(
    state: tauri::State<'_, AppState>,
    id: i64,
) -> Result<String, String> {
    let api = state.special_info_api.clone();
    run_blocking("ipc.delete_production_line_special_info", move || {
        api.delete_special_info(id).map(|_| SuccessResponse::ok())
    })
    .await
}
