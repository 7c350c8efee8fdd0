use crate::app::state::AppState;

/// 获取当前操作人
#[tauri::command(rename_all = "snake_case")]
pub async fn get_current_user(state: tauri::State<'_, AppState>) -> Result<String, String> {
    Ok(state.current_user())
}
