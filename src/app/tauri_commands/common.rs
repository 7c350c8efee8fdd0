use serde::Serialize;

use crate::api::{ApiError, ApiResult};
use crate::app::dispatch::ErrorResponse;
use crate::perf::PerfGuard;

// ==========================================
// 公共工具：错误映射、阻塞执行
// ==========================================

/// 将ApiError转换为JSON字符串（Tauri要求）
pub(super) fn map_api_error(err: ApiError) -> String {
    serde_json::to_string(&ErrorResponse::from(&err)).unwrap_or_else(|_| err.to_string())
}

/// 在阻塞线程池中执行 API 调用，并将结果序列化为 JSON 字符串
pub(super) async fn run_blocking<T, F>(op: &'static str, f: F) -> Result<String, String>
where
    F: FnOnce() -> ApiResult<T> + Send + 'static,
    T: Serialize + Send + 'static,
{
    let result = tauri::async_runtime::spawn_blocking(move || {
        let _perf = PerfGuard::new(op);
        f()
    })
    .await
    .map_err(|e| format!("任务执行失败: {}", e))?
    .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}
