// ==========================================
// 生产管理系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 约束: 所有API共享同一个 DataStore（单连接），退出时关闭一次
// ==========================================

use std::sync::Arc;

use crate::api::{PlannedColorApi, ProductionLineApi, SpecialEngineApi, SpecialInfoApi};
use crate::config::DatabaseConfig;
use crate::operator::{resolve_operator, EnvOperatorResolver, OperatorResolver};
use crate::repository::{
    DataStore, PlannedColorRepository, ProductionLineRepository, SpecialEngineRepository,
    SpecialInfoRepository,
};

/// 应用状态
///
/// 包含所有API实例和共享资源
/// 在Tauri应用中作为全局状态管理
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 数据存储（唯一连接）
    pub store: Arc<DataStore>,

    /// 操作人来源
    pub operator: Arc<dyn OperatorResolver>,

    /// 生产线API
    pub production_line_api: Arc<ProductionLineApi>,

    /// 生产线特殊信息API
    pub special_info_api: Arc<SpecialInfoApi>,

    /// 特殊发动机API
    pub special_engine_api: Arc<SpecialEngineApi>,

    /// 计划用颜色API
    pub planned_color_api: Arc<PlannedColorApi>,
}

impl AppState {
    /// 按配置创建AppState（操作人取自环境变量）
    ///
    /// # 返回
    /// - Ok(AppState): 已连接数据库的应用状态
    /// - Err(String): 初始化错误
    pub fn new(config: &DatabaseConfig) -> Result<Self, String> {
        Self::open(config.resolve_db_path(), Arc::new(EnvOperatorResolver))
    }

    /// 打开指定数据库文件
    pub fn open(db_path: impl Into<String>, operator: Arc<dyn OperatorResolver>) -> Result<Self, String> {
        let db_path = db_path.into();
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let store = Arc::new(DataStore::new());
        store
            .connect(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;

        Ok(Self::with_store(db_path, store, operator))
    }

    /// 基于已有数据存储组装各API（不负责连接）
    pub fn with_store(db_path: String, store: Arc<DataStore>, operator: Arc<dyn OperatorResolver>) -> Self {
        // ==========================================
        // 初始化Repository层
        // ==========================================
        let line_repo = Arc::new(ProductionLineRepository::new(store.clone()));
        let info_repo = Arc::new(SpecialInfoRepository::new(store.clone()));
        let engine_repo = Arc::new(SpecialEngineRepository::new(store.clone()));
        let color_repo = Arc::new(PlannedColorRepository::new(store.clone()));

        // ==========================================
        // 创建API实例
        // ==========================================
        let production_line_api = Arc::new(ProductionLineApi::new(line_repo.clone(), operator.clone()));
        let special_info_api = Arc::new(SpecialInfoApi::new(info_repo, line_repo, operator.clone()));
        let special_engine_api = Arc::new(SpecialEngineApi::new(engine_repo, operator.clone()));
        let planned_color_api = Arc::new(PlannedColorApi::new(color_repo, operator.clone()));

        tracing::info!("AppState初始化完成");

        Self {
            db_path,
            store,
            operator,
            production_line_api,
            special_info_api,
            special_engine_api,
            planned_color_api,
        }
    }

    /// 当前操作人（失败时为 "unknown"）
    pub fn current_user(&self) -> String {
        resolve_operator(self.operator.as_ref())
    }

    /// 关闭数据库连接（幂等）
    pub fn shutdown(&self) {
        match self.store.close() {
            Ok(()) => tracing::info!("AppState已关闭: {}", self.db_path),
            Err(e) => tracing::warn!("关闭数据库连接失败: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::operator::StaticOperator;

    #[test]
    fn test_open_and_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("state.db");

        let state = AppState::open(
            db_path.to_string_lossy().to_string(),
            Arc::new(StaticOperator("tester".to_string())),
        )
        .unwrap();
        assert!(state.store.is_connected());
        assert_eq!(state.current_user(), "tester");
        assert!(state.production_line_api.list_lines().unwrap().is_empty());

        state.shutdown();
        state.shutdown();
        assert!(!state.store.is_connected());
        assert!(matches!(
            state.planned_color_api.list_colors(),
            Err(ApiError::NotConnected)
        ));
    }

    #[test]
    fn test_open_unreachable_path_fails() {
        let result = AppState::open(
            "/nonexistent-dir/for/sure/x.db",
            Arc::new(StaticOperator("tester".to_string())),
        );
        assert!(result.is_err());
    }
}
