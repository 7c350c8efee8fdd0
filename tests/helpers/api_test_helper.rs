// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供API层集成测试的通用辅助函数
// ==========================================

#[path = "../test_helpers.rs"]
mod test_helpers;

use std::sync::Arc;
use tempfile::NamedTempFile;

use line_refdata::api::{PlannedColorApi, ProductionLineApi, SpecialEngineApi, SpecialInfoApi};
use line_refdata::app::{AppState, Dispatcher};
use line_refdata::domain::LineType;
use line_refdata::operator::StaticOperator;
use line_refdata::repository::DataStore;

use super::test_data_builder::ProductionLineBuilder;

/// 测试用操作人
pub const TEST_OPERATOR: &str = "tester";

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// 每个环境独占一个临时数据库文件
pub struct ApiTestEnv {
    pub db_path: String,
    pub state: AppState,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// 创建新的测试环境（已连接、已建表）
    pub fn new() -> Result<Self, String> {
        line_refdata::logging::init_test();
        line_refdata::i18n::set_locale("zh-CN");

        let (temp_file, db_path) =
            test_helpers::create_test_db().map_err(|e| format!("无法创建临时数据库: {}", e))?;
        let state = AppState::open(
            db_path.clone(),
            Arc::new(StaticOperator(TEST_OPERATOR.to_string())),
        )?;

        Ok(Self {
            db_path,
            state,
            _temp_file: temp_file,
        })
    }

    pub fn store(&self) -> &Arc<DataStore> {
        &self.state.store
    }

    pub fn line_api(&self) -> &ProductionLineApi {
        &self.state.production_line_api
    }

    pub fn info_api(&self) -> &SpecialInfoApi {
        &self.state.special_info_api
    }

    pub fn engine_api(&self) -> &SpecialEngineApi {
        &self.state.special_engine_api
    }

    pub fn color_api(&self) -> &PlannedColorApi {
        &self.state.planned_color_api
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::from_state(&self.state)
    }

    /// 新增一条生产线并返回 id
    pub fn create_line(&self, line_number: &str, line_type: LineType) -> i64 {
        self.line_api()
            .create_line(ProductionLineBuilder::new(line_number).line_type(line_type).build())
            .expect("创建生产线失败")
    }

    /// 打开旁路连接
    pub fn raw_connection(&self) -> rusqlite::Connection {
        test_helpers::open_test_connection(&self.db_path).expect("无法打开数据库")
    }

    /// 统计表行数（旁路连接）
    pub fn count_rows(&self, table: &str) -> i64 {
        test_helpers::count_rows(&self.raw_connection(), table).expect("统计失败")
    }
}
