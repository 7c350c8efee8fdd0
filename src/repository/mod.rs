// ==========================================
// 生产管理系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有语句参数化,经由唯一的 DataStore 连接执行
// ==========================================

pub mod data_store;
pub mod error;
pub mod planned_color_repo;
pub mod production_line_repo;
pub mod special_engine_repo;
pub mod special_info_repo;

// 重导出核心仓储
pub use data_store::{DataStore, ExecOutcome, Row, StatementKind};
pub use error::{ConstraintKind, RepositoryError, RepositoryResult};
pub use planned_color_repo::PlannedColorRepository;
pub use production_line_repo::ProductionLineRepository;
pub use special_engine_repo::SpecialEngineRepository;
pub use special_info_repo::SpecialInfoRepository;
