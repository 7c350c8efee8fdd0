// ==========================================
// 生产管理系统 - 生产线数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑（大小写规范化在 API 层完成）
// 删除生产线时，特殊信息由外键 ON DELETE CASCADE 级联删除
// ==========================================

use crate::domain::production_line::{ProductionLine, ProductionLineDraft};
use crate::domain::types::LineType;
use crate::repository::data_store::DataStore;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::params;
use std::sync::Arc;

const SELECT_COLUMNS: &str = r#"
    id, line_number, line_name, line_type, shift, speed, efficiency,
    "group", flow_code, abbreviation, operator_id, created_at, updated_at
"#;

// ==========================================
// ProductionLineRepository - 生产线仓储
// ==========================================
pub struct ProductionLineRepository {
    store: Arc<DataStore>,
}

impl ProductionLineRepository {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProductionLine> {
        Ok(ProductionLine {
            id: row.get(0)?,
            line_number: row.get(1)?,
            line_name: row.get(2)?,
            line_type: row.get(3)?,
            shift: row.get(4)?,
            speed: row.get(5)?,
            efficiency: row.get(6)?,
            group: row.get(7)?,
            flow_code: row.get(8)?,
            abbreviation: row.get(9)?,
            operator_id: row.get(10)?,
            created_at: row.get(11)?,
            updated_at: row.get(12)?,
        })
    }

    /// 查询全部生产线（按 车身 → 涂装 → 总装，再按编号排序）
    pub fn list_all(&self) -> RepositoryResult<Vec<ProductionLine>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM production_lines
            ORDER BY CASE line_type WHEN '车身' THEN 1 WHEN '涂装' THEN 2 ELSE 3 END,
                     line_number ASC
            "#,
            SELECT_COLUMNS
        );
        self.store.query(&sql, params![], Self::map_row)
    }

    /// 按 id 查询
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<ProductionLine>> {
        let sql = format!("SELECT {} FROM production_lines WHERE id = ?1", SELECT_COLUMNS);
        self.store.query_optional(&sql, params![id], Self::map_row)
    }

    /// 查询生产线类型（用于特殊信息的冗余字段）
    pub fn find_line_type(&self, id: i64) -> RepositoryResult<Option<LineType>> {
        self.store.query_optional(
            "SELECT line_type FROM production_lines WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )
    }

    /// 新增生产线，返回自增 id
    pub fn insert(&self, line: &ProductionLineDraft, operator: &str) -> RepositoryResult<i64> {
        let outcome = self.store.execute(
            r#"
            INSERT INTO production_lines
                (line_number, line_name, line_type, shift, speed, efficiency,
                 "group", flow_code, abbreviation, operator_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                line.line_number,
                line.line_name,
                line.line_type,
                line.shift,
                line.speed,
                line.efficiency,
                line.group,
                line.flow_code,
                line.abbreviation,
                operator,
            ],
        )?;

        outcome.inserted_id().ok_or_else(|| {
            RepositoryError::DatabaseQueryError("INSERT 未返回自增 id".to_string())
        })
    }

    /// 按 id 更新生产线，返回受影响行数
    pub fn update(&self, id: i64, line: &ProductionLineDraft, operator: &str) -> RepositoryResult<usize> {
        let outcome = self.store.execute(
            r#"
            UPDATE production_lines
            SET line_number = ?1, line_name = ?2, line_type = ?3, shift = ?4,
                speed = ?5, efficiency = ?6, "group" = ?7, flow_code = ?8,
                abbreviation = ?9, operator_id = ?10
            WHERE id = ?11
            "#,
            params![
                line.line_number,
                line.line_name,
                line.line_type,
                line.shift,
                line.speed,
                line.efficiency,
                line.group,
                line.flow_code,
                line.abbreviation,
                operator,
                id,
            ],
        )?;
        Ok(outcome.affected())
    }

    /// 按 id 删除生产线（级联删除特殊信息），返回受影响行数
    pub fn delete(&self, id: i64) -> RepositoryResult<usize> {
        let outcome = self
            .store
            .execute("DELETE FROM production_lines WHERE id = ?1", params![id])?;
        Ok(outcome.affected())
    }
}
