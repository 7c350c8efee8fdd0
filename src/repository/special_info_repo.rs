// ==========================================
// 生产管理系统 - 生产线特殊信息仓储
// ==========================================
// 唯一约束: (production_line_id, code_type, code_value)
// ==========================================

use crate::domain::special_info::SpecialInfo;
use crate::domain::types::{CodeType, LineType};
use crate::repository::data_store::DataStore;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::params;
use std::sync::Arc;

pub struct SpecialInfoRepository {
    store: Arc<DataStore>,
}

impl SpecialInfoRepository {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SpecialInfo> {
        Ok(SpecialInfo {
            id: row.get(0)?,
            production_line_id: row.get(1)?,
            code_type: row.get(2)?,
            code_value: row.get(3)?,
            line_type: row.get(4)?,
            operator_id: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }

    /// 查询某生产线某类代码
    pub fn list_by_line(&self, line_id: i64, code_type: CodeType) -> RepositoryResult<Vec<SpecialInfo>> {
        self.store.query(
            r#"
            SELECT id, production_line_id, code_type, code_value, line_type,
                   operator_id, created_at, updated_at
            FROM production_line_special_info
            WHERE production_line_id = ?1 AND code_type = ?2
            ORDER BY code_value ASC
            "#,
            params![line_id, code_type],
            Self::map_row,
        )
    }

    /// 统计某生产线的特殊信息条数（不区分代码类型）
    pub fn count_by_line(&self, line_id: i64) -> RepositoryResult<i64> {
        let count = self.store.query_optional(
            "SELECT COUNT(*) FROM production_line_special_info WHERE production_line_id = ?1",
            params![line_id],
            |row| row.get(0),
        )?;
        Ok(count.unwrap_or(0))
    }

    /// 查找 (生产线, 代码类型, 代码值) 相同的已有记录
    pub fn find_existing(
        &self,
        line_id: i64,
        code_type: CodeType,
        code_value: &str,
    ) -> RepositoryResult<Option<i64>> {
        self.store.query_optional(
            r#"
            SELECT id FROM production_line_special_info
            WHERE production_line_id = ?1 AND code_type = ?2 AND code_value = ?3
            "#,
            params![line_id, code_type, code_value],
            |row| row.get(0),
        )
    }

    /// 新增特殊信息，返回自增 id
    pub fn insert(
        &self,
        line_id: i64,
        code_type: CodeType,
        code_value: &str,
        line_type: LineType,
        operator: &str,
    ) -> RepositoryResult<i64> {
        let outcome = self.store.execute(
            r#"
            INSERT INTO production_line_special_info
                (production_line_id, code_type, code_value, line_type, operator_id)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![line_id, code_type, code_value, line_type, operator],
        )?;

        outcome.inserted_id().ok_or_else(|| {
            RepositoryError::DatabaseQueryError("INSERT 未返回自增 id".to_string())
        })
    }

    pub fn delete(&self, id: i64) -> RepositoryResult<usize> {
        let outcome = self.store.execute(
            "DELETE FROM production_line_special_info WHERE id = ?1",
            params![id],
        )?;
        Ok(outcome.affected())
    }
}
