// ==========================================
// 生产管理系统 - 特殊发动机仓储
// ==========================================

use crate::domain::special_engine::{SpecialEngine, SpecialEngineDraft};
use crate::repository::data_store::DataStore;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::params;
use std::sync::Arc;

pub struct SpecialEngineRepository {
    store: Arc<DataStore>,
}

impl SpecialEngineRepository {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    /// 查询全部特殊发动机（按发动机代码升序）
    pub fn list_all(&self) -> RepositoryResult<Vec<SpecialEngine>> {
        self.store.query(
            r#"
            SELECT id, engine_code, gear, engine_name, operator_id, created_at, updated_at
            FROM special_engines
            ORDER BY engine_code ASC
            "#,
            params![],
            |row| {
                Ok(SpecialEngine {
                    id: row.get(0)?,
                    engine_code: row.get(1)?,
                    gear: row.get(2)?,
                    engine_name: row.get(3)?,
                    operator_id: row.get(4)?,
                    created_at: row.get(5)?,
                    updated_at: row.get(6)?,
                })
            },
        )
    }

    pub fn insert(&self, engine: &SpecialEngineDraft, operator: &str) -> RepositoryResult<i64> {
        let outcome = self.store.execute(
            r#"
            INSERT INTO special_engines (engine_code, gear, engine_name, operator_id)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![engine.engine_code, engine.gear, engine.engine_name, operator],
        )?;

        outcome.inserted_id().ok_or_else(|| {
            RepositoryError::DatabaseQueryError("INSERT 未返回自增 id".to_string())
        })
    }

    pub fn update(&self, id: i64, engine: &SpecialEngineDraft, operator: &str) -> RepositoryResult<usize> {
        let outcome = self.store.execute(
            r#"
            UPDATE special_engines
            SET engine_code = ?1, gear = ?2, engine_name = ?3, operator_id = ?4
            WHERE id = ?5
            "#,
            params![engine.engine_code, engine.gear, engine.engine_name, operator, id],
        )?;
        Ok(outcome.affected())
    }

    pub fn delete(&self, id: i64) -> RepositoryResult<usize> {
        let outcome = self
            .store
            .execute("DELETE FROM special_engines WHERE id = ?1", params![id])?;
        Ok(outcome.affected())
    }
}
