// ==========================================
// 生产管理系统 - 计划用颜色仓储
// ==========================================

use crate::domain::planned_color::{PlannedColor, PlannedColorDraft};
use crate::repository::data_store::DataStore;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::params;
use std::sync::Arc;

pub struct PlannedColorRepository {
    store: Arc<DataStore>,
}

impl PlannedColorRepository {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    /// 查询全部计划用颜色（按颜色代码升序）
    pub fn list_all(&self) -> RepositoryResult<Vec<PlannedColor>> {
        self.store.query(
            r#"
            SELECT id, color_code, color_name, top_coat_color, operator_id, created_at, updated_at
            FROM planned_colors
            ORDER BY color_code ASC
            "#,
            params![],
            |row| {
                Ok(PlannedColor {
                    id: row.get(0)?,
                    color_code: row.get(1)?,
                    color_name: row.get(2)?,
                    top_coat_color: row.get(3)?,
                    operator_id: row.get(4)?,
                    created_at: row.get(5)?,
                    updated_at: row.get(6)?,
                })
            },
        )
    }

    pub fn insert(&self, color: &PlannedColorDraft, operator: &str) -> RepositoryResult<i64> {
        let outcome = self.store.execute(
            r#"
            INSERT INTO planned_colors (color_code, color_name, top_coat_color, operator_id)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![color.color_code, color.color_name, color.top_coat_color, operator],
        )?;

        outcome.inserted_id().ok_or_else(|| {
            RepositoryError::DatabaseQueryError("INSERT 未返回自增 id".to_string())
        })
    }

    pub fn update(&self, id: i64, color: &PlannedColorDraft, operator: &str) -> RepositoryResult<usize> {
        let outcome = self.store.execute(
            r#"
            UPDATE planned_colors
            SET color_code = ?1, color_name = ?2, top_coat_color = ?3, operator_id = ?4
            WHERE id = ?5
            "#,
            params![color.color_code, color.color_name, color.top_coat_color, operator, id],
        )?;
        Ok(outcome.affected())
    }

    pub fn delete(&self, id: i64) -> RepositoryResult<usize> {
        let outcome = self
            .store
            .execute("DELETE FROM planned_colors WHERE id = ?1", params![id])?;
        Ok(outcome.affected())
    }
}
