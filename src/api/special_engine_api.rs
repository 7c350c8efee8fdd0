// ==========================================
// 生产管理系统 - 特殊发动机 API
// ==========================================
// 发动机代码按原样存储，唯一性由存储层约束保证
// ==========================================

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::error::{classify_repository_error, ApiError, ApiResult};
use crate::api::validator::{require_positive_id, require_text, Validate};
use crate::domain::special_engine::{SpecialEngine, SpecialEngineDraft};
use crate::domain::types::Entity;
use crate::operator::{resolve_operator, OperatorResolver};
use crate::repository::special_engine_repo::SpecialEngineRepository;

impl Validate for SpecialEngineDraft {
    fn validate(&self) -> ApiResult<()> {
        require_text("engine_code", &self.engine_code)?;
        require_text("gear", &self.gear)?;
        require_text("engine_name", &self.engine_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateSpecialEngineRequest {
    pub id: i64,
    pub engine_code: String,
    pub gear: String,
    pub engine_name: String,
}

impl UpdateSpecialEngineRequest {
    pub fn into_parts(self) -> (i64, SpecialEngineDraft) {
        (
            self.id,
            SpecialEngineDraft {
                engine_code: self.engine_code,
                gear: self.gear,
                engine_name: self.engine_name,
            },
        )
    }
}

impl Validate for UpdateSpecialEngineRequest {
    fn validate(&self) -> ApiResult<()> {
        require_positive_id("id", self.id)?;
        require_text("engine_code", &self.engine_code)?;
        require_text("gear", &self.gear)?;
        require_text("engine_name", &self.engine_name)
    }
}

pub struct SpecialEngineApi {
    engine_repo: Arc<SpecialEngineRepository>,
    operator: Arc<dyn OperatorResolver>,
}

impl SpecialEngineApi {
    pub fn new(engine_repo: Arc<SpecialEngineRepository>, operator: Arc<dyn OperatorResolver>) -> Self {
        Self { engine_repo, operator }
    }

    /// 查询全部特殊发动机（按发动机代码）
    pub fn list_engines(&self) -> ApiResult<Vec<SpecialEngine>> {
        Ok(self.engine_repo.list_all()?)
    }

    pub fn create_engine(&self, engine: SpecialEngineDraft) -> ApiResult<i64> {
        engine.validate()?;

        let operator = resolve_operator(self.operator.as_ref());
        let id = self.engine_repo.insert(&engine, &operator).map_err(|e| {
            classify_repository_error(
                e,
                Entity::SpecialEngine,
                &[("engine_code", engine.engine_code.as_str())],
            )
        })?;

        tracing::info!("新增特殊发动机: id={}, engine_code={}", id, engine.engine_code);
        Ok(id)
    }

    pub fn update_engine(&self, request: UpdateSpecialEngineRequest) -> ApiResult<()> {
        request.validate()?;
        let (id, engine) = request.into_parts();

        let operator = resolve_operator(self.operator.as_ref());
        let affected = self.engine_repo.update(id, &engine, &operator).map_err(|e| {
            classify_repository_error(
                e,
                Entity::SpecialEngine,
                &[("engine_code", engine.engine_code.as_str())],
            )
        })?;

        if affected == 0 {
            return Err(ApiError::NotFound(format!("{}(id={})不存在", Entity::SpecialEngine.label(), id)));
        }
        tracing::info!("修改特殊发动机: id={}", id);
        Ok(())
    }

    pub fn delete_engine(&self, id: i64) -> ApiResult<usize> {
        require_positive_id("id", id)?;
        let affected = self.engine_repo.delete(id)?;
        tracing::info!("删除特殊发动机: id={}, affected={}", id, affected);
        Ok(affected)
    }
}
