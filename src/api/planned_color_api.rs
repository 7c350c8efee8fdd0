// ==========================================
// 生产管理系统 - 计划用颜色 API
// ==========================================

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::error::{classify_repository_error, ApiError, ApiResult};
use crate::api::validator::{require_positive_id, require_text, Validate};
use crate::domain::planned_color::{PlannedColor, PlannedColorDraft};
use crate::domain::types::Entity;
use crate::operator::{resolve_operator, OperatorResolver};
use crate::repository::planned_color_repo::PlannedColorRepository;

impl Validate for PlannedColorDraft {
    fn validate(&self) -> ApiResult<()> {
        require_text("color_code", &self.color_code)?;
        require_text("color_name", &self.color_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePlannedColorRequest {
    pub id: i64,
    pub color_code: String,
    pub color_name: String,
    #[serde(default)]
    pub top_coat_color: Option<String>,
}

impl UpdatePlannedColorRequest {
    pub fn into_parts(self) -> (i64, PlannedColorDraft) {
        (
            self.id,
            PlannedColorDraft {
                color_code: self.color_code,
                color_name: self.color_name,
                top_coat_color: self.top_coat_color,
            },
        )
    }
}

impl Validate for UpdatePlannedColorRequest {
    fn validate(&self) -> ApiResult<()> {
        require_positive_id("id", self.id)?;
        require_text("color_code", &self.color_code)?;
        require_text("color_name", &self.color_name)
    }
}

// ==========================================
// PlannedColorApi - 计划用颜色 API
// ==========================================
pub struct PlannedColorApi {
    color_repo: Arc<PlannedColorRepository>,
    operator: Arc<dyn OperatorResolver>,
}

impl PlannedColorApi {
    pub fn new(color_repo: Arc<PlannedColorRepository>, operator: Arc<dyn OperatorResolver>) -> Self {
        Self { color_repo, operator }
    }

    /// 查询全部计划用颜色（按颜色代码）
    pub fn list_colors(&self) -> ApiResult<Vec<PlannedColor>> {
        Ok(self.color_repo.list_all()?)
    }

    pub fn create_color(&self, color: PlannedColorDraft) -> ApiResult<i64> {
        color.validate()?;

        let operator = resolve_operator(self.operator.as_ref());
        let id = self.color_repo.insert(&color, &operator).map_err(|e| {
            classify_repository_error(
                e,
                Entity::PlannedColor,
                &[("color_code", color.color_code.as_str())],
            )
        })?;

        tracing::info!("新增计划用颜色: id={}, color_code={}", id, color.color_code);
        Ok(id)
    }

    /// 修改计划用颜色（id 不存在时返回 NotFound）
    pub fn update_color(&self, request: UpdatePlannedColorRequest) -> ApiResult<()> {
        request.validate()?;
        let (id, color) = request.into_parts();

        let operator = resolve_operator(self.operator.as_ref());
        let affected = self.color_repo.update(id, &color, &operator).map_err(|e| {
            classify_repository_error(
                e,
                Entity::PlannedColor,
                &[("color_code", color.color_code.as_str())],
            )
        })?;

        if affected == 0 {
            return Err(ApiError::NotFound(format!("{}(id={})不存在", Entity::PlannedColor.label(), id)));
        }
        tracing::info!("修改计划用颜色: id={}", id);
        Ok(())
    }

    pub fn delete_color(&self, id: i64) -> ApiResult<usize> {
        require_positive_id("id", id)?;
        let affected = self.color_repo.delete(id)?;
        tracing::info!("删除计划用颜色: id={}, affected={}", id, affected);
        Ok(affected)
    }
}
