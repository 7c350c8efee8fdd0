// ==========================================
// 生产管理系统 - 生产线特殊信息 API
// ==========================================
// 职责: 按生产线查询、新增、删除特殊信息（白车身码 / 颜色码）
// 新增流程:
// 1. 白车身码转大写，颜色码原样
// 2. 查询所属生产线类型（不存在 → ReferenceNotFound）
// 3. 预检查 (生产线, 代码类型, 代码值) 是否重复（重复 → DuplicateEntry）
// 4. 写入
// 注意: 2~4 不在同一事务内，并发新增同一条目时由 UNIQUE 约束兜底，
//       此时返回 ConstraintViolation 而非 DuplicateEntry
// ==========================================

use std::sync::Arc;

use crate::api::error::{classify_repository_error, ApiError, ApiResult};
use crate::api::validator::{require_positive_id, require_text, Validate};
use crate::domain::special_info::{SpecialInfo, SpecialInfoDraft, SpecialInfoQuery};
use crate::domain::types::Entity;
use crate::i18n::t_with_args;
use crate::operator::{resolve_operator, OperatorResolver};
use crate::repository::production_line_repo::ProductionLineRepository;
use crate::repository::special_info_repo::SpecialInfoRepository;

impl Validate for SpecialInfoDraft {
    fn validate(&self) -> ApiResult<()> {
        require_positive_id("production_line_id", self.production_line_id)?;
        require_text("code_value", &self.code_value)
    }
}

impl Validate for SpecialInfoQuery {
    fn validate(&self) -> ApiResult<()> {
        require_positive_id("production_line_id", self.line_id)
    }
}

// ==========================================
// SpecialInfoApi - 特殊信息 API
// ==========================================
pub struct SpecialInfoApi {
    info_repo: Arc<SpecialInfoRepository>,
    line_repo: Arc<ProductionLineRepository>,
    operator: Arc<dyn OperatorResolver>,
}

impl SpecialInfoApi {
    pub fn new(
        info_repo: Arc<SpecialInfoRepository>,
        line_repo: Arc<ProductionLineRepository>,
        operator: Arc<dyn OperatorResolver>,
    ) -> Self {
        Self {
            info_repo,
            line_repo,
            operator,
        }
    }

    /// 查询某生产线某类代码（按代码值排序）
    pub fn list_special_info(&self, query: &SpecialInfoQuery) -> ApiResult<Vec<SpecialInfo>> {
        query.validate()?;
        Ok(self.info_repo.list_by_line(query.line_id, query.code_type)?)
    }

    /// 新增特殊信息
    ///
    /// # 返回
    /// - Ok(id): 新记录 id
    /// - Err(ApiError::ReferenceNotFound): 生产线不存在
    /// - Err(ApiError::DuplicateEntry): 该生产线已有相同代码
    pub fn create_special_info(&self, mut info: SpecialInfoDraft) -> ApiResult<i64> {
        info.validate()?;
        info.normalize();

        let line_type = self
            .line_repo
            .find_line_type(info.production_line_id)?
            .ok_or(ApiError::ReferenceNotFound {
                entity: Entity::ProductionLine,
                id: info.production_line_id,
            })?;

        if self
            .info_repo
            .find_existing(info.production_line_id, info.code_type, &info.code_value)?
            .is_some()
        {
            let code_label = info.code_type.label();
            return Err(ApiError::DuplicateEntry {
                field: info.code_type.to_db_str().to_string(),
                value: info.code_value.clone(),
                message: t_with_args(
                    "error.duplicate_special_info",
                    &[
                        ("code_type", code_label.as_str()),
                        ("value", info.code_value.as_str()),
                    ],
                ),
            });
        }

        let operator = resolve_operator(self.operator.as_ref());
        let id = self
            .info_repo
            .insert(
                info.production_line_id,
                info.code_type,
                &info.code_value,
                line_type,
                &operator,
            )
            .map_err(|e| {
                classify_repository_error(
                    e,
                    Entity::SpecialInfo,
                    &[
                        ("code_type", info.code_type.to_db_str()),
                        ("code_value", info.code_value.as_str()),
                    ],
                )
            })?;

        tracing::info!(
            "新增特殊信息: id={}, line_id={}, {}={}, operator={}",
            id,
            info.production_line_id,
            info.code_type,
            info.code_value,
            operator
        );
        Ok(id)
    }

    /// 删除特殊信息（id 不存在时不报错）
    pub fn delete_special_info(&self, id: i64) -> ApiResult<usize> {
        require_positive_id("id", id)?;
        let affected = self.info_repo.delete(id)?;
        tracing::info!("删除特殊信息: id={}, affected={}", id, affected);
        Ok(affected)
    }
}
