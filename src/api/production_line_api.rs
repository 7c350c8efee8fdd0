// ==========================================
// 生产管理系统 - 生产线 API
// ==========================================
// 职责: 生产线的查询、新增、修改、删除
// 规则:
// - 编号、名称统一转大写后写入
// - 编号唯一性由存储层 UNIQUE 约束保证（不做预检查）
// - 删除生产线级联删除其特殊信息
// ==========================================

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::error::{classify_repository_error, ApiError, ApiResult};
use crate::api::validator::{
    require_non_negative, require_non_negative_int, require_percentage, require_positive_id,
    require_text, Validate,
};
use crate::domain::production_line::{ProductionLine, ProductionLineDraft};
use crate::domain::types::{Entity, LineType};
use crate::operator::{resolve_operator, OperatorResolver};
use crate::repository::production_line_repo::ProductionLineRepository;

// ==========================================
// 请求结构
// ==========================================

impl Validate for ProductionLineDraft {
    fn validate(&self) -> ApiResult<()> {
        require_text("line_number", &self.line_number)?;
        require_text("line_name", &self.line_name)?;
        require_non_negative_int("shift", self.shift)?;
        require_non_negative("speed", self.speed)?;
        require_percentage("efficiency", self.efficiency)?;
        Ok(())
    }
}

/// 修改生产线请求（id 与字段平铺）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProductionLineRequest {
    pub id: i64,
    pub line_number: String,
    pub line_name: String,
    pub line_type: LineType,
    pub shift: i64,
    pub speed: f64,
    pub efficiency: f64,
    #[serde(default)]
    pub group: Option<i64>,
    #[serde(default)]
    pub flow_code: Option<String>,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

impl UpdateProductionLineRequest {
    pub fn into_parts(self) -> (i64, ProductionLineDraft) {
        (
            self.id,
            ProductionLineDraft {
                line_number: self.line_number,
                line_name: self.line_name,
                line_type: self.line_type,
                shift: self.shift,
                speed: self.speed,
                efficiency: self.efficiency,
                group: self.group,
                flow_code: self.flow_code,
                abbreviation: self.abbreviation,
            },
        )
    }
}

impl Validate for UpdateProductionLineRequest {
    fn validate(&self) -> ApiResult<()> {
        require_positive_id("id", self.id)?;
        require_text("line_number", &self.line_number)?;
        require_text("line_name", &self.line_name)?;
        require_non_negative_int("shift", self.shift)?;
        require_non_negative("speed", self.speed)?;
        require_percentage("efficiency", self.efficiency)?;
        Ok(())
    }
}

/// 约束违反时回显的提交值
fn submitted_columns(line: &ProductionLineDraft) -> [(&'static str, String); 5] {
    [
        ("line_number", line.line_number.clone()),
        ("line_type", line.line_type.to_db_str().to_string()),
        ("shift", line.shift.to_string()),
        ("speed", line.speed.to_string()),
        ("efficiency", line.efficiency.to_string()),
    ]
}

// ==========================================
// ProductionLineApi - 生产线 API
// ==========================================
pub struct ProductionLineApi {
    line_repo: Arc<ProductionLineRepository>,
    operator: Arc<dyn OperatorResolver>,
}

impl ProductionLineApi {
    pub fn new(line_repo: Arc<ProductionLineRepository>, operator: Arc<dyn OperatorResolver>) -> Self {
        Self { line_repo, operator }
    }

    /// 查询全部生产线（车身 → 涂装 → 总装，同类型按编号）
    pub fn list_lines(&self) -> ApiResult<Vec<ProductionLine>> {
        Ok(self.line_repo.list_all()?)
    }

    /// 新增生产线
    ///
    /// # 返回
    /// - Ok(id): 新生产线 id
    /// - Err(ApiError::ConstraintViolation): 编号重复或类型等字段不合法
    pub fn create_line(&self, mut line: ProductionLineDraft) -> ApiResult<i64> {
        line.validate()?;
        line.normalize();

        let operator = resolve_operator(self.operator.as_ref());
        let id = self
            .line_repo
            .insert(&line, &operator)
            .map_err(|e| classify_repository_error(e, Entity::ProductionLine, &submitted_columns(&line)))?;

        tracing::info!(
            "新增生产线: id={}, line_number={}, operator={}",
            id,
            line.line_number,
            operator
        );
        Ok(id)
    }

    /// 修改生产线（id 不存在时返回 NotFound）
    pub fn update_line(&self, request: UpdateProductionLineRequest) -> ApiResult<()> {
        request.validate()?;
        let (id, mut line) = request.into_parts();
        line.normalize();

        let operator = resolve_operator(self.operator.as_ref());
        let affected = self
            .line_repo
            .update(id, &line, &operator)
            .map_err(|e| classify_repository_error(e, Entity::ProductionLine, &submitted_columns(&line)))?;

        if affected == 0 {
            return Err(ApiError::NotFound(format!("{}(id={})不存在", Entity::ProductionLine.label(), id)));
        }

        tracing::info!("修改生产线: id={}, operator={}", id, operator);
        Ok(())
    }

    /// 删除生产线（级联删除特殊信息）
    ///
    /// id 不存在时不报错，返回受影响行数 0
    pub fn delete_line(&self, id: i64) -> ApiResult<usize> {
        require_positive_id("id", id)?;

        let affected = self
            .line_repo
            .delete(id)
            .map_err(|e| classify_repository_error::<&str>(e, Entity::ProductionLine, &[]))?;

        tracing::info!("删除生产线: id={}, affected={}", id, affected);
        Ok(affected)
    }
}
