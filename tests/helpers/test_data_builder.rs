// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use line_refdata::api::{UpdatePlannedColorRequest, UpdateProductionLineRequest, UpdateSpecialEngineRequest};
use line_refdata::domain::{
    CodeType, LineType, PlannedColorDraft, ProductionLineDraft, SpecialEngineDraft,
    SpecialInfoDraft,
};

// ==========================================
// ProductionLine 构建器
// ==========================================

pub struct ProductionLineBuilder {
    line_number: String,
    line_name: String,
    line_type: LineType,
    shift: i64,
    speed: f64,
    efficiency: f64,
    group: Option<i64>,
    flow_code: Option<String>,
    abbreviation: Option<String>,
}

impl ProductionLineBuilder {
    pub fn new(line_number: &str) -> Self {
        Self {
            line_number: line_number.to_string(),
            line_name: format!("{} line", line_number),
            line_type: LineType::Body,
            shift: 2,
            speed: 60.0,
            efficiency: 90.0,
            group: None,
            flow_code: None,
            abbreviation: None,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.line_name = name.to_string();
        self
    }

    pub fn line_type(mut self, line_type: LineType) -> Self {
        self.line_type = line_type;
        self
    }

    pub fn shift(mut self, shift: i64) -> Self {
        self.shift = shift;
        self
    }

    pub fn speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn efficiency(mut self, efficiency: f64) -> Self {
        self.efficiency = efficiency;
        self
    }

    pub fn group(mut self, group: i64) -> Self {
        self.group = Some(group);
        self
    }

    pub fn flow_code(mut self, flow_code: &str) -> Self {
        self.flow_code = Some(flow_code.to_string());
        self
    }

    pub fn build(self) -> ProductionLineDraft {
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
        }
    }

    pub fn build_update(self, id: i64) -> UpdateProductionLineRequest {
        let draft = self.build();
        UpdateProductionLineRequest {
            id,
            line_number: draft.line_number,
            line_name: draft.line_name,
            line_type: draft.line_type,
            shift: draft.shift,
            speed: draft.speed,
            efficiency: draft.efficiency,
            group: draft.group,
            flow_code: draft.flow_code,
            abbreviation: draft.abbreviation,
        }
    }
}

// ==========================================
// 其他实体的简单构造
// ==========================================

pub fn special_info(line_id: i64, code_type: CodeType, code_value: &str) -> SpecialInfoDraft {
    SpecialInfoDraft {
        production_line_id: line_id,
        code_type,
        code_value: code_value.to_string(),
    }
}

pub fn engine(code: &str) -> SpecialEngineDraft {
    SpecialEngineDraft {
        engine_code: code.to_string(),
        gear: "6AT".to_string(),
        engine_name: format!("Engine {}", code),
    }
}

pub fn engine_update(id: i64, code: &str, gear: &str, name: &str) -> UpdateSpecialEngineRequest {
    UpdateSpecialEngineRequest {
        id,
        engine_code: code.to_string(),
        gear: gear.to_string(),
        engine_name: name.to_string(),
    }
}

pub fn color(code: &str, name: &str, top_coat: Option<&str>) -> PlannedColorDraft {
    PlannedColorDraft {
        color_code: code.to_string(),
        color_name: name.to_string(),
        top_coat_color: top_coat.map(str::to_string),
    }
}

pub fn color_update(id: i64, code: &str, name: &str, top_coat: Option<&str>) -> UpdatePlannedColorRequest {
    UpdatePlannedColorRequest {
        id,
        color_code: code.to_string(),
        color_name: name.to_string(),
        top_coat_color: top_coat.map(str::to_string),
    }
}
