// ==========================================
// 生产管理系统 - 操作人识别
// ==========================================
// 职责: 识别当前进程的操作人，写入 operator_id
// 约束: 每次写操作只解析一次；解析失败时退回 "unknown"
// ==========================================

use std::env;

/// 解析失败时使用的操作人
pub const UNKNOWN_OPERATOR: &str = "unknown";

/// 操作人来源
pub trait OperatorResolver: Send + Sync {
    fn current_operator(&self) -> Result<String, String>;
}

/// 从环境变量读取操作人（USERNAME 优先，其次 USER）
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvOperatorResolver;

impl OperatorResolver for EnvOperatorResolver {
    fn current_operator(&self) -> Result<String, String> {
        for var in ["USERNAME", "USER"] {
            if let Ok(value) = env::var(var) {
                if !value.trim().is_empty() {
                    return Ok(value);
                }
            }
        }
        Err("环境变量 USERNAME/USER 均未设置".to_string())
    }
}

/// 固定操作人（测试与嵌入场景）
#[derive(Debug, Clone)]
pub struct StaticOperator(pub String);

impl OperatorResolver for StaticOperator {
    fn current_operator(&self) -> Result<String, String> {
        Ok(self.0.clone())
    }
}

/// 解析操作人，失败时记录警告并返回 "unknown"
pub fn resolve_operator(resolver: &dyn OperatorResolver) -> String {
    match resolver.current_operator() {
        Ok(name) => name,
        Err(e) => {
            tracing::warn!("获取当前操作人失败，使用默认值: {}", e);
            UNKNOWN_OPERATOR.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl OperatorResolver for Failing {
        fn current_operator(&self) -> Result<String, String> {
            Err("no identity".to_string())
        }
    }

    #[test]
    fn test_static_operator() {
        let op = StaticOperator("zhangsan".to_string());
        assert_eq!(resolve_operator(&op), "zhangsan");
    }

    #[test]
    fn test_failure_falls_back_to_unknown() {
        assert_eq!(resolve_operator(&Failing), UNKNOWN_OPERATOR);
    }
}
