// ==========================================
// 生产管理系统 - 国际化 (i18n)
// ==========================================
// 使用 rust-i18n 库，语言包位于 locales/
// 支持中文（默认）和英文；实体、字段、代码类型名称与错误消息均经此翻译
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 默认语言
pub const DEFAULT_LOCALE: &str = "zh-CN";

/// 语言覆写环境变量
pub const LOCALE_ENV: &str = "LINE_REFDATA_LOCALE";

/// 启动时设置语言（环境变量优先，否则中文）
pub fn init() {
    let locale = std::env::var(LOCALE_ENV)
        .ok()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
    set_locale(&locale);
}

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"zh-CN" 或 "en"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use line_refdata::i18n::t;
/// let msg = t("common.success");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息，缺少翻译时返回 fallback
pub fn t_or(key: &str, fallback: &str) -> String {
    let msg = t(key);
    if msg.ends_with(key) {
        fallback.to_string()
    } else {
        msg
    }
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use line_refdata::i18n::t_with_args;
/// let msg = t_with_args("error.not_null", &[("entity", "生产线"), ("field", "生产线编号")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

// rust-i18n 的 locale 为全局状态，且 Rust 测试默认并行执行；
// 凡依赖具体语言的测试都需持有该锁。
#[cfg(test)]
pub(crate) static LOCALE_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        // 显式设置为默认语言
        set_locale("zh-CN");
        assert_eq!(current_locale(), "zh-CN");
    }

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        // 测试切换语言
        set_locale("zh-CN");
        assert_eq!(current_locale(), "zh-CN");

        set_locale("en");
        assert_eq!(current_locale(), "en");

        // 恢复默认语言
        set_locale("zh-CN");
    }

    #[test]
    fn test_translate_simple() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        // 测试中文翻译
        set_locale("zh-CN");
        let msg = t("common.success");
        assert_eq!(msg, "操作成功");

        // 测试英文翻译
        set_locale("en");
        let msg = t("common.success");
        assert_eq!(msg, "Operation successful");

        // 恢复默认语言
        set_locale("zh-CN");
    }

    #[test]
    fn test_translate_missing_key_falls_back() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");
        assert_eq!(t_or("field.line_number", "line_number"), "生产线编号");
        assert_eq!(t_or("field.no_such_column", "no_such_column"), "no_such_column");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        // 测试中文翻译（带参数）
        set_locale("zh-CN");
        let msg = t_with_args(
            "error.duplicate_special_info",
            &[("code_type", "白车身码"), ("value", "AB12")],
        );
        assert!(msg.contains("\"AB12\""));
        assert!(msg.contains("在该生产线中已存在"));

        // 测试英文翻译（带参数）
        set_locale("en");
        let msg = t_with_args(
            "error.duplicate_special_info",
            &[("code_type", "White body code"), ("value", "AB12")],
        );
        assert!(msg.contains("\"AB12\""));
        assert!(msg.contains("already exists"));

        // 恢复默认语言
        set_locale("zh-CN");
    }
}
