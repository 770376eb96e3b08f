// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持英文（默认）、意大利文和中文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 支持的语言
pub const SUPPORTED_LOCALES: &[&str] = &["en", "it", "zh-CN"];

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"en"、"it" 或 "zh-CN"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 是否为支持的语言
pub fn is_supported(locale: &str) -> bool {
    SUPPORTED_LOCALES.contains(&locale)
}

/// 翻译消息（当前语言，无参数）
///
/// # 示例
/// ```no_run
/// use admissible_tracks::i18n::t;
/// let msg = t("justification.fallback");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（当前语言，带参数）
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    substitute(rust_i18n::t!(key).to_string(), args)
}

/// 翻译消息（指定语言，带参数）
///
/// 不读写全局语言状态，供说明生成等纯函数使用
///
/// # 示例
/// ```no_run
/// use admissible_tracks::i18n::t_in;
/// let msg = t_in("it", "justification.capacity", &[("capacity", "400"), ("train", "250")]);
/// ```
pub fn t_in(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    substitute(rust_i18n::t!(key, locale = locale).to_string(), args)
}

fn substitute(mut message: String, args: &[(&str, &str)]) -> String {
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        message = message.replace(&placeholder, v);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // rust-i18n 的 locale 为全局状态，且 Rust 测试默认并行执行；
    // 为避免测试互相干扰，这里对 i18n 相关测试串行化。
    static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("it");
        assert_eq!(current_locale(), "it");

        set_locale("en");
        assert_eq!(current_locale(), "en");
    }

    #[test]
    fn test_translate_current_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        assert_eq!(t("justification.fallback"), "Meets all configured constraints.");

        let msg = t_with_args("justification.distance", &[("distance", "3")]);
        assert_eq!(msg, "3 ordinals away from the planned track.");
    }

    #[test]
    fn test_translate_explicit_locale() {
        let msg = t_in(
            "it",
            "justification.platform_length",
            &[("platform", "300"), ("train", "250")],
        );
        assert!(msg.contains("300"));
        assert!(msg.contains("250"));
        assert!(msg.contains("Marciapiede"));

        let msg = t_in("zh-CN", "justification.adjacent", &[]);
        assert!(msg.contains("相邻"));
    }

    #[test]
    fn test_supported_locales() {
        assert!(is_supported("zh-CN"));
        assert!(!is_supported("fr"));
    }
}
