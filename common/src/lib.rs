//! 共用工具函数库
//!
//! 这个模块包含了整个workspace中各处理阶段都会用到的类型和工具函数。
pub mod models;
pub mod settings;
pub use models::*;
pub use settings::Settings;

/// 提及占位符前缀，`@user<序号>` 只包含 ASCII 单词字符，可以原样穿过 Markdown 渲染
pub const PLACEHOLDER_PREFIX: &str = "user";
/// 表情图片所在目录（相对于上传地址）
pub const EMOJI_ASSET_DIR: &str = "/assets/emojis";
/// 表情图片扩展名
pub const EMOJI_EXTENSION: &str = "png";

/// 获取环境变量的值
pub fn get_env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// 转义 HTML 特殊字符，用于文本节点内容
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// 转义 HTML 属性值（额外处理双引号）
pub fn escape_attr(text: &str) -> String {
    escape_html(text).replace('"', "&quot;")
}

/// 拼接基础地址与路径，避免斜杠重复
pub fn join_base(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
