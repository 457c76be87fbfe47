//! Markdown 渲染错误类型定义

/// 代码高亮错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightError {
    /// 不认识的语言
    UnknownLanguage(String),
    /// 高亮过程出错
    Highlight(String),
}

impl std::fmt::Display for HighlightError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLanguage(lang) => write!(f, "不支持的语言: {}", lang),
            Self::Highlight(msg) => write!(f, "代码高亮失败: {}", msg),
        }
    }
}

impl std::error::Error for HighlightError {}

/// Markdown 渲染错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// 输出 HTML 时出错
    Format(String),
    /// 纯文本重试之后仍然无法高亮
    Highlight(HighlightError),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format(msg) => write!(f, "渲染 HTML 失败: {}", msg),
            Self::Highlight(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<HighlightError> for RenderError {
    fn from(error: HighlightError) -> Self {
        Self::Highlight(error)
    }
}

impl From<std::fmt::Error> for RenderError {
    fn from(error: std::fmt::Error) -> Self {
        Self::Format(error.to_string())
    }
}

pub type HighlightResult<T> = std::result::Result<T, HighlightError>;
pub type RenderResult<T> = std::result::Result<T, RenderError>;
