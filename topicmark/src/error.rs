//! 渲染流水线错误类型定义

use processor_markdown::RenderError;
use processor_tree::TreeError;

/// 渲染流水线错误
///
/// 只在 [`crate::RichTextPipeline::try_render`] 中向外返回，
/// `convert`/`render` 遇到任何错误都会回退为原始输入。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Markdown 渲染失败
    Render(RenderError),
    /// HTML 片段处理失败
    Tree(TreeError),
    /// 某个处理步骤发生 panic
    Panicked(String),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(e) => write!(f, "{}", e),
            Self::Tree(e) => write!(f, "{}", e),
            Self::Panicked(msg) => write!(f, "处理过程中发生 panic: {}", msg),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(e) => Some(e),
            Self::Tree(e) => Some(e),
            Self::Panicked(_) => None,
        }
    }
}

impl From<RenderError> for PipelineError {
    fn from(error: RenderError) -> Self {
        Self::Render(error)
    }
}

impl From<TreeError> for PipelineError {
    fn from(error: TreeError) -> Self {
        Self::Tree(error)
    }
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
