//! HTML 片段处理错误类型定义

/// HTML 片段处理错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// 解析结果中没有根元素
    MissingRoot,
    /// 节点在修改过程中丢失
    NodeNotFound,
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRoot => write!(f, "解析 HTML 片段失败: 缺少根元素"),
            Self::NodeNotFound => write!(f, "修改 HTML 片段失败: 节点不存在"),
        }
    }
}

impl std::error::Error for TreeError {}

pub type TreeResult<T> = std::result::Result<T, TreeError>;
