//! Markdown 渲染模块
//!
//! 对 comrak 的一层封装。渲染行为由 [`RenderOptions`] 描述，
//! 代码块高亮和标题级别通过 comrak 的插件接口注入，而不是继承渲染器。
//!
//! # 模块结构
//!
//! - [`error`] - 错误类型定义
//! - [`heading`] - 固定级别的标题输出
//! - [`highlight`] - 代码块高亮及纯文本重试

use common::MentionTable;
use comrak::options::Plugins;
use comrak::{Arena, Options, format_html_with_plugins, parse_document};
use std::sync::Arc;

pub mod error;
pub mod heading;
pub mod highlight;

pub use error::{HighlightError, HighlightResult, RenderError, RenderResult};
pub use heading::FixedHeading;
pub use highlight::{
    CodeBlockAdapter, PLAIN_TEXT, SyntaxHighlight, SyntectHighlighter, highlight_with_fallback,
};

/// 帖子正文中所有标题统一使用的级别
pub const TOPIC_HEADING_LEVEL: u8 = 4;

/// Markdown 渲染接口
///
/// 实现必须是无状态的，或者每次调用内部自行创建状态，
/// 这样同一个实例才能被多个线程同时使用。
pub trait MarkdownRenderer: Send + Sync {
    /// 把 Markdown 文本渲染成 HTML 片段
    ///
    /// 代码块在高亮之前按 `mentions` 把 `@user<序号>` 还原为 `@name`，
    /// 高亮器会把 `@` 和名字拆进不同的 `<span>`，渲染后就无法再还原。
    fn render(&self, text: &str, mentions: &MentionTable) -> RenderResult<String>;

    /// 渲染器名称
    fn name(&self) -> &'static str;
}

/// 渲染选项
///
/// 围栏代码块始终开启，原始 HTML 始终被转义。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// 自动识别裸链接
    pub autolink: bool,
    /// 单个换行输出为 `<br>`
    pub hard_wrap: bool,
    /// `~~删除线~~`
    pub strikethrough: bool,
    /// 强制所有标题使用同一级别
    pub heading_level: Option<u8>,
}

impl RenderOptions {
    /// 通用渲染配置
    pub const fn generic() -> Self {
        Self {
            autolink: true,
            hard_wrap: true,
            strikethrough: false,
            heading_level: None,
        }
    }

    /// 帖子正文渲染配置
    pub const fn topic() -> Self {
        Self {
            autolink: true,
            hard_wrap: true,
            strikethrough: true,
            heading_level: Some(TOPIC_HEADING_LEVEL),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::generic()
    }
}

/// 基于 comrak 的渲染器
pub struct ComrakRenderer {
    options: RenderOptions,
    highlighter: Arc<dyn SyntaxHighlight>,
}

impl ComrakRenderer {
    pub fn new(options: RenderOptions, highlighter: Arc<dyn SyntaxHighlight>) -> Self {
        Self {
            options,
            highlighter,
        }
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    fn comrak_options(&self) -> Options<'static> {
        let mut options = Options::default();
        options.extension.autolink = self.options.autolink;
        options.extension.strikethrough = self.options.strikethrough;
        options.render.hardbreaks = self.options.hard_wrap;
        // 原始 HTML 一律转义输出，不允许透传
        options.render.escape = true;
        options
    }
}

impl MarkdownRenderer for ComrakRenderer {
    fn render(&self, text: &str, mentions: &MentionTable) -> RenderResult<String> {
        let options = self.comrak_options();
        let code_blocks = CodeBlockAdapter::new(self.highlighter.as_ref(), mentions);
        let heading = self.options.heading_level.map(FixedHeading::new);

        let mut plugins = Plugins::default();
        plugins.render.codefence_syntax_highlighter = Some(&code_blocks);
        if let Some(heading) = heading.as_ref() {
            plugins.render.heading_adapter = Some(heading);
        }

        let arena = Arena::new();
        let root = parse_document(&arena, text, &options);

        let mut html = String::new();
        if let Err(e) = format_html_with_plugins(root, &options, &mut html, &plugins) {
            return Err(match code_blocks.take_error() {
                Some(highlight_error) => RenderError::Highlight(highlight_error),
                None => e.into(),
            });
        }

        log::trace!("Rendered {} bytes of markdown into {} bytes of HTML", text.len(), html.len());
        Ok(html)
    }

    fn name(&self) -> &'static str {
        "comrak"
    }
}
