//! 帖子正文渲染
//!
//! 把用户输入的富文本（Markdown 加少量 BBCode、`@提及`、`#楼层`、`:表情:`）
//! 转换为可以直接嵌入页面的 HTML 片段。步骤顺序固定：
//!
//! 1. `[img]` 转 Markdown 图片
//! 2. `@name` 替换为占位符
//! 3. 围栏代码块前补空行
//! 4. Markdown 渲染（含代码高亮）
//! 5. 解析 HTML 片段，依次处理自动链接、楼层、提及、表情
//!
//! 任何一步失败都会记录日志并原样返回输入。

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use common::{MentionTable, Settings};
use processor_markdown::{ComrakRenderer, MarkdownRenderer, RenderOptions, SyntectHighlighter};
use processor_text::{BBCodeImageNormalizer, CodeFenceNormalizer, MentionTokenizer};
use processor_tree::{
    AutolinkFilter, EmojiRegistry, EmojiReplacer, FloorMentionLinker, Fragment, UserMentionLinker,
    walk,
};

pub mod error;

pub use error::{PipelineError, PipelineResult};

/// 启动时构建、之后只读的共享配置
pub struct PipelineConfig {
    pub emojis: EmojiRegistry,
    pub renderer: Box<dyn MarkdownRenderer>,
}

impl PipelineConfig {
    pub fn new(emojis: EmojiRegistry, renderer: Box<dyn MarkdownRenderer>) -> Self {
        Self { emojis, renderer }
    }

    pub fn from_settings(settings: &Settings, options: RenderOptions) -> Self {
        let highlighter = Arc::new(SyntectHighlighter::new());
        Self::new(
            EmojiRegistry::from_settings(settings),
            Box::new(ComrakRenderer::new(options, highlighter)),
        )
    }
}

/// 渲染结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    /// 正文中提到的用户，回退为原始输入时为空
    pub mentions: MentionTable,
}

impl Rendered {
    fn raw(raw: &str) -> Self {
        Self {
            html: raw.to_string(),
            mentions: MentionTable::new(),
        }
    }
}

/// 富文本渲染流水线
///
/// 每次调用都有自己的提及表和 HTML 树，克隆只复制 `Arc`，
/// 可以在任意多个线程中同时使用。
#[derive(Clone)]
pub struct RichTextPipeline {
    config: Arc<PipelineConfig>,
}

impl RichTextPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// 帖子正文：开启删除线，所有标题统一为 `<h4>`
    pub fn topic(settings: &Settings) -> Self {
        Self::new(PipelineConfig::from_settings(settings, RenderOptions::topic()))
    }

    pub fn generic(settings: &Settings) -> Self {
        Self::new(PipelineConfig::from_settings(settings, RenderOptions::generic()))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// 渲染为 HTML，失败时原样返回输入
    pub fn convert(&self, raw: &str) -> String {
        self.render(raw).html
    }

    /// 渲染为 HTML 并返回提及表，失败时原样返回输入
    pub fn render(&self, raw: &str) -> Rendered {
        match panic::catch_unwind(AssertUnwindSafe(|| self.try_render(raw))) {
            Ok(Ok(rendered)) => rendered,
            Ok(Err(e)) => {
                log::error!(
                    "Failed to render content with {}, falling back to raw input: {}",
                    self.config.renderer.name(),
                    e
                );
                Rendered::raw(raw)
            }
            Err(payload) => {
                let e = PipelineError::Panicked(panic_message(payload.as_ref()));
                log::error!("Rendering panicked, falling back to raw input: {}", e);
                Rendered::raw(raw)
            }
        }
    }

    /// 依次执行全部步骤，错误向外返回
    pub fn try_render(&self, raw: &str) -> PipelineResult<Rendered> {
        if raw.trim().is_empty() {
            return Ok(Rendered::default());
        }

        let text = BBCodeImageNormalizer::normalize(raw);
        let (text, mentions) = MentionTokenizer::tokenize(&text);
        let text = CodeFenceNormalizer::normalize(&text);

        let html = self.config.renderer.render(&text, &mentions)?;

        let mut fragment = Fragment::parse(&html)?;
        AutolinkFilter::apply(&mut fragment)?;
        walk(&mut fragment, &FloorMentionLinker)?;

        let linker = UserMentionLinker::new(&mentions);
        linker.restore_attributes(&mut fragment)?;
        walk(&mut fragment, &linker)?;

        walk(&mut fragment, &EmojiReplacer::new(&self.config.emojis))?;

        let html = fragment.serialize()?.trim().to_string();
        log::debug!(
            "Rendered {} bytes into {} bytes with {} mentions",
            raw.len(),
            html.len(),
            mentions.len()
        );
        Ok(Rendered { html, mentions })
    }

    /// 在 tokio 的阻塞线程池上并发渲染多段输入，结果顺序与输入一致
    pub async fn convert_batch(&self, inputs: Vec<String>) -> Vec<String> {
        let handles: Vec<_> = inputs
            .into_iter()
            .map(|raw| {
                let pipeline = self.clone();
                let fallback = raw.clone();
                let handle = tokio::task::spawn_blocking(move || pipeline.convert(&raw));
                (fallback, handle)
            })
            .collect();

        let mut outputs = Vec::with_capacity(handles.len());
        for (fallback, handle) in handles {
            match handle.await {
                Ok(html) => outputs.push(html),
                Err(e) => {
                    log::error!("Render task failed: {}", e);
                    outputs.push(fallback);
                }
            }
        }
        outputs
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|msg| msg.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
