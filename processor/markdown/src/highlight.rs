//! 代码块语法高亮
//!
//! 高亮器本身通过 [`SyntaxHighlight`] 注入，默认实现基于 syntect，
//! 输出带 CSS class 的 `<span>`，不带内联样式。

use comrak::adapters::SyntaxHighlighterAdapter;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::{self, Write};
use std::sync::Mutex;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::error::{HighlightError, HighlightResult};
use common::{MentionTable, escape_attr};

/// 纯文本语言名，高亮失败时用它重试
pub const PLAIN_TEXT: &str = "text";

/// 语法高亮接口
pub trait SyntaxHighlight: Send + Sync {
    /// 返回高亮后的 HTML 片段（不含 `<pre>`/`<code>` 外层标签）
    fn highlight(&self, code: &str, lang: &str) -> HighlightResult<String>;
}

/// 按指定语言高亮，失败时以纯文本重试一次
pub fn highlight_with_fallback(
    highlighter: &dyn SyntaxHighlight,
    code: &str,
    lang: Option<&str>,
) -> HighlightResult<String> {
    let lang = lang
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(PLAIN_TEXT);

    match highlighter.highlight(code, lang) {
        Ok(html) => Ok(html),
        Err(e) if lang != PLAIN_TEXT => {
            log::debug!("Highlighting as {} failed ({}), retrying as plain text", lang, e);
            highlighter.highlight(code, PLAIN_TEXT)
        }
        Err(e) => Err(e),
    }
}

/// 基于 syntect 的高亮器
///
/// 语法集加载开销较大，应在启动时创建一次后共享。
pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntectHighlighter {
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
        }
    }

    fn find_syntax(&self, lang: &str) -> Option<&SyntaxReference> {
        match lang.to_ascii_lowercase().as_str() {
            PLAIN_TEXT | "plain" | "plaintext" | "txt" => Some(self.syntaxes.find_syntax_plain_text()),
            token => self
                .syntaxes
                .find_syntax_by_token(token)
                .or_else(|| self.syntaxes.find_syntax_by_name(lang)),
        }
    }
}

impl SyntaxHighlight for SyntectHighlighter {
    fn highlight(&self, code: &str, lang: &str) -> HighlightResult<String> {
        let syntax = self
            .find_syntax(lang)
            .ok_or_else(|| HighlightError::UnknownLanguage(lang.to_string()))?;

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, ClassStyle::Spaced);
        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|e| HighlightError::Highlight(e.to_string()))?;
        }

        Ok(generator.finalize())
    }
}

/// 把 [`SyntaxHighlight`] 接到 comrak 的代码块渲染上
///
/// 每次渲染创建一个，记录最后一次无法恢复的高亮错误。
/// 代码里的提及占位符在高亮前还原为 `@name`。
pub struct CodeBlockAdapter<'h> {
    highlighter: &'h dyn SyntaxHighlight,
    mentions: &'h MentionTable,
    error: Mutex<Option<HighlightError>>,
}

impl<'h> CodeBlockAdapter<'h> {
    pub fn new(highlighter: &'h dyn SyntaxHighlight, mentions: &'h MentionTable) -> Self {
        Self {
            highlighter,
            mentions,
            error: Mutex::new(None),
        }
    }

    /// 取出渲染过程中记录的高亮错误
    pub fn take_error(&self) -> Option<HighlightError> {
        self.error.lock().ok().and_then(|mut slot| slot.take())
    }
}

impl SyntaxHighlighterAdapter for CodeBlockAdapter<'_> {
    fn write_highlighted(
        &self,
        output: &mut dyn Write,
        lang: Option<&str>,
        code: &str,
    ) -> fmt::Result {
        let code = self.mentions.restore(code);
        match highlight_with_fallback(self.highlighter, &code, lang) {
            Ok(html) => output.write_str(&html),
            Err(e) => {
                log::warn!("Code block could not be highlighted: {}", e);
                if let Ok(mut slot) = self.error.lock() {
                    *slot = Some(e);
                }
                Err(fmt::Error)
            }
        }
    }

    fn write_pre_tag(
        &self,
        output: &mut dyn Write,
        _attributes: HashMap<&'static str, Cow<str>>,
    ) -> fmt::Result {
        output.write_str("<pre class=\"highlight\">")
    }

    fn write_code_tag(
        &self,
        output: &mut dyn Write,
        attributes: HashMap<&'static str, Cow<str>>,
    ) -> fmt::Result {
        match attributes.get("class") {
            Some(class) => write!(output, "<code class=\"{}\">", escape_attr(class)),
            None => output.write_str("<code>"),
        }
    }
}
