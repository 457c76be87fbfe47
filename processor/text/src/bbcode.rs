//! BBCode 图片标签转换
//!
//! 论坛老帖子里常见 `[img]URL[/img]`，这里统一转成 `![Alt](URL)`，
//! 交给 Markdown 渲染器生成 `<img>`。

use regex::{Captures, Regex};
use std::sync::LazyLock;

static IMG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[img\](.+?)\[/img\]").expect("Invalid img regex pattern"));

/// BBCode 图片标签转换器
pub struct BBCodeImageNormalizer;

impl BBCodeImageNormalizer {
    /// 把所有 `[img]URL[/img]` 改写为 Markdown 图片语法，其余文本不变
    pub fn normalize(text: &str) -> String {
        IMG_REGEX
            .replace_all(text, |caps: &Captures| {
                let src = &caps[1];
                format!("![{}]({})", Self::image_alt(src), src)
            })
            .into_owned()
    }

    /// 取 URL 最后一段路径，去掉扩展名，首字母大写、其余小写
    pub fn image_alt(src: &str) -> String {
        let file_name = src.rsplit('/').next().unwrap_or(src);
        let stem = match file_name.rfind('.') {
            Some(dot) if dot > 0 => &file_name[..dot],
            _ => file_name,
        };
        // 方括号会提前结束 Markdown 的 alt 文本
        let stem: String = stem.chars().filter(|c| !matches!(c, '[' | ']')).collect();

        let mut chars = stem.chars();
        match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
            None => String::new(),
        }
    }
}
