//! 自动链接修饰
//!
//! 裸链接在新窗口打开并带 `rel="nofollow"`；链接文本后紧跟的非 URL 字符
//! （例如中文标点）移出链接，作为普通文本放在 `<a>` 之后。邮件链接不处理。

use crate::error::TreeResult;
use crate::fragment::Fragment;
use common::{escape_attr, escape_html};

/// 自动识别出的链接所允许的协议
const SCHEMES: &[&str] = &["http://", "https://", "ftp://"];

pub struct AutolinkFilter;

impl AutolinkFilter {
    fn is_url_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || "-._~:/?#[]@!$&'()*+,;=%|".contains(c)
    }

    /// 拆分为 URL 部分和其后的非 URL 文本
    pub fn split_trailing(text: &str) -> (&str, &str) {
        let end = text
            .char_indices()
            .find(|(_, c)| !Self::is_url_char(*c))
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        text.split_at(end)
    }

    /// 链接实际指向的地址，`www.` 开头的补上 `http://`
    fn target(link: &str) -> Option<String> {
        if link.starts_with("www.") {
            return Some(format!("http://{}", link));
        }
        SCHEMES
            .iter()
            .any(|scheme| link.starts_with(scheme) && link.len() > scheme.len())
            .then(|| link.to_string())
    }

    /// 修饰片段中的全部自动链接，返回处理的链接数
    pub fn apply(fragment: &mut Fragment) -> TreeResult<usize> {
        let mut decorated = 0;

        for id in fragment.elements_named("a")? {
            let Some(href) = fragment.attribute(id, "href").map(str::to_string) else {
                continue;
            };
            if href.starts_with("mailto:") {
                continue;
            }

            let children = fragment.child_ids(id);
            let [child] = children.as_slice() else {
                continue;
            };
            let Some(text) = fragment.text(*child) else {
                continue;
            };

            let (link, trailing) = Self::split_trailing(text);
            let Some(target) = Self::target(link) else {
                continue;
            };
            let is_autolink = if trailing.is_empty() {
                href == target
            } else {
                href.starts_with(&target) && href.len() > target.len()
            };
            if !is_autolink {
                continue;
            }

            let html = format!(
                r#"<a href="{}" rel="nofollow" target="_blank">{}</a>{}"#,
                escape_attr(&target),
                escape_html(link),
                escape_html(trailing)
            );
            fragment.replace_with_html(id, &html)?;
            decorated += 1;
        }

        log::debug!("autolink pass decorated {} links", decorated);
        Ok(decorated)
    }
}
