use regex::{Captures, Regex};
use std::borrow::Cow;

use crate::error::TreeResult;
use crate::fragment::Fragment;
use crate::walker::TextNodePass;
use common::{MentionTable, escape_attr, placeholder_regex};

/// 可能被渲染器带入占位符的属性（`class` 来自代码块的语言名）
const PLACEHOLDER_ATTRIBUTES: &[&str] = &["href", "src", "title", "alt", "class"];
/// 需要检查属性的元素
const PLACEHOLDER_ELEMENTS: &[&str] = &["a", "img", "code"];

/// 把 `@user<序号>` 占位符还原为用户链接
///
/// 序号越界时直接显示占位符文本本身。代码区域和已有链接内只还原为 `@name`，不加链接。
pub struct UserMentionLinker<'t> {
    mentions: &'t MentionTable,
}

impl<'t> UserMentionLinker<'t> {
    pub fn new(mentions: &'t MentionTable) -> Self {
        Self { mentions }
    }

    /// 占位符对应的用户名
    pub fn resolve<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.mentions.resolve(placeholder)
    }

    /// 还原 `<a>`/`<img>`/`<code>` 属性中的占位符，返回改动的元素数
    pub fn restore_attributes(&self, fragment: &mut Fragment) -> TreeResult<usize> {
        let mut restored = 0;

        for tag in PLACEHOLDER_ELEMENTS {
            for id in fragment.elements_named(tag)? {
                let attributes = fragment.attributes(id);
                let carries_placeholder = attributes.iter().any(|(name, value)| {
                    PLACEHOLDER_ATTRIBUTES.contains(&name.as_str()) && self.regex().is_match(value)
                });
                if !carries_placeholder {
                    continue;
                }

                let rebuilt: String = attributes
                    .iter()
                    .map(|(name, value)| {
                        let value = if PLACEHOLDER_ATTRIBUTES.contains(&name.as_str()) {
                            self.mentions.restore(value)
                        } else {
                            Cow::Borrowed(value.as_str())
                        };
                        format!(" {}=\"{}\"", name, escape_attr(&value))
                    })
                    .collect();

                fragment.replace_element(id, &format!("<{}{}>", tag, rebuilt))?;
                restored += 1;
            }
        }

        if restored > 0 {
            log::debug!("Restored mention placeholders in {} element attributes", restored);
        }
        Ok(restored)
    }
}

impl TextNodePass for UserMentionLinker<'_> {
    fn regex(&self) -> &Regex {
        placeholder_regex()
    }

    fn trigger(&self) -> char {
        '@'
    }

    fn substitute(&self, captures: &Captures<'_>) -> String {
        let name = self.resolve(&captures[2]);
        format!(
            r#"{}<a href="/{name}" class="at_user" title="@{name}"><i>@</i>{name}</a>"#,
            &captures[1]
        )
    }

    fn rewrites_code(&self) -> bool {
        true
    }

    fn emits_links(&self) -> bool {
        true
    }

    fn substitute_in_code(&self, captures: &Captures<'_>) -> String {
        format!("{}@{}", &captures[1], self.resolve(&captures[2]))
    }

    fn name(&self) -> &'static str {
        "mention"
    }
}
