//! 用户提及占位

use common::{MentionTable, PLACEHOLDER_PREFIX};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// 提及边界：行首，或除标识符字符、`!#$%&*`、`@` 和全角 `＠` 以外的任意字符
static MENTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(^|[^a-zA-Z0-9_!#$%&*@＠])@([a-zA-Z0-9_]{1,20})")
        .expect("Invalid mention regex pattern")
});

/// 提及分词器
///
/// Markdown 渲染器会把 `@some_name` 里的下划线当作强调标记，
/// 所以在渲染前把每个提及替换成 `@user<序号>`，渲染后再按提及表还原。
pub struct MentionTokenizer;

impl MentionTokenizer {
    /// 返回替换后的文本和提及表
    pub fn tokenize(text: &str) -> (String, MentionTable) {
        let mut table = MentionTable::new();

        let normalized = MENTION_REGEX
            .replace_all(text, |caps: &Captures| {
                let index = table.push(&caps[2]);
                format!("{}@{}{}", &caps[1], PLACEHOLDER_PREFIX, index)
            })
            .into_owned();

        if !table.is_empty() {
            log::trace!("Tokenized {} mentions", table.len());
        }

        (normalized, table)
    }
}
