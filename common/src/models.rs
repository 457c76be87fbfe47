use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

use crate::PLACEHOLDER_PREFIX;

/// 占位符：与提及相同的边界，后跟 `@user<序号>`
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?m)(^|[^a-zA-Z0-9_!#$%&*@＠])@({}[0-9]{{1,6}})",
        PLACEHOLDER_PREFIX
    ))
    .expect("Invalid placeholder regex pattern")
});

/// 匹配 `@user<序号>` 占位符，第 1 组为边界字符，第 2 组为 `user<序号>`
pub fn placeholder_regex() -> &'static Regex {
    &PLACEHOLDER_REGEX
}

/// 提及表
///
/// 每一次出现的 `@name` 对应一条记录，按从左到右的扫描顺序排列。
/// 序号从 1 开始且连续；同一个名字多次出现会产生多条记录。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentionTable {
    names: Vec<String>,
}

impl MentionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条记录并返回它的序号（从 1 开始）
    pub fn push(&mut self, name: impl Into<String>) -> usize {
        self.names.push(name.into());
        self.names.len()
    }

    /// 按序号（从 1 开始）取出名字
    pub fn get(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.names.get(i))
            .map(String::as_str)
    }

    /// 占位符（`user<序号>`）对应的用户名，序号越界时返回占位符本身
    pub fn resolve<'a>(&'a self, placeholder: &'a str) -> &'a str {
        placeholder
            .strip_prefix(PLACEHOLDER_PREFIX)
            .and_then(|digits| digits.parse::<usize>().ok())
            .and_then(|index| self.get(index))
            .unwrap_or(placeholder)
    }

    /// 把文本中的 `@user<序号>` 还原为 `@name`，不加任何标记
    pub fn restore<'a>(&self, text: &'a str) -> Cow<'a, str> {
        PLACEHOLDER_REGEX.replace_all(text, |caps: &Captures| {
            format!("{}@{}", &caps[1], self.resolve(&caps[2]))
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// 去重后的名字列表，保持首次出现的顺序
    pub fn unique_names(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.iter().filter(|name| seen.insert(*name)).collect()
    }
}
