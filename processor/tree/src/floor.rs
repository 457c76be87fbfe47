use regex::{Captures, Regex};
use std::sync::OnceLock;

use crate::walker::TextNodePass;

static FLOOR_REGEX: OnceLock<Regex> = OnceLock::new();

/// 楼层引用：`#12楼`、`#12樓`、`#12F`、`#12f`
///
/// 链接到页面内的 `#reply<楼层>` 锚点，代码区域和已有链接内保持原文。
pub struct FloorMentionLinker;

impl FloorMentionLinker {
    const PATTERN: &'static str = r"#([0-9]+)([楼樓Ff])";
}

impl TextNodePass for FloorMentionLinker {
    fn regex(&self) -> &Regex {
        FLOOR_REGEX.get_or_init(|| Regex::new(Self::PATTERN).expect("Invalid floor regex pattern"))
    }

    fn trigger(&self) -> char {
        '#'
    }

    fn substitute(&self, captures: &Captures<'_>) -> String {
        let floor = &captures[1];
        let suffix = &captures[2];
        format!(
            r##"<a href="#reply{floor}" class="at_floor" data-floor="{floor}">#{floor}{suffix}</a>"##
        )
    }

    fn emits_links(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "floor"
    }
}
