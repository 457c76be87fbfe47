use comrak::adapters::{HeadingAdapter, HeadingMeta};
use comrak::nodes::Sourcepos;
use std::fmt::{self, Write};

/// 不论源文本里是几级标题，都输出同一级 `<hN>`
#[derive(Debug, Clone, Copy)]
pub struct FixedHeading {
    level: u8,
}

impl FixedHeading {
    /// 级别会被限制在 1..=6
    pub fn new(level: u8) -> Self {
        Self {
            level: level.clamp(1, 6),
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }
}

impl HeadingAdapter for FixedHeading {
    fn enter(
        &self,
        output: &mut dyn Write,
        _heading: &HeadingMeta,
        _sourcepos: Option<Sourcepos>,
    ) -> fmt::Result {
        write!(output, "<h{}>", self.level)
    }

    fn exit(&self, output: &mut dyn Write, _heading: &HeadingMeta) -> fmt::Result {
        write!(output, "</h{}>", self.level)
    }
}
