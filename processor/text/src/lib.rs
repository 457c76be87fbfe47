//! 渲染前的文本处理模块
//!
//! 在交给 Markdown 渲染器之前，对用户输入做纯文本层面的改写。
//! 三个步骤必须按顺序执行：
//!
//! - [`bbcode`] - 把 `[img]URL[/img]` 转成 Markdown 图片语法
//! - [`mention`] - 把 `@name` 替换为占位符并记录到提及表
//! - [`fence`] - 保证围栏代码块前有空行

pub mod bbcode;
pub mod fence;
pub mod mention;

pub use bbcode::BBCodeImageNormalizer;
pub use fence::CodeFenceNormalizer;
pub use mention::MentionTokenizer;
