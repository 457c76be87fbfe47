//! 渲染后的 HTML 片段处理模块
//!
//! Markdown 渲染完成后，在解析出的 HTML 树上依次执行：
//!
//! - [`autolink`] - 自动链接加 `nofollow`，并移出链接末尾的非 URL 文本
//! - [`floor`] - `#12楼` 楼层引用
//! - [`mention`] - 还原 `@user<序号>` 占位符为用户链接
//! - [`emoji`] - `:shortcode:` 表情
//!
//! 后三个步骤都基于 [`walker`] 的文本节点遍历，`<pre>`/`<code>` 和已有 `<a>` 内的文本不会被加上链接。

pub mod autolink;
pub mod emoji;
pub mod error;
pub mod floor;
pub mod fragment;
pub mod mention;
pub mod walker;
mod tests;

pub use autolink::AutolinkFilter;
pub use emoji::{EmojiRegistry, EmojiReplacer};
pub use error::{TreeError, TreeResult};
pub use floor::FloorMentionLinker;
pub use fragment::{EXCLUSION_TAGS, Fragment, LINK_TAGS};
pub use mention::UserMentionLinker;
pub use walker::{TextNodePass, walk};
