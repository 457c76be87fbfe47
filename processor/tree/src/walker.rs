//! 跳过代码区域的文本节点遍历
//!
//! 三个后处理步骤（楼层、用户、表情）都只改写文本节点，且都要避开
//! `<pre>`/`<code>`，所以共用同一套遍历逻辑，差别只在正则和替换函数。
//! 会生成 `<a>` 的步骤还要避开已有的链接。

use regex::{Captures, Regex};

use crate::error::TreeResult;
use crate::fragment::Fragment;

/// 作用于文本节点的改写步骤
pub trait TextNodePass {
    /// 获取编译好的正则表达式
    fn regex(&self) -> &Regex;

    /// 文本中不含该字符时直接跳过
    fn trigger(&self) -> char;

    /// 代码区域外的替换结果（HTML）
    fn substitute(&self, captures: &Captures<'_>) -> String;

    /// 是否也改写代码区域内的文本
    fn rewrites_code(&self) -> bool {
        false
    }

    /// 替换结果是否包含 `<a>`，是则不在已有链接内替换
    fn emits_links(&self) -> bool {
        false
    }

    /// 代码区域（以及 [`emits_links`](Self::emits_links) 时的已有链接）内的替换结果，默认保持原文
    fn substitute_in_code(&self, captures: &Captures<'_>) -> String {
        captures[0].to_string()
    }

    /// 获取步骤名称
    fn name(&self) -> &'static str;
}

/// 按文档顺序改写每个文本节点，返回被替换的节点数
pub fn walk(fragment: &mut Fragment, pass: &dyn TextNodePass) -> TreeResult<usize> {
    let mut replaced = 0;

    for id in fragment.text_nodes()? {
        let Some(content) = fragment.serialized_text(id) else {
            continue;
        };
        if !content.contains(pass.trigger()) {
            continue;
        }

        // `<a>` 不能嵌套，链接内的文本按代码区域处理
        let protected =
            fragment.in_exclusion_zone(id) || (pass.emits_links() && fragment.in_link(id));
        if protected && !pass.rewrites_code() {
            continue;
        }

        let html = pass.regex().replace_all(&content, |caps: &Captures| {
            if protected {
                pass.substitute_in_code(caps)
            } else {
                pass.substitute(caps)
            }
        });
        if html == content.as_str() {
            continue;
        }

        log::trace!("{}: {:?} -> {:?}", pass.name(), content, html);
        fragment.replace_with_html(id, &html)?;
        replaced += 1;
    }

    log::debug!("{} pass rewrote {} text nodes", pass.name(), replaced);
    Ok(replaced)
}
