//! HTML 片段树
//!
//! 对 scraper 解析结果的一层包装，提供各个后处理步骤需要的少量操作：
//! 按文档顺序列出节点、判断祖先、用一段新 HTML 替换节点、序列化。

use ego_tree::{NodeId, NodeMut, NodeRef};
use scraper::{ElementRef, Html, Node};

use crate::error::{TreeError, TreeResult};
use common::escape_html;

/// 代码区域：祖先中含有这些元素的节点视为代码
pub const EXCLUSION_TAGS: &[&str] = &["pre", "code"];
/// 链接元素，其中不能再插入链接
pub const LINK_TAGS: &[&str] = &["a"];

/// 可修改的 HTML 片段
pub struct Fragment {
    html: Html,
}

impl Fragment {
    pub fn parse(source: &str) -> TreeResult<Self> {
        let html = Html::parse_fragment(source);
        if !html.errors.is_empty() {
            log::trace!("HTML fragment parsed with {} recoverable errors", html.errors.len());
        }

        let fragment = Self { html };
        fragment.root()?;
        Ok(fragment)
    }

    fn root(&self) -> TreeResult<NodeRef<'_, Node>> {
        root_element(&self.html)
    }

    /// 按文档顺序列出所有文本节点
    pub fn text_nodes(&self) -> TreeResult<Vec<NodeId>> {
        Ok(self
            .root()?
            .descendants()
            .filter(|node| node.value().is_text())
            .map(|node| node.id())
            .collect())
    }

    /// 按文档顺序列出指定名称的元素
    pub fn elements_named(&self, name: &str) -> TreeResult<Vec<NodeId>> {
        Ok(self
            .root()?
            .descendants()
            .filter(|node| node.value().as_element().is_some_and(|e| e.name() == name))
            .map(|node| node.id())
            .collect())
    }

    /// 任一祖先元素名在 `tags` 中
    pub fn has_ancestor(&self, id: NodeId, tags: &[&str]) -> bool {
        self.html.tree.get(id).is_some_and(|node| {
            node.ancestors()
                .filter_map(|ancestor| ancestor.value().as_element())
                .any(|element| tags.contains(&element.name()))
        })
    }

    /// 节点是否位于 `<pre>`/`<code>` 内
    pub fn in_exclusion_zone(&self, id: NodeId) -> bool {
        self.has_ancestor(id, EXCLUSION_TAGS)
    }

    /// 节点是否位于 `<a>` 内
    pub fn in_link(&self, id: NodeId) -> bool {
        self.has_ancestor(id, LINK_TAGS)
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.html.tree.get(id)?.value().as_text().map(|text| &**text)
    }

    /// 文本节点序列化后的形式
    pub fn serialized_text(&self, id: NodeId) -> Option<String> {
        self.text(id).map(escape_html)
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.html.tree.get(id)?.value().as_element()?.attr(name)
    }

    pub fn attributes(&self, id: NodeId) -> Vec<(String, String)> {
        self.html
            .tree
            .get(id)
            .and_then(|node| node.value().as_element())
            .map(|element| {
                element
                    .attrs()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.html
            .tree
            .get(id)
            .map(|node| node.children().map(|child| child.id()).collect())
            .unwrap_or_default()
    }

    /// 用解析后的 `html` 替换节点（连同其子树）
    pub fn replace_with_html(&mut self, id: NodeId, html: &str) -> TreeResult<()> {
        let replacement = Html::parse_fragment(html);
        let source = root_element(&replacement)?;

        let mut target = self.html.tree.get_mut(id).ok_or(TreeError::NodeNotFound)?;
        for child in source.children() {
            let mut inserted = target.insert_before(child.value().clone());
            graft_children(&mut inserted, child);
        }
        target.detach();
        Ok(())
    }

    /// 用 `html` 中第一个元素替换节点自身（保留原有子节点）
    pub fn replace_element(&mut self, id: NodeId, html: &str) -> TreeResult<()> {
        let replacement = Html::parse_fragment(html);
        let element = root_element(&replacement)?
            .children()
            .find(|child| child.value().is_element())
            .ok_or(TreeError::MissingRoot)?
            .value()
            .clone();

        let mut target = self.html.tree.get_mut(id).ok_or(TreeError::NodeNotFound)?;
        *target.value() = element;
        Ok(())
    }

    pub fn serialize(&self) -> TreeResult<String> {
        ElementRef::wrap(self.root()?)
            .map(|root| root.inner_html())
            .ok_or(TreeError::MissingRoot)
    }
}

/// 片段解析后位于文档根下的 `<html>` 元素
fn root_element(html: &Html) -> TreeResult<NodeRef<'_, Node>> {
    html.tree
        .root()
        .children()
        .find(|child| child.value().is_element())
        .ok_or(TreeError::MissingRoot)
}

/// 把另一棵树中 `source` 的子节点逐个复制到 `parent` 下
fn graft_children(parent: &mut NodeMut<'_, Node>, source: NodeRef<'_, Node>) {
    for child in source.children() {
        let mut appended = parent.append(child.value().clone());
        graft_children(&mut appended, child);
    }
}
