//! 围栏代码块前补空行
//!
//! 紧跟在普通文本行之后的 ```` ``` ```` 会被部分渲染器当成段落的一部分，
//! 这里在每个开始围栏前补一个空行。结束围栏和代码块内部不做改动，
//! 因此重复执行的结果与执行一次相同。

/// 围栏代码块规范化
pub struct CodeFenceNormalizer;

impl CodeFenceNormalizer {
    pub fn normalize(text: &str) -> String {
        let mut result = String::with_capacity(text.len() + 8);
        // 当前所在代码块的开始围栏
        let mut open_fence: Option<&str> = None;
        // 文本开头视为空行
        let mut previous_blank = true;

        for line in text.split_inclusive('\n') {
            let content = line.trim_end_matches(['\n', '\r']);

            match open_fence {
                None => {
                    if let Some(marker) = Self::fence_marker(content) {
                        if !previous_blank {
                            result.push('\n');
                        }
                        open_fence = Some(marker);
                    }
                }
                Some(marker) => {
                    if Self::is_closing_fence(content, marker) {
                        open_fence = None;
                    }
                }
            }

            result.push_str(line);
            previous_blank = content.trim().is_empty();
        }

        result
    }

    /// 行首连续三个及以上的 `` ` `` 或 `~`
    fn fence_marker(line: &str) -> Option<&str> {
        let fence_char = line.chars().next().filter(|c| matches!(c, '`' | '~'))?;
        let len = line.chars().take_while(|&c| c == fence_char).count();
        (len >= 3).then(|| &line[..len])
    }

    fn is_closing_fence(line: &str, marker: &str) -> bool {
        let trimmed = line.trim_end();
        let Some(fence_char) = marker.chars().next() else {
            return false;
        };
        trimmed.len() >= marker.len() && trimmed.chars().all(|c| c == fence_char)
    }
}
