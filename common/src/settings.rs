//! 启动时加载、之后不再变化的配置

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::path::Path;
use url::Url;

use crate::get_env_var;

/// 渲染配置
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// 表情图片的基础地址，为空时生成站内相对路径
    pub upload_url: String,
    /// 在内置 gemoji 之外额外注册的表情短码
    pub extra_emojis: Vec<String>,
}

impl Settings {
    /// 从环境变量读取配置（`UPLOAD_URL`、`EXTRA_EMOJIS`）
    pub fn from_env() -> Result<Self> {
        let upload_url = get_env_var("UPLOAD_URL").unwrap_or_default();
        let extra_emojis = get_env_var("EXTRA_EMOJIS")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            upload_url,
            extra_emojis,
        }
        .validated()
    }

    /// 从 JSON 文件读取配置
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(raw)?;
        settings.validated()
    }

    /// 校验上传地址并去掉末尾斜杠
    fn validated(mut self) -> Result<Self> {
        let trimmed = self.upload_url.trim().trim_end_matches('/');
        if !trimmed.is_empty() {
            Url::parse(trimmed)
                .map_err(|e| anyhow!("Invalid upload_url {:?}: {}", trimmed, e))?;
        }
        self.upload_url = trimmed.to_string();
        log::debug!(
            "Settings loaded: upload_url={:?}, {} extra emojis",
            self.upload_url,
            self.extra_emojis.len()
        );
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let settings = Settings::from_json(
            r#"{"upload_url": "https://cdn.example.com/", "extra_emojis": ["ruby", "rails"]}"#,
        )
        .unwrap();
        assert_eq!(settings.upload_url, "https://cdn.example.com");
        assert_eq!(settings.extra_emojis, vec!["ruby", "rails"]);

        // 所有字段都有默认值
        let empty = Settings::from_json("{}").unwrap();
        assert_eq!(empty, Settings::default());
    }

    #[test]
    fn test_invalid_upload_url() {
        assert!(Settings::from_json(r#"{"upload_url": "not a url"}"#).is_err());
    }
}
