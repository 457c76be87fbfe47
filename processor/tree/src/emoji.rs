use regex::{Captures, Regex};
use std::collections::HashSet;
use std::sync::{LazyLock, OnceLock};

use crate::walker::TextNodePass;
use common::{EMOJI_ASSET_DIR, EMOJI_EXTENSION, Settings, escape_attr, join_base};

static EMOJI_REGEX: OnceLock<Regex> = OnceLock::new();

static SHORTCODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_+-]+$").expect("Invalid shortcode regex"));

/// 表情注册表
///
/// 启动时构建，之后只读，可以被任意多个线程同时使用。
#[derive(Debug, Clone, Default)]
pub struct EmojiRegistry {
    base_url: String,
    builtin: bool,
    custom: HashSet<String>,
}

impl EmojiRegistry {
    /// 内置 gemoji 短码
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            builtin: true,
            custom: HashSet::new(),
        }
    }

    /// 不含内置短码，只认识之后注册的
    pub fn custom_only(base_url: impl Into<String>) -> Self {
        Self {
            builtin: false,
            ..Self::new(base_url)
        }
    }

    /// 注册额外的短码，名称不合法的会被忽略
    pub fn with_shortcodes<I, S>(mut self, shortcodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for shortcode in shortcodes {
            let shortcode = shortcode.as_ref().trim();
            if SHORTCODE_REGEX.is_match(shortcode) {
                self.custom.insert(shortcode.to_string());
            } else {
                log::warn!("Ignoring invalid emoji shortcode: {:?}", shortcode);
            }
        }
        self
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.upload_url.as_str()).with_shortcodes(&settings.extra_emojis)
    }

    pub fn contains(&self, shortcode: &str) -> bool {
        self.custom.contains(shortcode)
            || (self.builtin && emojis::get_by_shortcode(shortcode).is_some())
    }

    /// 图片文件名，`+` 写作 `plus`
    pub fn file_name(shortcode: &str) -> String {
        format!("{}.{}", shortcode.replace('+', "plus"), EMOJI_EXTENSION)
    }

    /// `<base>/assets/emojis/<file>`
    pub fn asset_url(&self, shortcode: &str) -> String {
        join_base(
            &join_base(&self.base_url, EMOJI_ASSET_DIR),
            &Self::file_name(shortcode),
        )
    }
}

/// `:shortcode:` 替换为表情图片，未注册的短码保持原样
pub struct EmojiReplacer<'r> {
    registry: &'r EmojiRegistry,
}

impl<'r> EmojiReplacer<'r> {
    const PATTERN: &'static str = r":([^\s:]+):";

    pub fn new(registry: &'r EmojiRegistry) -> Self {
        Self { registry }
    }
}

impl TextNodePass for EmojiReplacer<'_> {
    fn regex(&self) -> &Regex {
        EMOJI_REGEX.get_or_init(|| Regex::new(Self::PATTERN).expect("Invalid emoji regex pattern"))
    }

    fn trigger(&self) -> char {
        ':'
    }

    fn substitute(&self, captures: &Captures<'_>) -> String {
        let shortcode = &captures[1];
        if !self.registry.contains(shortcode) {
            return captures[0].to_string();
        }

        let label = escape_attr(&captures[0]);
        format!(
            r#"<img src="{}" class="emoji" title="{label}" alt="{label}">"#,
            escape_attr(&self.registry.asset_url(shortcode))
        )
    }

    fn name(&self) -> &'static str {
        "emoji"
    }
}
