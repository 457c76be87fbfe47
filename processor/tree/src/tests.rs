#[cfg(test)]
mod tree_tests {
    use crate::*;
    use common::MentionTable;

    fn apply(html: &str, pass: &dyn TextNodePass) -> String {
        let mut fragment = Fragment::parse(html).unwrap();
        walk(&mut fragment, pass).unwrap();
        fragment.serialize().unwrap()
    }

    fn mentions(names: &[&str]) -> MentionTable {
        let mut table = MentionTable::new();
        for name in names {
            table.push(*name);
        }
        table
    }

    #[test]
    fn test_fragment_round_trip() {
        let test_cases = vec![
            "<p>hello <b>world</b></p>",
            "<p>a &amp; b &lt; c</p>",
            "<pre class=\"highlight\"><code>x</code></pre>",
        ];

        for html in test_cases {
            let fragment = Fragment::parse(html).unwrap();
            assert_eq!(fragment.serialize().unwrap(), html);
        }
    }

    #[test]
    fn test_exclusion_zone() {
        let fragment = Fragment::parse("<p>a <code>b</code></p><pre><code>c</code></pre>").unwrap();
        let nodes = fragment.text_nodes().unwrap();
        assert_eq!(nodes.len(), 3);

        let zones: Vec<(&str, bool)> = nodes
            .iter()
            .map(|id| (fragment.text(*id).unwrap(), fragment.in_exclusion_zone(*id)))
            .collect();
        assert_eq!(zones, vec![("a ", false), ("b", true), ("c", true)]);
    }

    #[test]
    fn test_replace_nodes() {
        let mut fragment = Fragment::parse("<p>hi there</p>").unwrap();
        let id = fragment.text_nodes().unwrap()[0];
        fragment.replace_with_html(id, "hi <b>there</b>").unwrap();
        assert_eq!(fragment.serialize().unwrap(), "<p>hi <b>there</b></p>");

        let mut fragment = Fragment::parse("<p><a href=\"x\">t</a></p>").unwrap();
        let id = fragment.elements_named("a").unwrap()[0];
        fragment.replace_element(id, "<a href=\"y\">").unwrap();
        assert_eq!(fragment.serialize().unwrap(), "<p><a href=\"y\">t</a></p>");
    }

    #[test]
    fn test_floor_links() {
        let html = apply("<p>see #12楼 and #3F or #4樓, #5f</p>", &FloorMentionLinker);
        assert!(html.contains("href=\"#reply12\""), "html: {}", html);
        assert!(html.contains("data-floor=\"12\""), "html: {}", html);
        assert!(html.contains("class=\"at_floor\""), "html: {}", html);
        assert!(html.contains(">#12楼</a>"), "html: {}", html);
        assert!(html.contains(">#3F</a>"), "html: {}", html);
        assert!(html.contains(">#4樓</a>"), "html: {}", html);
        assert!(html.contains(">#5f</a>"), "html: {}", html);

        let test_cases = vec![
            "<pre><code>#12楼</code></pre>",
            "<p>inline <code>#12楼</code></p>",
            "<p>#12 楼 and #x楼 and #12L</p>",
        ];
        for input in test_cases {
            assert_eq!(apply(input, &FloorMentionLinker), input);
        }
    }

    #[test]
    fn test_user_mentions() {
        let table = mentions(&["alice", "bob", "alice"]);
        let linker = UserMentionLinker::new(&table);

        let html = apply("<p>@user1 hello @user2 @user3</p>", &linker);
        assert_eq!(html.matches("href=\"/alice\"").count(), 2, "html: {}", html);
        assert_eq!(html.matches("href=\"/bob\"").count(), 1, "html: {}", html);
        assert_eq!(html.matches("class=\"at_user\"").count(), 3, "html: {}", html);
        assert!(html.contains("title=\"@bob\""), "html: {}", html);
        assert!(html.contains("<i>@</i>bob</a>"), "html: {}", html);
        assert!(!html.contains("user1"), "html: {}", html);
    }

    #[test]
    fn test_user_mentions_in_code_are_not_linked() {
        let table = mentions(&["alice", "bob"]);
        let linker = UserMentionLinker::new(&table);

        assert_eq!(
            apply("<pre><code>ping @user2\n</code></pre>", &linker),
            "<pre><code>ping @bob\n</code></pre>"
        );
        assert_eq!(
            apply("<p>run <code>@user1</code></p>", &linker),
            "<p>run <code>@alice</code></p>"
        );
    }

    #[test]
    fn test_user_mention_fallback() {
        let table = mentions(&["alice"]);
        let linker = UserMentionLinker::new(&table);

        assert_eq!(linker.resolve("user1"), "alice");
        assert_eq!(linker.resolve("user0"), "user0");
        assert_eq!(linker.resolve("user42"), "user42");

        let html = apply("<p>@user42</p>", &linker);
        assert!(html.contains("href=\"/user42\""), "html: {}", html);

        // 前面是单词字符时不是提及
        assert_eq!(apply("<p>mail@user1</p>", &linker), "<p>mail@user1</p>");
    }

    #[test]
    fn test_placeholders_restored_in_attributes() {
        let table = mentions(&["alice"]);
        let linker = UserMentionLinker::new(&table);

        let mut fragment =
            Fragment::parse("<p><a href=\"https://example.com/@user1\">profile</a></p>").unwrap();
        assert_eq!(linker.restore_attributes(&mut fragment).unwrap(), 1);
        let html = fragment.serialize().unwrap();
        assert!(html.contains("href=\"https://example.com/@alice\""), "html: {}", html);
        assert!(html.contains(">profile</a>"), "html: {}", html);

        let mut fragment = Fragment::parse("<p><img src=\"a.png\" alt=\"@user1\"></p>").unwrap();
        assert_eq!(linker.restore_attributes(&mut fragment).unwrap(), 1);
        let html = fragment.serialize().unwrap();
        assert!(html.contains("alt=\"@alice\""), "html: {}", html);
        assert!(html.contains("src=\"a.png\""), "html: {}", html);

        let mut fragment = Fragment::parse("<p><a href=\"/x\">x</a></p>").unwrap();
        assert_eq!(linker.restore_attributes(&mut fragment).unwrap(), 0);
    }

    #[test]
    fn test_emoji_replacement() {
        let registry = EmojiRegistry::new("");
        let replacer = EmojiReplacer::new(&registry);

        let html = apply("<p>hi :smile: and :nosuchemoji:</p>", &replacer);
        assert!(html.contains("src=\"/assets/emojis/smile.png\""), "html: {}", html);
        assert!(html.contains("class=\"emoji\""), "html: {}", html);
        assert!(html.contains("alt=\":smile:\""), "html: {}", html);
        assert!(html.contains("title=\":smile:\""), "html: {}", html);
        assert!(html.contains(":nosuchemoji:"), "html: {}", html);

        let html = apply("<p>:+1::smile:</p>", &replacer);
        assert!(html.contains("/assets/emojis/plus1.png"), "html: {}", html);
        assert!(html.contains("/assets/emojis/smile.png"), "html: {}", html);

        let test_cases = vec![
            "<pre><code>:smile:</code></pre>",
            "<p>at 10:30:00</p>",
            "<p>:nosuchemoji:</p>",
        ];
        for input in test_cases {
            assert_eq!(apply(input, &replacer), input);
        }
    }

    #[test]
    fn test_emoji_registry() {
        let registry = EmojiRegistry::custom_only("https://cdn.example.com/")
            .with_shortcodes(["ruby", "bad name", "", "+1"]);

        assert!(registry.contains("ruby"));
        assert!(registry.contains("+1"));
        assert!(!registry.contains("bad name"));
        assert!(!registry.contains("smile"));
        assert_eq!(
            registry.asset_url("+1"),
            "https://cdn.example.com/assets/emojis/plus1.png"
        );

        let settings = common::Settings {
            upload_url: "https://cdn.example.com".to_string(),
            extra_emojis: vec!["ruby".to_string()],
        };
        let registry = EmojiRegistry::from_settings(&settings);
        assert!(registry.contains("ruby"));
        assert!(registry.contains("smile"));
        assert_eq!(
            registry.asset_url("smile"),
            "https://cdn.example.com/assets/emojis/smile.png"
        );
    }

    #[test]
    fn test_split_trailing() {
        let test_cases = vec![
            ("https://example.com", ("https://example.com", "")),
            ("https://example.com，你好", ("https://example.com", "，你好")),
            ("https://example.com/a?b=1&c=2#top", ("https://example.com/a?b=1&c=2#top", "")),
            ("www.example.com。", ("www.example.com", "。")),
        ];

        for (input, expected) in test_cases {
            assert_eq!(AutolinkFilter::split_trailing(input), expected);
        }
    }

    #[test]
    fn test_autolink_decoration() {
        let mut fragment =
            Fragment::parse("<p><a href=\"https://example.com\">https://example.com</a></p>").unwrap();
        assert_eq!(AutolinkFilter::apply(&mut fragment).unwrap(), 1);
        let html = fragment.serialize().unwrap();
        assert!(html.contains("rel=\"nofollow\""), "html: {}", html);
        assert!(html.contains("target=\"_blank\""), "html: {}", html);
        assert!(html.contains(">https://example.com</a></p>"), "html: {}", html);

        let mut fragment = Fragment::parse(
            "<p><a href=\"https://example.com%EF%BC%8C%E4%BD%A0%E5%A5%BD\">https://example.com，你好</a></p>",
        )
        .unwrap();
        assert_eq!(AutolinkFilter::apply(&mut fragment).unwrap(), 1);
        let html = fragment.serialize().unwrap();
        assert!(html.contains("href=\"https://example.com\""), "html: {}", html);
        assert!(html.contains(">https://example.com</a>，你好</p>"), "html: {}", html);

        let mut fragment =
            Fragment::parse("<p><a href=\"http://www.example.com\">www.example.com</a></p>").unwrap();
        assert_eq!(AutolinkFilter::apply(&mut fragment).unwrap(), 1);
        let html = fragment.serialize().unwrap();
        assert!(html.contains("href=\"http://www.example.com\""), "html: {}", html);
        assert!(html.contains("rel=\"nofollow\""), "html: {}", html);
    }

    #[test]
    fn test_autolink_skips_other_links() {
        let test_cases = vec![
            "<p><a href=\"mailto:me@example.com\">me@example.com</a></p>",
            "<p><a href=\"https://b.example.com\">click here</a></p>",
            "<p><a href=\"https://a.example.com\">https://b.example.com</a></p>",
            "<p><a href=\"https://example.com\"><b>https://example.com</b></a></p>",
        ];

        for input in test_cases {
            let mut fragment = Fragment::parse(input).unwrap();
            assert_eq!(AutolinkFilter::apply(&mut fragment).unwrap(), 0, "input: {}", input);
            assert_eq!(fragment.serialize().unwrap(), input);
        }
    }

    #[test]
    fn test_walk_counts_only_changed_nodes() {
        let mut fragment = Fragment::parse("<p>#1楼</p><p># not a floor</p><p>plain</p>").unwrap();
        assert_eq!(walk(&mut fragment, &FloorMentionLinker).unwrap(), 1);
    }

    #[test]
    fn test_no_links_inside_links() {
        let table = mentions(&["alice"]);
        let linker = UserMentionLinker::new(&table);

        let input = "<p><a href=\"http://x.com\">hi @user1 see #3楼</a></p>";
        let html = apply(input, &FloorMentionLinker);
        assert_eq!(html, input);

        let html = apply(&html, &linker);
        assert_eq!(html, "<p><a href=\"http://x.com\">hi @alice see #3楼</a></p>");

        // 表情不生成链接，链接内照常替换
        let registry = EmojiRegistry::new("");
        let html = apply("<p><a href=\"http://x.com\">:smile:</a></p>", &EmojiReplacer::new(&registry));
        assert!(html.contains("class=\"emoji\""), "html: {}", html);
    }

    #[test]
    fn test_placeholder_in_code_language() {
        let table = mentions(&["alice"]);
        let linker = UserMentionLinker::new(&table);

        let mut fragment =
            Fragment::parse("<pre><code class=\"language-@user1\">x</code></pre>").unwrap();
        assert_eq!(linker.restore_attributes(&mut fragment).unwrap(), 1);
        assert_eq!(
            fragment.serialize().unwrap(),
            "<pre><code class=\"language-@alice\">x</code></pre>"
        );
    }
}
