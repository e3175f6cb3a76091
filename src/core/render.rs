use crate::domain::model::{FilterState, PageRegions, Post, Referral};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashMap;

pub const EMPTY_POSTS: &str =
    r#"<div class="empty-state">No posts found matching your criteria.</div>"#;
pub const EMPTY_REFERRALS: &str = r#"<div class="empty-state">No referrals available.</div>"#;
pub const DATA_ERROR: &str = r#"<div class="empty-state">Error loading data.</div>"#;

const LIKE_INTENT: &str = "https://x.com/intent/like?tweet_id=";
const SHARE_INTENT: &str = "https://x.com/intent/retweet?tweet_id=";

/// Colors for one tag pill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagColor {
    pub background: String,
    pub text: String,
}

/// Tag pill palette. Unknown tags fall back to the page's CSS variables.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    tag_colors: HashMap<String, TagColor>,
}

impl Theme {
    pub fn new(tag_colors: HashMap<String, TagColor>) -> Self {
        Self { tag_colors }
    }

    pub fn color_for(&self, tag: &str) -> TagColor {
        self.tag_colors.get(tag).cloned().unwrap_or(TagColor {
            background: "var(--tag-pill)".to_string(),
            text: "var(--text)".to_string(),
        })
    }
}

/// Page-level presentation settings for the document shell.
#[derive(Debug, Clone)]
pub struct SiteMeta {
    pub name: String,
    pub tagline: String,
    pub theme: Theme,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            name: "Postboard".to_string(),
            tagline: "Curated posts and referrals".to_string(),
            theme: Theme::default(),
        }
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// "2025-09-08" renders as "Sep 8, 2025"; anything unparseable as "".
pub fn format_date(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

/// Numeric id following "status/" in a post URL, if any. Feeds the
/// like/share intent links; extraction failure falls back to "#".
pub fn extract_status_id(url: &str) -> Option<String> {
    let re = Regex::new(r"status/(\d+)").unwrap();
    re.captures(url).map(|caps| caps[1].to_string())
}

pub fn render_referrals(referrals: &[Referral]) -> String {
    if referrals.is_empty() {
        return EMPTY_REFERRALS.to_string();
    }

    referrals
        .iter()
        .map(|referral| {
            format!(
                r#"<a href="{url}" class="referral-link" target="_blank" rel="noopener noreferrer"><span class="referral-name">{name}</span> &mdash; {blurb}</a>"#,
                url = escape_html(&referral.url),
                name = escape_html(&referral.name),
                blurb = escape_html(&referral.blurb),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The filter control bar: an "All" reset control plus one button per
/// distinct tag, each carrying its pressed state.
pub fn render_filters(tags: &[String], state: &FilterState) -> String {
    let mut controls = vec![format!(
        r#"<button class="filter-btn" data-filter="all" aria-pressed="{}">All</button>"#,
        state.active_tags().is_empty()
    )];

    controls.extend(tags.iter().map(|tag| {
        format!(
            r#"<button class="filter-btn" data-tag="{tag}" aria-pressed="{pressed}">{tag}</button>"#,
            tag = escape_html(tag),
            pressed = state.active_tags().contains(tag),
        )
    }));

    controls.join("\n")
}

pub fn render_posts(posts: &[&Post], theme: &Theme) -> String {
    if posts.is_empty() {
        return EMPTY_POSTS.to_string();
    }

    posts
        .iter()
        .map(|post| render_post_card(post, theme))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_post_card(post: &Post, theme: &Theme) -> String {
    let (like_url, share_url) = match extract_status_id(&post.url) {
        Some(id) => (
            format!("{}{}", LIKE_INTENT, id),
            format!("{}{}", SHARE_INTENT, id),
        ),
        None => ("#".to_string(), "#".to_string()),
    };

    let tags_html = post
        .tags
        .iter()
        .map(|tag| {
            let colors = theme.color_for(tag);
            format!(
                r#"<span class="tag" style="background: {bg}; color: {text};">{tag}</span>"#,
                bg = colors.background,
                text = colors.text,
                tag = escape_html(tag),
            )
        })
        .collect::<Vec<_>>()
        .join("");

    format!(
        r#"<article class="post-card">
    <h3 class="post-title"><a href="{url}" target="_blank" rel="noopener noreferrer">{title}</a></h3>
    <div class="post-meta"><time datetime="{date}">{formatted_date}</time></div>
    <p class="post-summary">{summary}</p>
    <div class="post-tags">{tags_html}</div>
    <div class="post-actions">
        <a class="btn btn-primary" href="{url}" target="_blank" rel="noopener noreferrer">Go to</a>
        <a class="btn btn-secondary" href="{like_url}" target="_blank" rel="noopener noreferrer">Like</a>
        <a class="btn btn-outline" href="{share_url}" target="_blank" rel="noopener noreferrer">Share</a>
    </div>
</article>"#,
        url = escape_html(&post.url),
        title = escape_html(&post.title),
        date = escape_html(&post.date),
        formatted_date = format_date(&post.date),
        summary = escape_html(&post.summary),
        tags_html = tags_html,
        like_url = escape_html(&like_url),
        share_url = escape_html(&share_url),
    )
}

/// The degraded output after a missing data source: the fixed error message
/// in all three regions, nothing else.
pub fn degraded_regions() -> PageRegions {
    PageRegions {
        referrals: DATA_ERROR.to_string(),
        filters: DATA_ERROR.to_string(),
        posts: DATA_ERROR.to_string(),
        total_posts: "0".to_string(),
        active_filter: String::new(),
    }
}

/// Assemble the full static document around the rendered regions. The
/// region element ids (`referrals`, `filters`, `posts`, `totalPosts`,
/// `activeFilter`, `search`) are the page's stable external interface.
pub fn render_page(regions: &PageRegions, site: &SiteMeta) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{name}</title>
    <style>
{base_css}
    </style>
</head>
<body>
    <header class="site-header">
        <h1 class="site-name">{name}</h1>
        <p class="site-tagline">{tagline}</p>
        <input id="search" type="search" placeholder="Search posts..." autocomplete="off">
        <p class="stats"><span id="totalPosts">{total}</span> posts &middot; Showing: <span id="activeFilter">{active}</span></p>
    </header>
    <main class="content">
        <section class="referrals-section">
            <h2>Referrals</h2>
            <div id="referrals">
{referrals}
            </div>
        </section>
        <section class="filters-section">
            <div id="filters">
{filters}
            </div>
        </section>
        <section class="posts-section">
            <h2>Posts</h2>
            <div id="posts">
{posts}
            </div>
        </section>
    </main>
</body>
</html>"#,
        name = escape_html(&site.name),
        tagline = escape_html(&site.tagline),
        base_css = DEFAULT_CSS,
        total = regions.total_posts,
        active = escape_html(&regions.active_filter),
        referrals = regions.referrals,
        filters = regions.filters,
        posts = regions.posts,
    )
}

const DEFAULT_CSS: &str = r#"        :root {
            --bg: #fdfdfc;
            --text: #2c3e50;
            --muted: #7f8c8d;
            --accent: #138d75;
            --card: #ffffff;
            --tag-pill: #ecf0f1;
            --border: #e0e0e0;
        }
        * { box-sizing: border-box; }
        body { margin: 0; font-family: system-ui, sans-serif; background: var(--bg); color: var(--text); }
        .site-header { padding: 2rem 1.5rem 1rem; border-bottom: 1px solid var(--border); }
        .site-name { margin: 0; }
        .site-tagline { margin: 0.25rem 0 1rem; color: var(--muted); }
        #search { width: 100%; max-width: 28rem; padding: 0.5rem 0.75rem; border: 1px solid var(--border); border-radius: 6px; }
        .stats { color: var(--muted); font-size: 0.9rem; }
        .content { max-width: 48rem; margin: 0 auto; padding: 1rem 1.5rem 3rem; }
        .referral-link { display: block; padding: 0.5rem 0; color: var(--accent); text-decoration: none; }
        .referral-name { font-weight: 600; }
        #filters { display: flex; flex-wrap: wrap; gap: 0.5rem; margin: 1rem 0; }
        .filter-btn { padding: 0.35rem 0.9rem; border: 1px solid var(--border); border-radius: 999px; background: var(--card); cursor: pointer; }
        .filter-btn[aria-pressed="true"] { background: var(--accent); color: #fff; border-color: var(--accent); }
        .post-card { background: var(--card); border: 1px solid var(--border); border-radius: 8px; padding: 1rem 1.25rem; margin-bottom: 1rem; }
        .post-title a { color: var(--text); text-decoration: none; }
        .post-meta { color: var(--muted); font-size: 0.85rem; }
        .post-tags { margin: 0.5rem 0; }
        .tag { display: inline-block; padding: 0.15rem 0.6rem; border-radius: 999px; font-size: 0.8rem; margin-right: 0.35rem; }
        .post-actions { display: flex; gap: 0.5rem; margin-top: 0.75rem; }
        .btn { padding: 0.3rem 0.8rem; border-radius: 6px; font-size: 0.85rem; text-decoration: none; }
        .btn-primary { background: var(--accent); color: #fff; }
        .btn-secondary { background: var(--tag-pill); color: var(--text); }
        .btn-outline { border: 1px solid var(--border); color: var(--text); }
        .empty-state { color: var(--muted); padding: 1.5rem 0; }"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, url: &str, tags: &[&str], date: &str, summary: &str) -> Post {
        Post {
            title: title.to_string(),
            url: url.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            date: date.to_string(),
            summary: summary.to_string(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"fish" & chips</b>"#),
            "&lt;b&gt;&quot;fish&quot; &amp; chips&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2025-09-08"), "Sep 8, 2025");
        assert_eq!(format_date("2025-12-25"), "Dec 25, 2025");
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("09/08/2025"), "");
    }

    #[test]
    fn test_extract_status_id() {
        assert_eq!(
            extract_status_id("https://x.com/cryptotrader/status/1964951202916966591"),
            Some("1964951202916966591".to_string())
        );
        assert_eq!(extract_status_id("https://example.com/post/42"), None);
        assert_eq!(extract_status_id(""), None);
    }

    #[test]
    fn test_post_card_builds_intent_links() {
        let p = post(
            "A",
            "https://x.com/user/status/123",
            &[],
            "2025-01-01",
            "",
        );
        let html = render_posts(&[&p], &Theme::default());
        assert!(html.contains("https://x.com/intent/like?tweet_id=123"));
        assert!(html.contains("https://x.com/intent/retweet?tweet_id=123"));
    }

    #[test]
    fn test_post_card_falls_back_when_id_extraction_fails() {
        let p = post("A", "https://example.com/article", &[], "2025-01-01", "");
        let html = render_posts(&[&p], &Theme::default());
        // Both the like and the share anchor fall back to "#".
        assert_eq!(html.matches(r##"href="#""##).count(), 2);
        assert!(!html.contains("intent"));
    }

    #[test]
    fn test_post_fields_are_escaped() {
        let p = post(
            "<script>alert(1)</script>",
            r#"https://x.com/status/1?q="x""#,
            &["<b>"],
            "2025-01-01",
            "a & b",
        );
        let html = render_posts(&[&p], &Theme::default());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("a &amp; b"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_render_posts_empty_state() {
        assert_eq!(render_posts(&[], &Theme::default()), EMPTY_POSTS);
    }

    #[test]
    fn test_render_referrals() {
        let referrals = vec![Referral {
            name: "Hyperliquid".to_string(),
            url: "https://app.hyperliquid.xyz".to_string(),
            blurb: "Perps DEX".to_string(),
        }];
        let html = render_referrals(&referrals);
        assert!(html.contains("Hyperliquid"));
        assert!(html.contains("https://app.hyperliquid.xyz"));
        assert!(html.contains("Perps DEX"));

        assert_eq!(render_referrals(&[]), EMPTY_REFERRALS);
    }

    #[test]
    fn test_render_filters_pressed_states() {
        let tags = vec!["DEX".to_string(), "Web3 Gaming".to_string()];
        let mut state = FilterState::new();

        let html = render_filters(&tags, &state);
        assert!(html.contains(r#"data-filter="all" aria-pressed="true""#));
        assert!(html.contains(r#"data-tag="DEX" aria-pressed="false""#));

        state.toggle_tag("DEX");
        let html = render_filters(&tags, &state);
        assert!(html.contains(r#"data-filter="all" aria-pressed="false""#));
        assert!(html.contains(r#"data-tag="DEX" aria-pressed="true""#));
        assert!(html.contains(r#"data-tag="Web3 Gaming" aria-pressed="false""#));
    }

    #[test]
    fn test_theme_colors_applied_to_tag_pills() {
        let mut colors = HashMap::new();
        colors.insert(
            "DEX".to_string(),
            TagColor {
                background: "#d5f4e6".to_string(),
                text: "#138d75".to_string(),
            },
        );
        let theme = Theme::new(colors);

        let p = post("A", "", &["DEX", "Other"], "2025-01-01", "");
        let html = render_posts(&[&p], &theme);
        assert!(html.contains("background: #d5f4e6; color: #138d75;"));
        assert!(html.contains("background: var(--tag-pill); color: var(--text);"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let p = post("A", "https://x.com/status/1", &["DEX"], "2025-01-01", "s");
        let theme = Theme::default();
        let state = FilterState::new();
        let tags = vec!["DEX".to_string()];

        assert_eq!(render_posts(&[&p], &theme), render_posts(&[&p], &theme));
        assert_eq!(
            render_filters(&tags, &state),
            render_filters(&tags, &state)
        );
    }

    #[test]
    fn test_render_page_embeds_regions_under_stable_ids() {
        let regions = PageRegions {
            referrals: "<a>ref</a>".to_string(),
            filters: "<button>All</button>".to_string(),
            posts: "<article>post</article>".to_string(),
            total_posts: "7".to_string(),
            active_filter: "All".to_string(),
        };
        let page = render_page(&regions, &SiteMeta::default());

        assert!(page.contains(r#"<div id="referrals">"#));
        assert!(page.contains(r#"<div id="filters">"#));
        assert!(page.contains(r#"<div id="posts">"#));
        assert!(page.contains(r#"<span id="totalPosts">7</span>"#));
        assert!(page.contains(r#"<span id="activeFilter">All</span>"#));
        assert!(page.contains(r#"<input id="search""#));
        assert!(page.contains("<article>post</article>"));
    }

    #[test]
    fn test_degraded_regions_show_fixed_error() {
        let regions = degraded_regions();
        assert_eq!(regions.referrals, DATA_ERROR);
        assert_eq!(regions.filters, DATA_ERROR);
        assert_eq!(regions.posts, DATA_ERROR);
        assert_eq!(regions.total_posts, "0");
    }
}
