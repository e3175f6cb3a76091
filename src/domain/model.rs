use crate::utils::error::{Result, SiteError};
use crate::utils::validation::validate_url;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single content entry. Loaded once at startup, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub summary: String,
}

impl Post {
    /// Parsed calendar date; `None` for empty or unparseable values.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Lowercased haystack for free-text search: title, summary, joined tags.
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.title, self.summary, self.tags.join(" ")).to_lowercase()
    }
}

/// A named external link with a short description. Loaded once, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Referral {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub blurb: String,
}

/// The raw collection values as handed over by the host. Either may be
/// absent entirely, which puts the browser into its degraded state.
#[derive(Debug, Clone, Default)]
pub struct SourceData {
    pub posts: Option<serde_json::Value>,
    pub referrals: Option<serde_json::Value>,
}

impl SourceData {
    pub fn missing_source(&self) -> Option<&'static str> {
        if self.posts.is_none() {
            Some("posts")
        } else if self.referrals.is_none() {
            Some("referrals")
        } else {
            None
        }
    }
}

/// The two parsed collections together.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub posts: Vec<Post>,
    pub referrals: Vec<Referral>,
}

impl Catalog {
    /// Parse the host's collection values, failing when either is absent.
    pub fn from_sources(data: &SourceData) -> Result<Self> {
        match (&data.posts, &data.referrals) {
            (Some(posts), Some(referrals)) => Ok(Self::from_values(posts, referrals)),
            _ => Err(SiteError::MissingDataSource {
                name: data.missing_source().unwrap_or("data").to_string(),
            }),
        }
    }

    /// Parse both collections. Records are validated individually at this
    /// boundary: a missing field defaults to empty, a wrong-shaped record is
    /// logged and skipped, and a non-array collection parses as empty.
    pub fn from_values(posts: &serde_json::Value, referrals: &serde_json::Value) -> Self {
        let mut posts: Vec<Post> = parse_collection(posts, "posts");
        // Tag labels form a set: repeats keep their first (authored) position.
        for post in &mut posts {
            let mut seen = BTreeSet::new();
            post.tags.retain(|tag| seen.insert(tag.clone()));
        }

        let referrals: Vec<Referral> = parse_collection(referrals, "referrals");

        // Unusable links are reported but kept; the renderer escapes them
        // like any other text.
        for post in &posts {
            warn_on_invalid_link("post", &post.title, &post.url);
        }
        for referral in &referrals {
            warn_on_invalid_link("referral", &referral.name, &referral.url);
        }

        Self { posts, referrals }
    }
}

fn warn_on_invalid_link(kind: &str, label: &str, url: &str) {
    if url.is_empty() {
        return;
    }
    if let Err(e) = validate_url("url", url) {
        tracing::warn!("{} '{}': {}", kind, label, e);
    }
}

fn parse_collection<T: for<'de> Deserialize<'de>>(
    value: &serde_json::Value,
    what: &str,
) -> Vec<T> {
    let Some(items) = value.as_array() else {
        tracing::warn!("{} collection is not an array, treating as empty", what);
        return Vec::new();
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match serde_json::from_value::<T>(item.clone()) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!("Skipping malformed {} record #{}: {}", what, index, e);
            }
        }
    }
    records
}

/// The single mutable filter-state object. Owned by the interaction
/// controller; read-only to the filter engine and renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    active_tags: BTreeSet<String>,
    search_query: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_tags(&self) -> &BTreeSet<String> {
        &self.active_tags
    }

    /// Always stored lowercased and trimmed; empty means "no filter".
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Add the tag if absent, remove it if present.
    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.active_tags.remove(tag) {
            self.active_tags.insert(tag.to_string());
        }
    }

    /// The "All" control: idempotent reset, not a toggle.
    pub fn clear_tags(&mut self) {
        self.active_tags.clear();
    }

    pub fn set_search(&mut self, raw: &str) {
        self.search_query = raw.trim().to_lowercase();
    }

    /// Human-readable description of the active selection.
    pub fn describe(&self) -> String {
        if self.active_tags.is_empty() {
            "All".to_string()
        } else {
            self.active_tags
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

/// One user interaction, as delivered by the hosting adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseEvent {
    SearchChanged(String),
    TagToggled(String),
    AllSelected,
}

/// Rendered markup for the three page regions plus the two summary fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRegions {
    pub referrals: String,
    pub filters: String,
    pub posts: String,
    pub total_posts: String,
    pub active_filter: String,
}

/// What a single event invalidated. A search edit touches only the posts
/// region and the summary fields; a filter change re-renders everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionUpdate {
    PostsOnly {
        posts: String,
        total_posts: String,
        active_filter: String,
    },
    Full(PageRegions),
}

/// The rendered regions plus the assembled document around them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSite {
    pub regions: PageRegions,
    pub document: String,
}
