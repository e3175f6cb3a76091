use crate::domain::model::{FilterState, Post};

/// Combined filter predicate: tag match AND text match.
///
/// A post tag-matches when no tags are active or when at least one of its
/// tags is in the active set. A non-empty query must additionally appear as
/// a case-insensitive substring of the post's title, summary, or joined tags.
pub fn matches(post: &Post, state: &FilterState) -> bool {
    let tag_match = state.active_tags().is_empty()
        || post
            .tags
            .iter()
            .any(|tag| state.active_tags().contains(tag));

    if state.search_query().is_empty() {
        return tag_match;
    }

    tag_match && post.search_text().contains(state.search_query())
}

/// The ordered subset of posts matching the current filter state.
///
/// Matching posts sort by date descending. Missing and unparseable dates
/// sort as the epoch, so posts with unknown dates end up last. The sort is
/// stable: posts with equal dates keep their source order. The entire
/// result is returned; there is no pagination.
pub fn filter_posts<'a>(posts: &'a [Post], state: &FilterState) -> Vec<&'a Post> {
    let mut matching: Vec<&Post> = posts.iter().filter(|post| matches(post, state)).collect();
    matching.sort_by_key(|post| std::cmp::Reverse(post.parsed_date().unwrap_or_default()));
    matching
}

/// Every tag appearing on at least one post, deduplicated and sorted
/// lexicographically. This is exactly the set rendered as filter controls.
pub fn distinct_tags(posts: &[Post]) -> Vec<String> {
    let mut tags: Vec<String> = posts
        .iter()
        .flat_map(|post| post.tags.iter().cloned())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}
