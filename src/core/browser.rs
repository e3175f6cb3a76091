use crate::core::render::Theme;
use crate::core::{filter, render};
use crate::domain::model::{
    BrowseEvent, Catalog, FilterState, PageRegions, RegionUpdate, SourceData,
};

/// Interaction controller: owns the catalog and the single mutable filter
/// state, applies user events, and returns the re-rendered regions.
///
/// Everything is synchronous; an event is fully applied and re-rendered
/// within the `handle` call.
#[derive(Debug, Clone)]
pub struct Browser {
    catalog: Catalog,
    state: FilterState,
    theme: Theme,
    degraded: bool,
}

impl Browser {
    pub fn new(catalog: Catalog, theme: Theme) -> Self {
        Self {
            catalog,
            state: FilterState::new(),
            theme,
            degraded: false,
        }
    }

    /// Build from the host's possibly-absent collection values. If either
    /// collection is missing the browser is degraded from the start: every
    /// render yields the fixed error regions and events change nothing.
    pub fn from_sources(data: &SourceData, theme: Theme) -> Self {
        match Catalog::from_sources(data) {
            Ok(catalog) => Self::new(catalog, theme),
            Err(e) => {
                tracing::error!("{}", e);
                Self::degraded(theme)
            }
        }
    }

    pub fn degraded(theme: Theme) -> Self {
        Self {
            catalog: Catalog::default(),
            state: FilterState::new(),
            theme,
            degraded: true,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Apply one interaction event and return the regions it invalidated.
    ///
    /// A search edit re-renders only the posts region and the summary
    /// fields; tag toggles and the "All" reset re-render everything so the
    /// filter bar reflects the new pressed states.
    pub fn handle(&mut self, event: BrowseEvent) -> RegionUpdate {
        if self.degraded {
            return RegionUpdate::Full(render::degraded_regions());
        }

        match event {
            BrowseEvent::SearchChanged(raw) => {
                self.state.set_search(&raw);
                let (posts, total_posts, active_filter) = self.posts_region();
                RegionUpdate::PostsOnly {
                    posts,
                    total_posts,
                    active_filter,
                }
            }
            BrowseEvent::TagToggled(tag) => {
                self.state.toggle_tag(&tag);
                RegionUpdate::Full(self.render_all())
            }
            BrowseEvent::AllSelected => {
                self.state.clear_tags();
                RegionUpdate::Full(self.render_all())
            }
        }
    }

    /// Project the full current state into all page regions.
    pub fn render_all(&self) -> PageRegions {
        if self.degraded {
            return render::degraded_regions();
        }

        let (posts, total_posts, active_filter) = self.posts_region();
        PageRegions {
            referrals: render::render_referrals(&self.catalog.referrals),
            filters: render::render_filters(
                &filter::distinct_tags(&self.catalog.posts),
                &self.state,
            ),
            posts,
            total_posts,
            active_filter,
        }
    }

    fn posts_region(&self) -> (String, String, String) {
        let filtered = filter::filter_posts(&self.catalog.posts, &self.state);
        (
            render::render_posts(&filtered, &self.theme),
            self.catalog.posts.len().to_string(),
            self.state.describe(),
        )
    }
}
