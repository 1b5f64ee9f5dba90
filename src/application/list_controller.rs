//! List screen controller
//!
//! Owns the query of one list screen and turns UI events into new pages.
//! Event handling is split in two: [`reduce`] computes the next query without
//! side effects, and [`ListController::dispatch`] fetches, runs the engine and
//! stores the result. A failed event leaves the stored query untouched.

use std::marker::PhantomData;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::application::dto::ListPageDto;
use crate::domain::{
    EngineResult, EntitySource, FilterValue, KindedEntity, ListError, ListProfile, ListQuery,
    ListQueryEngine, PageWindowCalculator, SortOrder, SortSpec,
};
use crate::infrastructure::config::ListSettings;

/// User interactions a list screen reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ListEvent {
    Search(String),
    SetFilter { key: String, value: FilterValue },
    ClearFilter(String),
    ClearFilters,
    /// Header click: asc, then desc, then unsorted for the same column
    SortBy(String),
    SetPageSize(u32),
    GoToPage(u32),
    NextPage,
    PrevPage,
    Reset,
}

/// What [`reduce`] may consult besides the current query
#[derive(Debug, Clone, Copy)]
pub struct ReduceContext<'a> {
    pub profile: &'a ListProfile,
    pub settings: &'a ListSettings,
    /// Page count of the last rendered page, if one was rendered
    pub known_pages: Option<u32>,
}

/// Next query for `event`, or the reason the event is rejected
pub fn reduce(query: &ListQuery, event: ListEvent, ctx: &ReduceContext<'_>) -> EngineResult<ListQuery> {
    let query = query.clone();
    let next = match event {
        ListEvent::Search(text) => query.with_search(text).with_page(1),
        ListEvent::SetFilter { key, value } => {
            if ctx.settings.strict_sort_keys && !ctx.profile.is_filterable(&key) {
                return Err(ListError::invalid_query(format!(
                    "{} list cannot be filtered by '{key}'",
                    ctx.profile.entity
                )));
            }
            query.with_filter(key, value).with_page(1)
        }
        ListEvent::ClearFilter(key) => query.without_filter(&key).with_page(1),
        ListEvent::ClearFilters => query.without_filters().with_page(1),
        ListEvent::SortBy(key) => {
            let sort = next_sort(query.sort.as_ref(), key);
            query.with_sort(sort).with_page(1)
        }
        ListEvent::SetPageSize(size) => {
            let next = query.with_page_size(size).with_page(1);
            next.validate_page_size(&ctx.settings.page_size_options)?;
            next
        }
        ListEvent::GoToPage(page) => {
            check_page(page, ctx.known_pages)?;
            query.with_page(page)
        }
        ListEvent::NextPage => {
            let page = query.page_index.saturating_add(1);
            check_page(page, ctx.known_pages)?;
            query.with_page(page)
        }
        ListEvent::PrevPage => {
            let page = query.page_index.saturating_sub(1);
            check_page(page, ctx.known_pages)?;
            query.with_page(page)
        }
        ListEvent::Reset => ListQuery::for_profile(ctx.profile, ctx.settings.default_page_size),
    };
    next.validate()?;
    Ok(next)
}

fn next_sort(current: Option<&SortSpec>, key: String) -> Option<SortSpec> {
    match current {
        Some(sort) if sort.key == key => match sort.order {
            SortOrder::Asc => Some(SortSpec::desc(key)),
            SortOrder::Desc => None,
        },
        _ => Some(SortSpec::asc(key)),
    }
}

fn check_page(page: u32, known_pages: Option<u32>) -> EngineResult<()> {
    if page == 0 {
        return Err(ListError::invalid_paging_state("pages start at 1"));
    }
    if let Some(known) = known_pages {
        let last = known.max(1);
        if page > last {
            return Err(ListError::invalid_paging_state(format!(
                "page {page} is past the last page {last}"
            )));
        }
    }
    Ok(())
}

struct ListState<T> {
    query: ListQuery,
    page: Option<ListPageDto<T>>,
}

/// Controller of one list screen for entity type `T`, reading from `S`
pub struct ListController<T, S> {
    source: Arc<S>,
    engine: ListQueryEngine,
    calculator: PageWindowCalculator,
    settings: ListSettings,
    state: RwLock<ListState<T>>,
    _entity: PhantomData<fn() -> T>,
}

impl<T, S> ListController<T, S>
where
    T: KindedEntity + Clone + Send + Sync,
    S: EntitySource<T>,
{
    pub fn new(source: Arc<S>, settings: ListSettings) -> Self {
        let engine = ListQueryEngine::for_entity::<T>().with_strict_sort_keys(settings.strict_sort_keys);
        let query = ListQuery::for_profile(engine.profile(), settings.default_page_size);

        Self {
            source,
            calculator: PageWindowCalculator::new(settings.neighbor_radius),
            engine,
            settings,
            state: RwLock::new(ListState { query, page: None }),
            _entity: PhantomData,
        }
    }

    pub fn profile(&self) -> &ListProfile {
        self.engine.profile()
    }

    pub async fn query(&self) -> ListQuery {
        self.state.read().await.query.clone()
    }

    /// Last page produced by `refresh` or `dispatch`
    pub async fn current_page(&self) -> Option<ListPageDto<T>> {
        self.state.read().await.page.clone()
    }

    /// Re-fetches the collection and renders the stored query
    pub async fn refresh(&self) -> Result<ListPageDto<T>> {
        let mut state = self.state.write().await;
        let (query, page) = self.render(state.query.clone()).await?;
        state.query = query;
        state.page = Some(page.clone());
        Ok(page)
    }

    /// Applies a UI event, then renders the resulting query
    ///
    /// Errors carry a [`ListError`] when the event itself is invalid.
    pub async fn dispatch(&self, event: ListEvent) -> Result<ListPageDto<T>> {
        let mut state = self.state.write().await;
        let ctx = ReduceContext {
            profile: self.engine.profile(),
            settings: &self.settings,
            known_pages: state.page.as_ref().map(|page| page.total_pages),
        };
        let entity = T::KIND;
        debug!(%entity, ?event, "list event");

        let next = reduce(&state.query, event, &ctx)?;
        let (query, page) = self.render(next).await?;
        state.query = query;
        state.page = Some(page.clone());
        Ok(page)
    }

    async fn render(&self, query: ListQuery) -> Result<(ListQuery, ListPageDto<T>)> {
        let rows = EntitySource::<T>::fetch_all(self.source.as_ref())
            .await
            .with_context(|| format!("Failed to fetch {} list", T::KIND))?;

        let mut query = query;
        let mut result = self.engine.execute(&rows, &query)?;
        let total_pages = result.total_pages(query.page_size);
        if query.page_index > total_pages.max(1) {
            warn!(
                "⚠️ {} list shrank to {} page(s); page {} reset to 1",
                T::KIND,
                total_pages,
                query.page_index
            );
            query = query.with_page(1);
            result = self.engine.execute(&rows, &query)?;
        }

        let window = self
            .calculator
            .compute(query.page_index, total_pages, result.total, query.page_size)?;
        let page = ListPageDto::new(result, &query, window);

        info!(
            "📄 {} list: page {}/{} ({} of {} items)",
            T::KIND,
            page.page_index,
            page.total_pages.max(1),
            page.items.len(),
            page.total
        );
        Ok((query, page))
    }
}
