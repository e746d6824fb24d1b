//! Calendar navigation, selection and filter state.
//!
//! [`CalendarState`] is the synchronous state machine; every derived view is
//! recomputed from it on demand. [`CalendarController`] wraps it with the
//! release repository and enforces last-request-wins for month fetches.

use std::sync::Arc;

use chrono::NaiveDate;
use release_source::ReleaseRepository;
use shared::{
    domain::{FilterOptions, MovieRelease, YearMonth},
    protocol::{FilterPatch, GridView, ReleaseListView, ViewStatus},
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::{
    date_index::DateIndex,
    error::CalendarError,
    filter::{self, FilterFacets},
    grid::{build_grid, WeekStart},
    Clock, SystemClock,
};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Ready(Vec<MovieRelease>),
    Failed(String),
}

/// Identifies one outstanding fetch. Only the most recently issued ticket
/// may update the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    month: YearMonth,
}

impl FetchTicket {
    pub fn month(self) -> YearMonth {
        self.month
    }

    /// Inclusive date range to request from the repository.
    pub fn range(self) -> (NaiveDate, NaiveDate) {
        (self.month.first_day(), self.month.last_day())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded { count: usize },
    Failed { message: String },
    Stale,
}

#[derive(Debug, Clone)]
pub struct CalendarState {
    current_month: YearMonth,
    selected_date: Option<NaiveDate>,
    filters: FilterOptions,
    load: LoadState,
    latest_generation: u64,
}

impl CalendarState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            current_month: YearMonth::of(today),
            selected_date: None,
            filters: FilterOptions::default(),
            load: LoadState::Loading,
            latest_generation: 0,
        }
    }

    pub fn current_month(&self) -> YearMonth {
        self.current_month
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn filters(&self) -> &FilterOptions {
        &self.filters
    }

    pub fn load(&self) -> &LoadState {
        &self.load
    }

    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading
    }

    pub fn status(&self) -> ViewStatus {
        match &self.load {
            LoadState::Loading => ViewStatus::Loading,
            LoadState::Ready(_) => ViewStatus::Ready,
            LoadState::Failed(message) => ViewStatus::Failed {
                message: message.clone(),
            },
        }
    }

    pub fn go_to_previous_month(&mut self) {
        self.show_month(self.current_month.previous());
    }

    pub fn go_to_next_month(&mut self) {
        self.show_month(self.current_month.next());
    }

    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.show_month(YearMonth::of(today));
        self.selected_date = Some(today);
    }

    /// Selects `date`, or clears the selection when `date` is already selected.
    /// Returns the resulting selection.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<Option<NaiveDate>, CalendarError> {
        if !self.current_month.contains(date) {
            warn!(%date, month = %self.current_month, "rejected selection outside displayed month");
            return Err(CalendarError::SelectionOutsideMonth {
                date,
                month: self.current_month,
            });
        }
        self.selected_date = if self.selected_date == Some(date) {
            None
        } else {
            Some(date)
        };
        Ok(self.selected_date)
    }

    pub fn set_filters(&mut self, patch: FilterPatch) {
        self.filters.apply_patch(patch);
    }

    pub fn clear_filters(&mut self) {
        self.filters = FilterOptions::default();
    }

    /// Month changes drop loaded releases and any selection outside the new month.
    fn show_month(&mut self, month: YearMonth) {
        if month == self.current_month {
            return;
        }
        debug!(from = %self.current_month, to = %month, "calendar month changed");
        self.current_month = month;
        self.load = LoadState::Loading;
        if self
            .selected_date
            .is_some_and(|selected| !month.contains(selected))
        {
            self.selected_date = None;
        }
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_generation += 1;
        self.load = LoadState::Loading;
        FetchTicket {
            generation: self.latest_generation,
            month: self.current_month,
        }
    }

    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<MovieRelease>, String>,
    ) -> FetchOutcome {
        if ticket.generation != self.latest_generation || ticket.month != self.current_month {
            warn!(
                month = %ticket.month,
                current = %self.current_month,
                "discarding stale release response"
            );
            return FetchOutcome::Stale;
        }
        match result {
            Ok(releases) => {
                let outside = releases
                    .iter()
                    .filter(|release| !ticket.month.contains(release.release_date))
                    .count();
                if outside > 0 {
                    warn!(
                        month = %ticket.month,
                        outside,
                        "repository returned releases outside the requested range"
                    );
                }
                let count = releases.len();
                self.load = LoadState::Ready(releases);
                FetchOutcome::Loaded { count }
            }
            Err(message) => {
                self.load = LoadState::Failed(message.clone());
                FetchOutcome::Failed { message }
            }
        }
    }

    fn loaded_releases(&self) -> &[MovieRelease] {
        match &self.load {
            LoadState::Ready(releases) => releases,
            LoadState::Loading | LoadState::Failed(_) => &[],
        }
    }

    /// Loaded releases passing the active filters. Empty until a load succeeds.
    pub fn filtered_releases(&self) -> Vec<MovieRelease> {
        filter::apply(self.loaded_releases(), &self.filters)
    }

    /// Facets of the loaded, unfiltered releases.
    pub fn facets(&self) -> FilterFacets {
        FilterFacets::from_releases(self.loaded_releases())
    }

    pub fn visible_grid(&self, today: NaiveDate, week_start: WeekStart) -> GridView {
        let index = DateIndex::build(&self.filtered_releases());
        GridView {
            month: self.current_month,
            cells: build_grid(
                self.current_month,
                &index,
                today,
                self.selected_date,
                week_start,
            ),
            status: self.status(),
        }
    }

    pub fn releases_for_selection(&self) -> ReleaseListView {
        let mut releases = self.filtered_releases();
        match self.selected_date {
            Some(selected) => releases.retain(|release| release.release_date == selected),
            None => {
                releases.retain(|release| self.current_month.contains(release.release_date));
                releases.sort_by_key(|release| release.release_date);
            }
        }
        ReleaseListView {
            releases,
            selected_date: self.selected_date,
            status: self.status(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CalendarEvent {
    MonthChanged(YearMonth),
    SelectionChanged(Option<NaiveDate>),
    FiltersChanged(FilterOptions),
    ReleasesLoaded { month: YearMonth, count: usize },
    FetchFailed { month: YearMonth, message: String },
    StaleResponseDiscarded { month: YearMonth },
}

pub struct CalendarController {
    repository: Arc<dyn ReleaseRepository>,
    clock: Arc<dyn Clock>,
    week_start: WeekStart,
    state: Mutex<CalendarState>,
    events: broadcast::Sender<CalendarEvent>,
}

impl CalendarController {
    pub fn new(repository: Arc<dyn ReleaseRepository>) -> Self {
        Self::new_with_dependencies(repository, Arc::new(SystemClock), WeekStart::default())
    }

    pub fn new_with_dependencies(
        repository: Arc<dyn ReleaseRepository>,
        clock: Arc<dyn Clock>,
        week_start: WeekStart,
    ) -> Self {
        let (events, _) = broadcast::channel(64);
        let state = CalendarState::new(clock.today());
        Self {
            repository,
            clock,
            week_start,
            state: Mutex::new(state),
            events,
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<CalendarEvent> {
        self.events.subscribe()
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub async fn snapshot(&self) -> CalendarState {
        self.state.lock().await.clone()
    }

    /// Fetches the displayed month again. This is the retry action after a failure.
    pub async fn reload(&self) -> Result<(), CalendarError> {
        let ticket = self.state.lock().await.begin_fetch();
        self.fetch(ticket).await
    }

    pub async fn go_to_previous_month(&self) -> Result<(), CalendarError> {
        self.navigate(CalendarState::go_to_previous_month).await
    }

    pub async fn go_to_next_month(&self) -> Result<(), CalendarError> {
        self.navigate(CalendarState::go_to_next_month).await
    }

    pub async fn go_to_today(&self) -> Result<(), CalendarError> {
        let today = self.clock.today();
        self.navigate(|state| state.go_to_today(today)).await
    }

    pub async fn select_date(&self, date: NaiveDate) -> Result<Option<NaiveDate>, CalendarError> {
        let selected = self.state.lock().await.select_date(date)?;
        let _ = self.events.send(CalendarEvent::SelectionChanged(selected));
        Ok(selected)
    }

    pub async fn set_filters(&self, patch: FilterPatch) -> FilterOptions {
        let filters = {
            let mut state = self.state.lock().await;
            state.set_filters(patch);
            state.filters().clone()
        };
        let _ = self
            .events
            .send(CalendarEvent::FiltersChanged(filters.clone()));
        filters
    }

    pub async fn clear_filters(&self) {
        self.state.lock().await.clear_filters();
        let _ = self
            .events
            .send(CalendarEvent::FiltersChanged(FilterOptions::default()));
    }

    pub async fn grid_view(&self) -> GridView {
        let today = self.clock.today();
        self.state.lock().await.visible_grid(today, self.week_start)
    }

    pub async fn release_list(&self) -> ReleaseListView {
        self.state.lock().await.releases_for_selection()
    }

    pub async fn facets(&self) -> FilterFacets {
        self.state.lock().await.facets()
    }

    async fn navigate(&self, transition: impl FnOnce(&mut CalendarState)) -> Result<(), CalendarError> {
        let (ticket, selection) = {
            let mut state = self.state.lock().await;
            let month_before = state.current_month();
            let selection_before = state.selected_date();
            transition(&mut *state);
            let selection = (state.selected_date() != selection_before)
                .then(|| state.selected_date());
            if state.current_month() == month_before {
                (None, selection)
            } else {
                let _ = self
                    .events
                    .send(CalendarEvent::MonthChanged(state.current_month()));
                (Some(state.begin_fetch()), selection)
            }
        };
        if let Some(selected) = selection {
            let _ = self.events.send(CalendarEvent::SelectionChanged(selected));
        }
        match ticket {
            Some(ticket) => self.fetch(ticket).await,
            None => Ok(()),
        }
    }

    /// The state lock is released while the repository call is outstanding so
    /// later navigation can supersede this request.
    async fn fetch(&self, ticket: FetchTicket) -> Result<(), CalendarError> {
        let (start, end) = ticket.range();
        debug!(month = %ticket.month(), "fetching releases");
        let result = self
            .repository
            .releases_for_range(start, end)
            .await
            .map_err(|err| format!("{err:#}"));

        let outcome = self.state.lock().await.complete_fetch(ticket, result);
        let month = ticket.month();
        match outcome {
            FetchOutcome::Loaded { count } => {
                info!(%month, count, "releases loaded");
                let _ = self
                    .events
                    .send(CalendarEvent::ReleasesLoaded { month, count });
                Ok(())
            }
            FetchOutcome::Failed { message } => {
                warn!(%month, error = %message, "release fetch failed");
                let _ = self.events.send(CalendarEvent::FetchFailed {
                    month,
                    message: message.clone(),
                });
                Err(CalendarError::DataFetch(message))
            }
            FetchOutcome::Stale => {
                let _ = self
                    .events
                    .send(CalendarEvent::StaleResponseDiscarded { month });
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
