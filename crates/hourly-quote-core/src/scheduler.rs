//! Refresh scheduling for the quote widget
//!
//! The host adapter calls three entry points: [`RefreshScheduler::on_tick`]
//! for the hourly re-render, [`RefreshScheduler::on_user_action`] for the
//! "next" button and [`RefreshScheduler::on_config_change`] when the user
//! picks another category. Ticks only re-read state; fetching happens on
//! user action alone.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local};
use tracing::{debug, info, warn};

use crate::category::Category;
use crate::client::QuoteSource;
use crate::error::FetchError;
use crate::quote::Quote;
use crate::render::Background;
use crate::state::QuoteState;

pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 3600;
const MAX_REFRESH_INTERVAL_SECS: u64 = 365 * 24 * 3600;

/// A snapshot of the widget at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteEntry {
    pub date: DateTime<Local>,
    pub quote: Quote,
    pub category: Category,
    pub background: Background,
}

/// What to show now and when to ask again.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub entries: Vec<QuoteEntry>,
    pub refresh_after: DateTime<Local>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Fetching,
}

/// Result of a manual trigger, after failures have been absorbed.
#[derive(Debug)]
pub enum FetchOutcome {
    Updated(Quote),
    Failed(FetchError),
    /// A fetch was already in flight.
    Skipped,
}

impl FetchOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, FetchOutcome::Updated(_))
    }
}

pub struct RefreshScheduler<S> {
    source: Arc<S>,
    state: QuoteState,
    phase: Phase,
    refresh_interval: Duration,
    next_refresh: Option<DateTime<Local>>,
}

impl<S: QuoteSource> RefreshScheduler<S> {
    pub fn new(source: S) -> Self {
        Self::with_state(source, QuoteState::new())
    }

    pub fn with_state(source: S, state: QuoteState) -> Self {
        Self {
            source: Arc::new(source),
            state,
            phase: Phase::Idle,
            refresh_interval: Duration::seconds(DEFAULT_REFRESH_INTERVAL_SECS as i64),
            next_refresh: None,
        }
    }

    pub fn with_refresh_interval(mut self, secs: u64) -> Self {
        // Upper bound keeps the chrono duration in range.
        let secs = secs.clamp(1, MAX_REFRESH_INTERVAL_SECS) as i64;
        self.refresh_interval = Duration::seconds(secs);
        self
    }

    pub fn state(&self) -> &QuoteState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Shared handle to the source, for hosts that run the fetch on their own task.
    pub fn source(&self) -> Arc<S> {
        Arc::clone(&self.source)
    }

    /// Entry shown while the host prepares the widget. Reads the current quote.
    pub fn placeholder(&self, now: DateTime<Local>) -> QuoteEntry {
        QuoteEntry {
            date: now,
            quote: self.state.quote().clone(),
            category: Category::default(),
            background: Background::default(),
        }
    }

    pub fn snapshot(&self, now: DateTime<Local>) -> QuoteEntry {
        QuoteEntry {
            date: now,
            quote: self.state.quote().clone(),
            category: self.state.category(),
            background: Background::default(),
        }
    }

    /// Re-render from current state and schedule the next render.
    pub fn on_tick(&mut self, now: DateTime<Local>) -> Timeline {
        let refresh_after = now + self.refresh_interval;
        self.next_refresh = Some(refresh_after);

        debug!(%refresh_after, "Timeline refreshed");

        Timeline {
            entries: vec![self.snapshot(now)],
            refresh_after,
        }
    }

    pub fn is_refresh_due(&self, now: DateTime<Local>) -> bool {
        self.next_refresh.map_or(true, |at| now >= at)
    }

    pub fn on_config_change(&mut self, category: Option<Category>) {
        info!(
            category = category.map(|c| c.id()).unwrap_or("<unset>"),
            "Category changed"
        );
        self.state.set_category(category);
    }

    /// Move to `Fetching` and return the category to fetch.
    ///
    /// Returns `None` when a fetch is already in flight.
    pub fn begin_fetch(&mut self) -> Option<Category> {
        if self.phase == Phase::Fetching {
            debug!("Fetch already in flight, ignoring trigger");
            return None;
        }

        let category = self.state.resolved_category().unwrap_or_else(|err| {
            debug!(%err, "Falling back to default category");
            Category::default()
        });

        self.phase = Phase::Fetching;
        Some(category)
    }

    /// Finish a fetch started with [`begin_fetch`](Self::begin_fetch).
    ///
    /// State only changes on success; errors are logged and handed back.
    pub fn complete_fetch(&mut self, result: Result<Quote, FetchError>) -> FetchOutcome {
        self.phase = Phase::Idle;

        match result {
            Ok(quote) => {
                self.state.set_quote(quote.clone());
                FetchOutcome::Updated(quote)
            }
            Err(err) => {
                warn!(kind = ?err.kind(), "Keeping previous quote: {}", err);
                FetchOutcome::Failed(err)
            }
        }
    }

    /// Return to `Idle` when a fetch task died without a result.
    pub fn abandon_fetch(&mut self) {
        if self.phase == Phase::Fetching {
            warn!("Fetch task ended without a result");
        }
        self.phase = Phase::Idle;
    }

    /// Fetch the next quote for the selected category and store it.
    pub async fn on_user_action(&mut self) -> FetchOutcome {
        let Some(category) = self.begin_fetch() else {
            return FetchOutcome::Skipped;
        };

        let result = self.source.fetch(category).await;
        self.complete_fetch(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Plays back canned results and records what was asked for.
    struct ScriptedSource {
        responses: Mutex<VecDeque<Result<Quote, FetchError>>>,
        requested: Mutex<Vec<Category>>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<Quote, FetchError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn requested(&self) -> Vec<Category> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl QuoteSource for ScriptedSource {
        async fn fetch(&self, category: Category) -> Result<Quote, FetchError> {
            self.requested.lock().unwrap().push(category);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(FetchError::EmptyResponse))
        }
    }

    fn at(hour: u32, min: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 10, 26, hour, min, 0).unwrap()
    }

    #[tokio::test]
    async fn test_user_action_updates_quote() {
        let source = ScriptedSource::new(vec![Ok(Quote::new("Hello", "World"))]);
        let mut scheduler = RefreshScheduler::new(source);

        let outcome = scheduler.on_user_action().await;

        assert!(outcome.is_updated());
        assert_eq!(scheduler.state().quote(), &Quote::new("Hello", "World"));
        assert_eq!(scheduler.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_quote() {
        let source = ScriptedSource::new(vec![
            Ok(Quote::new("Hello", "World")),
            Err(FetchError::EmptyResponse),
            Err(serde_json::from_str::<Vec<Quote>>("[{").unwrap_err().into()),
        ]);
        let mut scheduler = RefreshScheduler::new(source);

        scheduler.on_user_action().await;
        let empty = scheduler.on_user_action().await;
        let malformed = scheduler.on_user_action().await;

        assert!(matches!(empty, FetchOutcome::Failed(FetchError::EmptyResponse)));
        assert!(matches!(malformed, FetchOutcome::Failed(FetchError::Decode(_))));
        assert_eq!(scheduler.state().quote(), &Quote::new("Hello", "World"));
        assert_eq!(scheduler.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_failure_before_any_success_keeps_default() {
        let source = ScriptedSource::new(vec![Err(FetchError::EmptyResponse)]);
        let mut scheduler = RefreshScheduler::new(source);

        scheduler.on_user_action().await;

        assert_eq!(scheduler.state().quote(), &Quote::default());
    }

    #[tokio::test]
    async fn test_repeated_identical_fetch_is_idempotent() {
        let quote = Quote::new("Same", "Author");
        let source = ScriptedSource::new(vec![Ok(quote.clone()), Ok(quote.clone())]);
        let mut scheduler = RefreshScheduler::new(source);

        scheduler.on_user_action().await;
        let once = scheduler.state().clone();
        scheduler.on_user_action().await;

        assert_eq!(scheduler.state(), &once);
        assert_eq!(scheduler.state().quote(), &quote);
    }

    #[tokio::test]
    async fn test_config_change_drives_next_fetch() {
        let source = ScriptedSource::new(vec![
            Ok(Quote::new("a", "b")),
            Ok(Quote::new("c", "d")),
            Ok(Quote::new("e", "f")),
        ]);
        let mut scheduler = RefreshScheduler::new(source);

        scheduler.on_user_action().await;
        scheduler.on_config_change(Some(Category::Family));
        scheduler.on_user_action().await;
        scheduler.on_config_change(None);
        scheduler.on_user_action().await;

        assert_eq!(
            scheduler.source().requested(),
            vec![Category::Art, Category::Family, Category::Art]
        );
    }

    #[test]
    fn test_second_trigger_while_fetching_is_skipped() {
        let mut scheduler = RefreshScheduler::new(ScriptedSource::new(vec![]));

        assert_eq!(scheduler.begin_fetch(), Some(Category::Art));
        assert_eq!(scheduler.phase(), Phase::Fetching);
        assert_eq!(scheduler.begin_fetch(), None);

        let outcome = scheduler.complete_fetch(Ok(Quote::new("x", "y")));
        assert!(outcome.is_updated());
        assert_eq!(scheduler.phase(), Phase::Idle);
        assert!(scheduler.begin_fetch().is_some());
    }

    #[test]
    fn test_abandon_returns_to_idle() {
        let mut scheduler = RefreshScheduler::new(ScriptedSource::new(vec![]));
        scheduler.begin_fetch();
        scheduler.abandon_fetch();
        assert_eq!(scheduler.phase(), Phase::Idle);
        assert_eq!(scheduler.state().quote(), &Quote::default());
    }

    #[test]
    fn test_tick_rereads_state_without_fetching() {
        let mut scheduler = RefreshScheduler::new(ScriptedSource::new(vec![]));
        scheduler.begin_fetch();
        scheduler.complete_fetch(Ok(Quote::new("Hello", "World")));

        let timeline = scheduler.on_tick(at(9, 0));

        assert_eq!(timeline.entries.len(), 1);
        assert_eq!(timeline.entries[0].quote, Quote::new("Hello", "World"));
        assert_eq!(timeline.entries[0].date, at(9, 0));
        assert_eq!(timeline.refresh_after, at(10, 0));
        assert!(scheduler.source().requested().is_empty());
    }

    #[test]
    fn test_refresh_due_hourly() {
        let mut scheduler = RefreshScheduler::new(ScriptedSource::new(vec![]));
        assert!(scheduler.is_refresh_due(at(9, 0)));

        scheduler.on_tick(at(9, 0));
        assert!(!scheduler.is_refresh_due(at(9, 59)));
        assert!(scheduler.is_refresh_due(at(10, 0)));
    }

    #[test]
    fn test_custom_refresh_interval() {
        let mut scheduler =
            RefreshScheduler::new(ScriptedSource::new(vec![])).with_refresh_interval(60);
        let timeline = scheduler.on_tick(at(9, 0));
        assert_eq!(timeline.refresh_after, at(9, 1));
    }

    #[test]
    fn test_placeholder_follows_current_quote() {
        let mut scheduler = RefreshScheduler::new(ScriptedSource::new(vec![]));
        assert_eq!(scheduler.placeholder(at(9, 0)).quote, Quote::default());

        scheduler.on_config_change(Some(Category::Beauty));
        scheduler.begin_fetch();
        scheduler.complete_fetch(Ok(Quote::new("Hello", "World")));

        let placeholder = scheduler.placeholder(at(9, 0));
        assert_eq!(placeholder.quote, Quote::new("Hello", "World"));
        assert_eq!(placeholder.category, Category::Art);

        let snapshot = scheduler.snapshot(at(9, 0));
        assert_eq!(snapshot.quote, Quote::new("Hello", "World"));
        assert_eq!(snapshot.category, Category::Beauty);
    }
}
