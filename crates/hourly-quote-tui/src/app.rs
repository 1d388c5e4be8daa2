use chrono::Local;
use hourly_quote_core::{
    Category, Config, FetchError, Phase, Quote, QuoteClient, QuoteEntry, QuoteSource, QuoteState,
    RefreshScheduler,
};
use ratatui::widgets::ListState;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Scheduler wired to the quotes API as described by `config`.
pub fn build_scheduler(config: &Config) -> RefreshScheduler<QuoteClient> {
    let api_key = config.resolve_api_key().unwrap_or_else(|| {
        warn!("No API key configured; quote requests will be rejected");
        String::new()
    });
    let client = QuoteClient::with_base_url(config.base_url(), &api_key);

    let mut state = QuoteState::new();
    state.set_category(config.selected_category());

    RefreshScheduler::with_state(client, state).with_refresh_interval(config.refresh_interval_secs())
}

pub struct App {
    pub should_quit: bool,

    // Widget state
    pub scheduler: RefreshScheduler<QuoteClient>,
    pub entry: QuoteEntry,
    pub fetch_task: Option<JoinHandle<Result<Quote, FetchError>>>,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Category picker state
    pub show_category_picker: bool,
    pub category_picker_state: ListState,

    /// Write category changes back to the config file
    pub persist_config: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let scheduler = build_scheduler(config);
        let entry = scheduler.placeholder(Local::now());

        let mut app = Self {
            should_quit: false,
            scheduler,
            entry,
            fetch_task: None,
            animation_frame: 0,
            show_category_picker: false,
            category_picker_state: ListState::default(),
            persist_config: true,
        };
        app.reload_timeline();
        app
    }

    pub fn is_fetching(&self) -> bool {
        self.scheduler.phase() == Phase::Fetching
    }

    /// Re-read state into the displayed entry and restart the hourly clock.
    pub fn reload_timeline(&mut self) {
        let timeline = self.scheduler.on_tick(Local::now());
        if let Some(entry) = timeline.entries.into_iter().next() {
            self.entry = entry;
        }
    }

    /// Called on every tick event.
    pub async fn tick(&mut self) {
        if self.is_fetching() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }

        self.poll_fetch().await;

        if self.scheduler.is_refresh_due(Local::now()) {
            self.reload_timeline();
        }
    }

    /// Start fetching the next quote in the background.
    pub fn request_next(&mut self) {
        let Some(category) = self.scheduler.begin_fetch() else {
            return;
        };

        let source = self.scheduler.source();
        self.animation_frame = 0;
        self.fetch_task = Some(tokio::spawn(async move { source.fetch(category).await }));
    }

    /// Collect the background fetch once it has finished.
    pub async fn poll_fetch(&mut self) {
        let finished = self
            .fetch_task
            .as_ref()
            .is_some_and(|task| task.is_finished());
        if !finished {
            return;
        }

        let Some(task) = self.fetch_task.take() else {
            return;
        };

        match task.await {
            Ok(result) => {
                if self.scheduler.complete_fetch(result).is_updated() {
                    self.reload_timeline();
                }
            }
            Err(e) => {
                warn!("Fetch task failed: {}", e);
                self.scheduler.abandon_fetch();
            }
        }
    }

    pub fn open_category_picker(&mut self) {
        let current = self.scheduler.state().category().index();
        self.category_picker_state.select(Some(current));
        self.show_category_picker = true;
    }

    pub fn category_picker_nav_down(&mut self) {
        let len = Category::all().len();
        let i = self.category_picker_state.selected().unwrap_or(0);
        self.category_picker_state.select(Some((i + 1).min(len - 1)));
    }

    pub fn category_picker_nav_up(&mut self) {
        let i = self.category_picker_state.selected().unwrap_or(0);
        self.category_picker_state.select(Some(i.saturating_sub(1)));
    }

    /// Apply the highlighted category and close the picker.
    pub fn confirm_category(&mut self) {
        let picked = self
            .category_picker_state
            .selected()
            .and_then(|i| Category::all().get(i).copied());

        if let Some(category) = picked {
            self.set_category(Some(category));
        }
        self.show_category_picker = false;
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.scheduler.on_config_change(category);
        self.reload_timeline();

        if self.persist_config {
            match Config::save_category(category) {
                Ok(()) => info!("Saved category to config"),
                Err(e) => warn!("Could not save category: {}", e),
            }
        }
    }
}
