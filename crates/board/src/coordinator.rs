use std::sync::Arc;

use postboard_api::Error as ApiError;
use postboard_types::post::{Category, Post, PostsPage, SortField, SortOrder};
use tokio::{
    sync::mpsc,
    time::{Duration, Instant},
};
use tracing::{debug, error, info};

use super::{
    debounce::Debouncer,
    error::{self, Error},
    form::PostForm,
    list::{Completion, FetchFailure, FetchRequest, ListState, Status, Ticket},
    query::{DateRange, QueryDescriptor},
    sort::Sort,
    source::PostsApi,
};

/// Configuration for the post board.
/// page_size: Posts requested per page. (default: 10)
/// search_debounce_ms: Quiet time before typed search text is applied. (default: 300)
#[derive(Debug, Clone, Default)]
pub struct BoardConfig {
    pub page_size: Option<u32>,
    pub search_debounce_ms: Option<u64>,
}

impl BoardConfig {
    const DEFAULT_PAGE_SIZE: u32 = 10;
    const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

    pub fn new(page_size: Option<u32>, search_debounce_ms: Option<u64>) -> Self {
        BoardConfig {
            page_size,
            search_debounce_ms,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(Self::DEFAULT_PAGE_SIZE)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(
            self.search_debounce_ms
                .unwrap_or(Self::DEFAULT_SEARCH_DEBOUNCE_MS),
        )
    }
}

struct Outcome {
    ticket: Ticket,
    result: Result<PostsPage, ApiError>,
}

/// Drives the post list: turns filter, sort and search input into fetches,
/// runs them on spawned tasks and applies their results one at a time.
///
/// Must be used inside a tokio runtime. Nothing is cancelled when the query
/// changes; late results from an old query are recognised by their ticket
/// and dropped in `settle`.
pub struct Coordinator<A> {
    api: Arc<A>,
    list: ListState,
    search: Debouncer<String>,
    search_input: String,
    outstanding: usize,
    outcomes_tx: mpsc::UnboundedSender<Outcome>,
    outcomes_rx: mpsc::UnboundedReceiver<Outcome>,
}

impl<A: PostsApi> Coordinator<A> {
    pub fn new(api: Arc<A>, cfg: BoardConfig) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        Self {
            api,
            list: ListState::new(QueryDescriptor::new(cfg.page_size())),
            search: Debouncer::new(cfg.search_debounce()),
            search_input: String::new(),
            outstanding: 0,
            outcomes_tx,
            outcomes_rx,
        }
    }

    pub fn descriptor(&self) -> &QueryDescriptor {
        self.list.descriptor()
    }

    pub fn items(&self) -> &[Post] {
        self.list.items()
    }

    pub fn status(&self) -> Status {
        self.list.status()
    }

    pub fn error(&self) -> Option<&FetchFailure> {
        self.list.error()
    }

    pub fn error_message(&self) -> Option<String> {
        self.list
            .error()
            .map(|failure| error::list_load_message(&failure.error))
    }

    /// Raw search text, including keystrokes not yet applied.
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn is_search_pending(&self) -> bool {
        self.search.is_pending()
    }

    pub fn sort_order(&self, field: SortField) -> Option<SortOrder> {
        Sort::order_of(self.descriptor().sort, field)
    }

    pub fn start(&mut self) -> bool {
        let req = self.list.start();
        self.dispatch_opt(req)
    }

    pub fn set_search_input(&mut self, text: impl Into<String>) {
        self.set_search_input_at(text, Instant::now());
    }

    pub fn set_search_input_at(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        self.search_input = text.clone();
        self.search.input(text, now);
    }

    /// Applies the search text once it has been stable for the debounce window.
    /// Returns whether a fetch was issued.
    pub fn poll_search(&mut self, now: Instant) -> bool {
        match self.search.poll(now) {
            Some(text) => {
                let descriptor = self.descriptor().clone().with_search(&text);
                self.apply(descriptor)
            }
            None => false,
        }
    }

    /// Sleeps until the pending search text settles, then applies it.
    pub async fn settle_search(&mut self) -> bool {
        let Some(deadline) = self.search.deadline() else {
            return false;
        };
        tokio::time::sleep_until(deadline).await;
        self.poll_search(Instant::now())
    }

    pub fn set_category(&mut self, category: Option<Category>) -> bool {
        let descriptor = self.descriptor().clone().with_category(category);
        self.apply(descriptor)
    }

    /// Advances the sort cycle of `field`; see `Sort::cycle`.
    pub fn toggle_sort(&mut self, field: SortField) -> bool {
        let sort = Sort::cycle(self.descriptor().sort, field);
        let descriptor = self.descriptor().clone().with_sort(sort);
        self.apply(descriptor)
    }

    pub fn set_date_range(&mut self, range: DateRange) -> bool {
        let descriptor = self.descriptor().clone().with_date_range(range);
        self.apply(descriptor)
    }

    pub fn fetch_next_page(&mut self) -> bool {
        let req = self.list.fetch_next_page();
        self.dispatch_opt(req)
    }

    pub fn retry(&mut self) -> bool {
        let req = self.list.retry();
        self.dispatch_opt(req)
    }

    pub fn refresh(&mut self) {
        let req = self.list.refresh();
        self.dispatch(req);
    }

    /// Waits for the next fetch to finish and applies it.
    /// Returns `None` when no fetch is outstanding.
    pub async fn settle(&mut self) -> Option<Completion> {
        if self.outstanding == 0 {
            return None;
        }
        let outcome = self.outcomes_rx.recv().await?;
        Some(self.apply_outcome(outcome))
    }

    pub async fn settle_all(&mut self) {
        while self.settle().await.is_some() {}
    }

    /// Applies every result that has already arrived, without waiting.
    pub fn drain(&mut self) -> Vec<Completion> {
        let mut applied = vec![];
        while let Ok(outcome) = self.outcomes_rx.try_recv() {
            applied.push(self.apply_outcome(outcome));
        }
        applied
    }

    /// Creates a post, or updates `target` when given, then refreshes the list.
    /// Validation failures never reach the API.
    pub async fn save(&mut self, form: &PostForm, target: Option<&str>) -> Result<Post, Error> {
        let req = form.validate()?;
        let result = match target {
            Some(id) => self.api.update_post(id.to_string(), req.into()).await,
            None => self.api.create_post(req).await,
        };
        let post = result.map_err(Error::Action)?;
        info!("Saved post {}", post.id);
        self.refresh();
        Ok(post)
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), Error> {
        self.api
            .delete_post(id.to_string())
            .await
            .map_err(Error::Action)?;
        info!("Deleted post {}", id);
        self.refresh();
        Ok(())
    }

    fn apply(&mut self, descriptor: QueryDescriptor) -> bool {
        let req = self.list.set_descriptor(descriptor);
        self.dispatch_opt(req)
    }

    fn apply_outcome(&mut self, outcome: Outcome) -> Completion {
        self.outstanding = self.outstanding.saturating_sub(1);
        self.list.complete(outcome.ticket, outcome.result)
    }

    fn dispatch_opt(&mut self, req: Option<FetchRequest>) -> bool {
        match req {
            Some(req) => {
                self.dispatch(req);
                true
            }
            None => false,
        }
    }

    fn dispatch(&mut self, req: FetchRequest) {
        debug!(
            "Dispatching {:?} fetch, generation {}",
            req.ticket.kind(),
            req.ticket.generation()
        );
        let api = Arc::clone(&self.api);
        let tx = self.outcomes_tx.clone();
        self.outstanding += 1;
        tokio::spawn(async move {
            let result = api.list_posts(req.params).await;
            if let Err(e) = tx.send(Outcome {
                ticket: req.ticket,
                result,
            }) {
                error!("Error sending fetch result: {}", e);
            }
        });
    }
}
