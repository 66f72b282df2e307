use postboard_api::Error as ApiError;
use postboard_types::post::{Post, PostsPage, PostsParams};
use tracing::{debug, warn};

use super::query::QueryDescriptor;

/// Where the next page starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CursorState {
    Start,
    Next(String),
    Exhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchKind {
    /// First page, nothing has been shown yet.
    Initial,
    /// First page replacing what the board already showed.
    Refresh,
    NextPage,
}

impl FetchKind {
    pub fn is_first_page(&self) -> bool {
        !matches!(self, FetchKind::NextPage)
    }
}

/// Identifies an issued fetch. Results are applied only while the ticket is current.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    kind: FetchKind,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn kind(&self) -> FetchKind {
        self.kind
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: Ticket,
    pub params: PostsParams,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Status {
    pub is_loading: bool,
    pub is_refreshing: bool,
    pub is_fetching_next_page: bool,
    pub has_next_page: bool,
    pub is_exhausted: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Failed,
    Stale,
}

#[derive(Debug)]
pub struct FetchFailure {
    pub kind: FetchKind,
    pub error: ApiError,
}

/// Aggregated list for one query descriptor at a time.
///
/// This is the I/O-free half of the board: it hands out `FetchRequest`s and
/// takes their results back through `complete`. Each descriptor change or
/// refresh starts a new generation; results from older generations are dropped.
#[derive(Debug)]
pub struct ListState {
    descriptor: QueryDescriptor,
    generation: u64,
    items: Vec<Post>,
    pages: usize,
    cursor: CursorState,
    prev_cursor: Option<String>,
    in_flight: Option<Ticket>,
    shown: bool,
    error: Option<FetchFailure>,
}

impl ListState {
    pub fn new(descriptor: QueryDescriptor) -> Self {
        Self {
            descriptor,
            generation: 0,
            items: vec![],
            pages: 0,
            cursor: CursorState::Start,
            prev_cursor: None,
            in_flight: None,
            shown: false,
            error: None,
        }
    }

    pub fn descriptor(&self) -> &QueryDescriptor {
        &self.descriptor
    }

    pub fn items(&self) -> &[Post] {
        &self.items
    }

    pub fn page_count(&self) -> usize {
        self.pages
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    pub fn prev_cursor(&self) -> Option<&str> {
        self.prev_cursor.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn error(&self) -> Option<&FetchFailure> {
        self.error.as_ref()
    }

    pub fn status(&self) -> Status {
        let kind = self.in_flight.map(|t| t.kind);
        Status {
            is_loading: kind == Some(FetchKind::Initial),
            is_refreshing: kind == Some(FetchKind::Refresh),
            is_fetching_next_page: kind == Some(FetchKind::NextPage),
            has_next_page: matches!(self.cursor, CursorState::Next(_)),
            is_exhausted: self.cursor == CursorState::Exhausted,
        }
    }

    /// Issues the first fetch unless something is loaded or in flight.
    pub fn start(&mut self) -> Option<FetchRequest> {
        if self.in_flight.is_some() || self.pages > 0 {
            return None;
        }
        Some(self.issue_first_page())
    }

    /// Switches to `descriptor`, dropping every loaded page.
    /// Returns `None` when the descriptor did not change.
    pub fn set_descriptor(&mut self, descriptor: QueryDescriptor) -> Option<FetchRequest> {
        if descriptor == self.descriptor {
            return None;
        }
        debug!("Query changed: {:?}", descriptor);
        self.descriptor = descriptor;
        self.generation += 1;
        self.items.clear();
        self.pages = 0;
        self.cursor = CursorState::Start;
        self.prev_cursor = None;
        Some(self.issue_first_page())
    }

    /// Refetches the first page of the current descriptor.
    /// Loaded items stay visible until the new first page replaces them.
    pub fn refresh(&mut self) -> FetchRequest {
        self.generation += 1;
        self.issue_first_page()
    }

    /// No-op while a fetch is in flight or when no forward cursor is known.
    pub fn fetch_next_page(&mut self) -> Option<FetchRequest> {
        if self.in_flight.is_some() {
            return None;
        }
        let CursorState::Next(cursor) = &self.cursor else {
            return None;
        };
        let params = self.descriptor.params(Some(cursor));
        let ticket = Ticket {
            generation: self.generation,
            kind: FetchKind::NextPage,
        };
        self.in_flight = Some(ticket);
        self.error = None;
        Some(FetchRequest { ticket, params })
    }

    /// Repeats whatever failed last.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        let kind = self.error.as_ref()?.kind;
        if kind.is_first_page() {
            if self.in_flight.is_some() {
                return None;
            }
            Some(self.issue_first_page())
        } else {
            self.fetch_next_page()
        }
    }

    pub fn complete(&mut self, ticket: Ticket, result: Result<PostsPage, ApiError>) -> Completion {
        if ticket.generation != self.generation || self.in_flight != Some(ticket) {
            debug!(
                "Discarding stale {:?} result from generation {} (current {})",
                ticket.kind, ticket.generation, self.generation
            );
            return Completion::Stale;
        }
        self.in_flight = None;
        match result {
            Ok(page) => {
                debug!(
                    "Applying {:?} page with {} posts, last: {}",
                    ticket.kind,
                    page.items.len(),
                    page.is_last()
                );
                if ticket.kind.is_first_page() {
                    self.items = page.items;
                    self.pages = 1;
                    self.prev_cursor = page.prev_cursor;
                } else {
                    self.items.extend(page.items);
                    self.pages += 1;
                }
                self.cursor = match page.next_cursor {
                    Some(cursor) => CursorState::Next(cursor),
                    None => CursorState::Exhausted,
                };
                self.shown = true;
                Completion::Applied
            }
            Err(error) => {
                warn!("{:?} fetch failed: {}", ticket.kind, error);
                if ticket.kind.is_first_page() {
                    self.items.clear();
                    self.pages = 0;
                    self.cursor = CursorState::Start;
                }
                self.error = Some(FetchFailure {
                    kind: ticket.kind,
                    error,
                });
                Completion::Failed
            }
        }
    }

    fn issue_first_page(&mut self) -> FetchRequest {
        let kind = if self.shown {
            FetchKind::Refresh
        } else {
            FetchKind::Initial
        };
        let ticket = Ticket {
            generation: self.generation,
            kind,
        };
        self.in_flight = Some(ticket);
        self.error = None;
        FetchRequest {
            ticket,
            params: self.descriptor.params(None),
        }
    }
}
