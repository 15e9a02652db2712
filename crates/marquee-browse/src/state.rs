//! Sans-IO pagination state machine.
//!
//! Every operation is split in two: a `begin_*` call that decides whether a
//! request may be issued and hands out a [`PageRequest`] ticket, and
//! [`ListState::finish`] which applies the outcome of that ticket. The
//! caller owns the I/O in between.

use std::fmt;

use marquee_api::catalog::Page;

use crate::source::ListSource;

/// Current activity of a list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// First page in flight.
    Loading {
        /// Requested page.
        page: u32,
    },
    /// Last request succeeded.
    Loaded,
    /// A follow-up page in flight.
    LoadingMore {
        /// Requested page.
        page: u32,
    },
    /// Page 1 being re-fetched while the old items stay visible.
    Refreshing,
    /// Last request failed.
    Failed {
        /// Human-readable failure.
        message: String,
    },
}

/// Which operation produced a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// `start` or `retry`.
    Start,
    /// `load_more`.
    LoadMore,
    /// `refresh`.
    Refresh,
}

/// Ticket for one page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    id: u64,
    kind: RequestKind,
    page: u32,
    generation: u64,
    source: ListSource,
}

impl PageRequest {
    /// Unique ticket number.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Operation that issued the ticket.
    #[must_use]
    pub const fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Page to fetch.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Generation the ticket belongs to.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Source to fetch from.
    #[must_use]
    pub const fn source(&self) -> &ListSource {
        &self.source
    }
}

/// Accumulated items and pagination cursor of one list.
#[derive(Debug, Clone)]
pub struct ListState<T> {
    source: Option<ListSource>,
    items: Vec<T>,
    current_page: u32,
    total_pages: u32,
    phase: Phase,
    generation: u64,
    next_ticket: u64,
    in_flight: Option<u64>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            source: None,
            items: Vec::new(),
            current_page: 0,
            total_pages: 0,
            phase: Phase::Idle,
            generation: 0,
            next_ticket: 0,
            in_flight: None,
        }
    }
}

impl<T> ListState<T> {
    /// Creates an idle, empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins loading page 1 of `source`.
    ///
    /// Returns `None` while a fetch is in flight. Switching to a different
    /// source drops the current items.
    pub fn begin_start(&mut self, source: ListSource) -> Option<PageRequest> {
        if self.is_busy() {
            return None;
        }
        if self.source.as_ref() != Some(&source) {
            self.items.clear();
            self.current_page = 0;
            self.total_pages = 0;
            self.bump_generation();
            self.source = Some(source);
        }
        self.phase = Phase::Loading { page: 1 };
        self.ticket(RequestKind::Start, 1)
    }

    /// Begins re-fetching page 1 of the current source with start semantics.
    pub fn begin_retry(&mut self) -> Option<PageRequest> {
        let source = self.source.clone()?;
        self.begin_start(source)
    }

    /// Begins loading the page after `current_page`.
    ///
    /// Returns `None` while a fetch is in flight, when no source is
    /// selected, or when the server reported no further pages.
    pub fn begin_load_more(&mut self) -> Option<PageRequest> {
        if self.is_busy() || self.source.is_none() || !self.has_more() {
            return None;
        }
        let page = self.current_page.checked_add(1)?;
        self.phase = Phase::LoadingMore { page };
        self.ticket(RequestKind::LoadMore, page)
    }

    /// Begins re-fetching page 1, superseding any in-flight load-more.
    pub fn begin_refresh(&mut self) -> Option<PageRequest> {
        if self.source.is_none()
            || matches!(self.phase, Phase::Refreshing | Phase::Loading { .. })
        {
            return None;
        }
        self.bump_generation();
        self.phase = Phase::Refreshing;
        self.ticket(RequestKind::Refresh, 1)
    }

    /// Applies the outcome of `request`.
    ///
    /// Returns `false` (leaving the state untouched) unless `request` is the
    /// outstanding ticket. Each ticket applies at most once.
    pub fn finish<E: fmt::Display>(
        &mut self,
        request: &PageRequest,
        result: Result<Page<T>, E>,
    ) -> bool {
        if self.in_flight != Some(request.id) || request.generation != self.generation {
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(page) => {
                match request.kind {
                    RequestKind::Start | RequestKind::Refresh => {
                        self.items = page.results;
                        self.current_page = 1;
                    }
                    RequestKind::LoadMore => {
                        self.items.extend(page.results);
                        self.current_page = request.page;
                    }
                }
                self.total_pages = page.total_pages;
                self.phase = Phase::Loaded;
            }
            Err(e) => {
                let mut message = e.to_string();
                if message.is_empty() {
                    message = format!("failed to load page {}", request.page);
                }
                self.phase = Phase::Failed { message };
            }
        }
        true
    }

    /// Drops items and source and returns to `Idle`.
    pub fn reset(&mut self) {
        self.bump_generation();
        self.in_flight = None;
        self.source = None;
        self.items.clear();
        self.current_page = 0;
        self.total_pages = 0;
        self.phase = Phase::Idle;
    }

    /// Accumulated items, in arrival order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Last successfully loaded page (0 before the first success).
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Total pages reported by the last successful response.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Whether a further page exists.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether a first-page or follow-up load is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. } | Phase::LoadingMore { .. })
    }

    /// Whether a refresh is in flight.
    #[must_use]
    pub const fn is_refreshing(&self) -> bool {
        matches!(self.phase, Phase::Refreshing)
    }

    /// Whether any request is in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.is_loading() || self.is_refreshing()
    }

    /// Message of the last failure, while in `Failed`.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Selected source, if any.
    #[must_use]
    pub const fn source(&self) -> Option<&ListSource> {
        self.source.as_ref()
    }

    const fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    fn ticket(&mut self, kind: RequestKind, page: u32) -> Option<PageRequest> {
        let source = self.source.clone()?;
        let id = self.next_ticket;
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.in_flight = Some(id);
        Some(PageRequest {
            id,
            kind,
            page,
            generation: self.generation,
            source,
        })
    }
}
