//! Users table controller.
//!
//! Owns one list view: the fetched page, the filtered rows, pagination and
//! the error shown in place of the table. Phases go `Idle → Loading → Idle`;
//! a failed load leaves [`UsersTableController::error`] set and keeps the
//! previously filtered rows.
//!
//! Every load takes a [`CancellationToken`]. A token cancelled before the
//! fetch settles discards the result and leaves state untouched.
//!
//! Search only filters the page already loaded. It never calls the gateway,
//! so matches on other pages stay invisible.

use std::sync::Arc;

use pagination::{
    DEFAULT_PAGE_CAP, DEFAULT_PAGE_SIZE, PageInput, PageNumber, PageRequest, PageWindow,
    total_pages,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::domain::ports::UsersGateway;
use crate::domain::transform::transform_users_list;
use crate::domain::{Locale, Route, UserId, UserMessage, UserView};

/// Page size and navigation cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSettings {
    page_size: u32,
    page_cap: u32,
}

impl TableSettings {
    /// Both values are raised to at least one.
    #[must_use]
    pub fn new(page_size: u32, page_cap: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            page_cap: page_cap.max(1),
        }
    }

    /// Records per page.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Maximum navigable pages.
    #[must_use]
    pub fn page_cap(&self) -> u32 {
        self.page_cap
    }
}

impl Default for TableSettings {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_PAGE_CAP)
    }
}

/// Lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TablePhase {
    /// No fetch outstanding.
    Idle,
    /// A fetch is outstanding.
    Loading,
}

/// How a load ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page was fetched and applied.
    Applied,
    /// The fetch failed; the error message is set.
    Failed,
    /// The view was torn down first; nothing changed.
    Discarded,
}

/// Result of submitting the page-number entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInputResult {
    /// Page the entry shows afterwards.
    pub input: PageInput,
    /// Outcome of the fetch, when the input triggered one.
    pub outcome: Option<LoadOutcome>,
}

/// State of one list view.
pub struct UsersTableController {
    gateway: Arc<dyn UsersGateway>,
    settings: TableSettings,
    current_page: PageNumber,
    total_pages: Option<u32>,
    users: Vec<UserView>,
    filtered: Vec<UserView>,
    query: String,
    phase: TablePhase,
    error: Option<UserMessage>,
    last_updated: Option<UserId>,
}

impl UsersTableController {
    /// A controller on the first page with nothing loaded.
    #[must_use]
    pub fn new(gateway: Arc<dyn UsersGateway>, settings: TableSettings) -> Self {
        Self {
            gateway,
            settings,
            current_page: PageNumber::FIRST,
            total_pages: None,
            users: Vec::new(),
            filtered: Vec::new(),
            query: String::new(),
            phase: TablePhase::Idle,
            error: None,
            last_updated: None,
        }
    }

    /// Fetch the current page.
    pub async fn load(&mut self, token: &CancellationToken) -> LoadOutcome {
        let page = self.current_page;
        let request = match PageRequest::new(page, self.settings.page_size) {
            Ok(request) => request,
            Err(err) => {
                error!(error = %err, "invalid page request");
                self.error = Some(UserMessage::LoadUsersFailed);
                return LoadOutcome::Failed;
            }
        };

        self.phase = TablePhase::Loading;
        self.error = None;
        let gateway = Arc::clone(&self.gateway);
        let result = tokio::select! {
            biased;
            () = token.cancelled() => None,
            result = gateway.list(request.limit(), request.skip()) => Some(result),
        };
        self.phase = TablePhase::Idle;

        let Some(result) = result.filter(|_| !token.is_cancelled()) else {
            debug!(page = %page, "users fetch discarded after teardown");
            return LoadOutcome::Discarded;
        };

        match result {
            Ok(fetched) => {
                self.users = transform_users_list(fetched.users);
                self.total_pages = Some(total_pages(fetched.total, self.settings.page_size));
                self.refilter();
                LoadOutcome::Applied
            }
            Err(err) => {
                error!(error = %err, page = %page, skip = request.skip(), "failed to fetch users");
                self.error = Some(UserMessage::LoadUsersFailed);
                LoadOutcome::Failed
            }
        }
    }

    /// Re-run the same fetch after a failure.
    pub async fn retry(&mut self, token: &CancellationToken) -> LoadOutcome {
        self.load(token).await
    }

    /// Seed the page count from an earlier render, so [`Self::open_page`]
    /// and [`Self::resolve_page_input`] can check the window before fetching.
    pub fn restore_total_pages(&mut self, total: u32) {
        self.total_pages = Some(total.max(1));
    }

    /// Open `page` directly.
    ///
    /// A page beyond the navigable window falls back to the first page. Pages
    /// past the cap, or past a known total, are redirected before fetching.
    /// Without a known total a page past the real total costs one extra
    /// fetch once the total arrives.
    pub async fn open_page(&mut self, page: PageNumber, token: &CancellationToken) -> LoadOutcome {
        if !self.assumed_window(page).contains(page.get()) {
            debug!(page = %page, "page outside window, opening the first page");
            self.current_page = PageNumber::FIRST;
            return self.load(token).await;
        }
        self.current_page = page;
        let outcome = self.load(token).await;
        if outcome == LoadOutcome::Applied && !self.window().contains(page.get()) {
            debug!(page = %page, navigable = self.window().navigable_pages(), "page outside window");
            self.current_page = PageNumber::FIRST;
            return self.load(token).await;
        }
        outcome
    }

    /// Interpret page-entry text submitted from page `from` without fetching.
    ///
    /// Uses the known total, or the cap when nothing is known yet.
    #[must_use]
    pub fn resolve_page_input(&self, from: PageNumber, input: &str) -> PageInput {
        self.assumed_window(from).resolve_input(input)
    }

    fn assumed_window(&self, current: PageNumber) -> PageWindow {
        let total = self.total_pages.unwrap_or(self.settings.page_cap);
        PageWindow::new(current, total, self.settings.page_cap)
    }

    /// Move to `page` from a first/previous/next/last control.
    ///
    /// Returns `None` without fetching when `page` is current or outside the
    /// navigable window.
    pub async fn go_to_page(
        &mut self,
        page: PageNumber,
        token: &CancellationToken,
    ) -> Option<LoadOutcome> {
        if page == self.current_page || !self.window().contains(page.get()) {
            return None;
        }
        self.current_page = page;
        Some(self.load(token).await)
    }

    /// Handle Enter in the page-number entry.
    ///
    /// Invalid or out-of-range text reverts to the current page without
    /// fetching and without raising an error.
    pub async fn submit_page_input(
        &mut self,
        input: &str,
        token: &CancellationToken,
    ) -> PageInputResult {
        let resolved = self.window().resolve_input(input);
        let outcome = match resolved {
            PageInput::Jump(page) => self.go_to_page(page, token).await,
            PageInput::Revert(_) => None,
        };
        PageInputResult {
            input: resolved,
            outcome,
        }
    }

    /// Record a mutation of `id` and refetch.
    pub async fn notify_mutation(&mut self, id: UserId, token: &CancellationToken) -> LoadOutcome {
        self.last_updated = Some(id);
        self.load(token).await
    }

    /// Filter the loaded page. No network call is made.
    ///
    /// Surrounding whitespace is dropped from `query` before it is stored.
    pub fn search(&mut self, query: &str) {
        query.trim().clone_into(&mut self.query);
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = filter_users(&self.users, &self.query);
    }

    /// Window over the pages.
    #[must_use]
    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.current_page, self.total_pages(), self.settings.page_cap)
    }

    /// Page being shown.
    #[must_use]
    pub fn current_page(&self) -> PageNumber {
        self.current_page
    }

    /// Pages that exist upstream.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.total_pages.unwrap_or(1)
    }

    /// Every user on the loaded page.
    #[must_use]
    pub fn users(&self) -> &[UserView] {
        &self.users
    }

    /// Users matching the search query.
    #[must_use]
    pub fn visible_users(&self) -> &[UserView] {
        &self.filtered
    }

    /// Active search query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> TablePhase {
        self.phase
    }

    /// Message replacing the table after a failed load.
    #[must_use]
    pub fn error(&self) -> Option<UserMessage> {
        self.error
    }

    /// Last mutated user, highlighted in the table.
    #[must_use]
    pub fn last_updated(&self) -> Option<UserId> {
        self.last_updated
    }

    /// Create page.
    #[must_use]
    pub fn create_route(&self, locale: Locale) -> Route {
        Route::CreateUser { locale }
    }

    /// Edit page of `id`.
    #[must_use]
    pub fn edit_route(&self, locale: Locale, id: UserId) -> Route {
        Route::EditUser { locale, id }
    }

    /// Details page of `id`.
    #[must_use]
    pub fn detail_route(&self, locale: Locale, id: UserId) -> Route {
        Route::UserDetail { locale, id }
    }
}

/// Case-insensitive substring match on first name, last name, email and
/// account number. An empty query matches everything.
///
/// `query` is matched as given; [`UsersTableController::search`] trims it.
#[must_use]
pub fn filter_users(users: &[UserView], query: &str) -> Vec<UserView> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return users.to_vec();
    }
    users
        .iter()
        .filter(|user| {
            [
                user.first_name(),
                user.last_name(),
                user.email(),
                user.account_number(),
            ]
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}
