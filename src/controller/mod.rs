pub mod sequence;

use crate::autocomplete::{self, Suggestion};
use crate::client::{ClientError, FactsClient, FactsQuery};
use crate::facts::FactsPage;
use crate::pagination::{clamp_page, PaginationInfo};
use crate::view::{PageSnapshot, PageView};

pub use sequence::{RequestSequence, Ticket};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Reload,
    GoTo(u64),
    First,
    Last,
    Next,
    Prev,
    Search(Option<String>),
    SetPerPage(u32),
    Type(String),
    Pick(usize),
    DismissSuggestions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    Page { ticket: Ticket, query: FactsQuery },
    Suggestions { ticket: Ticket, prefix: String },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plan {
    pub request: Option<Request>,
    pub clear_suggestions: bool,
}

#[derive(Debug)]
pub enum Response {
    Page {
        ticket: Ticket,
        query: FactsQuery,
        result: Result<FactsPage, ClientError>,
    },
    Suggestions {
        ticket: Ticket,
        prefix: String,
        result: Result<Vec<String>, ClientError>,
    },
}

#[derive(Debug)]
pub enum Update {
    Page(PageSnapshot),
    Suggestions(Vec<Suggestion>),
    Failed(ClientError),
    Stale,
}

#[derive(Debug)]
pub struct PageController {
    per_page: u32,
    search_field: String,
    active_query: Option<String>,
    pagination: Option<PaginationInfo>,
    suggestions: Vec<Suggestion>,
    pages: RequestSequence,
    completions: RequestSequence,
}

impl PageController {
    pub fn new(per_page: u32) -> Self {
        Self {
            per_page: per_page.max(1),
            search_field: String::new(),
            active_query: None,
            pagination: None,
            suggestions: Vec::new(),
            pages: RequestSequence::new(),
            completions: RequestSequence::new(),
        }
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn search_field(&self) -> &str {
        &self.search_field
    }

    pub fn active_query(&self) -> Option<&str> {
        self.active_query.as_deref()
    }

    pub fn pagination(&self) -> Option<&PaginationInfo> {
        self.pagination.as_ref()
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn preset_search(&mut self, text: &str) {
        self.search_field = text.trim().to_string();
        self.active_query = Some(self.search_field.clone()).filter(|q| !q.is_empty());
    }

    pub fn plan(&mut self, action: Action) -> Plan {
        match action {
            Action::Type(text) => self.plan_typing(text),
            Action::Pick(index) => {
                if let Some(s) = self.suggestions.get(index) {
                    self.search_field = s.phrase.clone();
                }
                self.dismiss_suggestions();
                Plan {
                    request: None,
                    clear_suggestions: true,
                }
            }
            Action::DismissSuggestions => {
                self.dismiss_suggestions();
                Plan {
                    request: None,
                    clear_suggestions: true,
                }
            }
            // anything outside the search field closes the suggestion list
            page_action => {
                self.dismiss_suggestions();
                Plan {
                    request: self.plan_page(page_action),
                    clear_suggestions: true,
                }
            }
        }
    }

    fn plan_typing(&mut self, text: String) -> Plan {
        self.search_field = text;
        let prefix = self.search_field.trim().to_string();
        if prefix.is_empty() {
            self.dismiss_suggestions();
            return Plan {
                request: None,
                clear_suggestions: true,
            };
        }
        let ticket = self.completions.issue();
        Plan {
            request: Some(Request::Suggestions { ticket, prefix }),
            clear_suggestions: false,
        }
    }

    fn plan_page(&mut self, action: Action) -> Option<Request> {
        let current = self.pagination.map(|p| p.current_page).unwrap_or(1);
        let total = self.pagination.map(|p| p.total_pages);
        let bounded = |page: u64| match total {
            Some(total) => clamp_page(page, total),
            None => page.max(1),
        };

        let page = match action {
            Action::Reload => current,
            Action::GoTo(page) => bounded(page),
            Action::First => 1,
            Action::Last => bounded(total?),
            Action::Next => bounded(current.saturating_add(1)),
            Action::Prev => bounded(current.saturating_sub(1)),
            Action::Search(text) => {
                if let Some(text) = text {
                    self.search_field = text;
                }
                self.search_field = self.search_field.trim().to_string();
                self.active_query = if self.search_field.is_empty() {
                    None
                } else {
                    Some(self.search_field.clone())
                };
                1
            }
            Action::SetPerPage(per_page) => {
                self.per_page = per_page.max(1);
                self.active_query = None;
                1
            }
            Action::Type(_) | Action::Pick(_) | Action::DismissSuggestions => return None,
        };

        let ticket = self.pages.issue();
        Some(Request::Page {
            ticket,
            query: FactsQuery {
                page,
                per_page: self.per_page,
                query: self.active_query.clone(),
            },
        })
    }

    fn dismiss_suggestions(&mut self) {
        self.suggestions.clear();
        // invalidate anything still in flight
        self.completions.issue();
    }

    pub fn accept(&mut self, response: Response) -> Update {
        match response {
            Response::Page {
                ticket,
                query,
                result,
            } => {
                if !self.pages.is_latest(ticket) {
                    tracing::warn!(
                        ticket = ticket.value(),
                        latest = ?self.pages.latest(),
                        page = query.page,
                        "dropping stale page response"
                    );
                    return Update::Stale;
                }
                match result {
                    Ok(page) => {
                        self.pagination = Some(page.pagination);
                        let snapshot =
                            PageSnapshot::build(&page, query.query.as_deref(), query.per_page);
                        Update::Page(snapshot)
                    }
                    Err(e) => Update::Failed(e),
                }
            }
            Response::Suggestions {
                ticket,
                prefix,
                result,
            } => {
                if !self.completions.is_latest(ticket) {
                    tracing::debug!(
                        ticket = ticket.value(),
                        latest = ?self.completions.latest(),
                        %prefix,
                        "dropping stale suggestions"
                    );
                    return Update::Stale;
                }
                match result {
                    Ok(candidates) => {
                        self.suggestions = autocomplete::split_suggestions(&prefix, &candidates);
                        Update::Suggestions(self.suggestions.clone())
                    }
                    Err(e) => Update::Failed(e),
                }
            }
        }
    }
}

pub async fn execute(client: &FactsClient, request: Request) -> Response {
    match request {
        Request::Page { ticket, query } => {
            tracing::debug!(%ticket, page = query.page, per_page = query.per_page, "fetching page");
            let result = client.fetch_page(&query).await;
            Response::Page {
                ticket,
                query,
                result,
            }
        }
        Request::Suggestions { ticket, prefix } => {
            tracing::debug!(%ticket, %prefix, "fetching suggestions");
            let result = client.fetch_suggestions(&prefix).await;
            Response::Suggestions {
                ticket,
                prefix,
                result,
            }
        }
    }
}

/// Push an update to the view. Returns `false` for stale updates.
pub fn present<V: PageView + ?Sized>(view: &mut V, update: Update) -> bool {
    match update {
        Update::Page(snapshot) => view.apply_snapshot(&snapshot),
        Update::Suggestions(suggestions) => {
            view.clear_suggestions();
            view.show_suggestions(&suggestions);
        }
        Update::Failed(e) => {
            tracing::warn!(error = %e, "request failed");
            view.show_error(&e.to_string());
        }
        Update::Stale => return false,
    }
    true
}

pub async fn dispatch<V: PageView + ?Sized>(
    controller: &mut PageController,
    client: &FactsClient,
    view: &mut V,
    action: Action,
) -> bool {
    let plan = controller.plan(action);
    if plan.clear_suggestions {
        view.clear_suggestions();
    }
    match plan.request {
        Some(request) => {
            let response = execute(client, request).await;
            present(view, controller.accept(response))
        }
        None => false,
    }
}
