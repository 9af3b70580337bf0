//! Listing requests.
//!
//! A [`SearchRequest`] bundles the filters, ordering and paging applied by
//! `list`. Every filter is optional and they combine with AND logic. Listing
//! is a linear scan of the index, so requests only ever look at headers.

use crate::model::{Header, HeaderState};
use chrono::{DateTime, Utc};

/// Which states a listing includes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StateFilter {
    /// Everything except `Deleted`.
    #[default]
    Active,
    /// Every header, deleted ones included.
    All,
    /// Only the listed states.
    Only(Vec<HeaderState>),
}

impl StateFilter {
    pub fn matches(&self, state: HeaderState) -> bool {
        match self {
            StateFilter::Active => state != HeaderState::Deleted,
            StateFilter::All => true,
            StateFilter::Only(states) => states.contains(&state),
        }
    }
}

/// Inclusive bounds on [`Header::effective_date`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| at >= from) && self.to.is_none_or(|to| at <= to)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Index (insertion) order.
    #[default]
    IndexOrder,
    NewestFirst,
    OldestFirst,
    /// Case-insensitive by name.
    Name,
}

/// One page of results. `number` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: usize,
    pub size: usize,
}

impl Page {
    pub fn new(number: usize, size: usize) -> Self {
        Self { number, size }
    }

    fn apply(&self, headers: Vec<Header>) -> Vec<Header> {
        if self.number == 0 || self.size == 0 {
            return Vec::new();
        }
        let skip = (self.number - 1).saturating_mul(self.size);
        headers.into_iter().skip(skip).take(self.size).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub states: StateFilter,
    pub tags: Vec<String>,
    pub author: Option<String>,
    pub text: Option<String>,
    pub date_range: DateRange,
    pub sort: SortOrder,
    pub page: Option<Page>,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_deleted(mut self) -> Self {
        self.states = StateFilter::All;
        self
    }

    pub fn states(mut self, states: StateFilter) -> Self {
        self.states = states;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn from_date(mut self, from: DateTime<Utc>) -> Self {
        self.date_range.from = Some(from);
        self
    }

    pub fn to_date(mut self, to: DateTime<Utc>) -> Self {
        self.date_range.to = Some(to);
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn page(mut self, number: usize, size: usize) -> Self {
        self.page = Some(Page::new(number, size));
        self
    }

    /// Check a single header against every filter in the request.
    pub fn matches(&self, header: &Header) -> bool {
        self.states.matches(header.state)
            && self.matches_tags(header)
            && self.matches_author(header)
            && self.matches_text(header)
            && self.date_range.contains(header.effective_date())
    }

    fn matches_tags(&self, header: &Header) -> bool {
        self.tags.iter().all(|wanted| {
            header
                .tags
                .iter()
                .any(|tag| same_ignoring_case(tag, wanted))
        })
    }

    fn matches_author(&self, header: &Header) -> bool {
        self.author
            .as_deref()
            .is_none_or(|author| same_ignoring_case(&header.author, author))
    }

    fn matches_text(&self, header: &Header) -> bool {
        let Some(text) = self.text.as_deref() else {
            return true;
        };
        let needle = text.to_lowercase();
        header.name.to_lowercase().contains(&needle)
            || header.description.to_lowercase().contains(&needle)
    }

    /// Filter, order and page a set of headers given in index order.
    pub fn apply<'a>(&self, headers: impl IntoIterator<Item = &'a Header>) -> Vec<Header> {
        let mut found: Vec<Header> = headers
            .into_iter()
            .filter(|h| self.matches(h))
            .cloned()
            .collect();

        // sort_by is stable, so ties keep index order.
        match self.sort {
            SortOrder::IndexOrder => {}
            SortOrder::NewestFirst => {
                found.sort_by(|a, b| b.effective_date().cmp(&a.effective_date()))
            }
            SortOrder::OldestFirst => {
                found.sort_by(|a, b| a.effective_date().cmp(&b.effective_date()))
            }
            SortOrder::Name => found.sort_by_key(|h| h.name.to_lowercase()),
        }

        match self.page {
            Some(page) => page.apply(found),
            None => found,
        }
    }
}

fn same_ignoring_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
