//! Todo ordering and filtering policies.
//!
//! A [`SortingStrategy`] pairs a [`SortKey`] with a [`TodoFilter`]. The filter
//! runs first, then the remainder is ordered. Every ordering falls back to the
//! item id so equal keys always come out in the same order.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::todo::Todo;

/// Anything that can be filtered and ordered like a todo.
pub trait TodoLike {
    fn id(&self) -> Uuid;
    fn name(&self) -> &str;
    fn checked(&self) -> bool;
    fn deadline(&self) -> Option<DateTime<Utc>>;
}

impl TodoLike for Todo {
    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn checked(&self) -> bool {
        self.checked
    }

    fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }
}

/// Which todos survive into a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoFilter {
    /// No filtering.
    #[default]
    All,
    /// Unchecked todos only.
    Active,
    /// Checked todos only.
    Completed,
}

impl TodoFilter {
    pub fn matches<T: TodoLike>(self, item: &T) -> bool {
        match self {
            TodoFilter::All => true,
            TodoFilter::Active => !item.checked(),
            TodoFilter::Completed => item.checked(),
        }
    }

    /// Keep the matching items, preserving their relative order.
    pub fn apply<T: TodoLike>(self, items: Vec<T>) -> Vec<T> {
        match self {
            TodoFilter::All => items,
            _ => items.into_iter().filter(|item| self.matches(item)).collect(),
        }
    }
}

/// Ordering key selected by the `sort` query parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Ascending by name.
    #[default]
    Name,
    /// Checked first, then by deadline ascending, undated last.
    Date,
}

impl SortKey {
    pub fn compare<T: TodoLike>(self, a: &T, b: &T) -> Ordering {
        let primary = match self {
            SortKey::Name => a.name().cmp(b.name()),
            SortKey::Date => compare_by_deadline(a, b),
        };
        primary.then_with(|| a.id().cmp(&b.id()))
    }
}

/// Checked items come first. Within the same `checked` value, dated items
/// precede undated ones and dated items are ordered by instant.
fn compare_by_deadline<T: TodoLike>(a: &T, b: &T) -> Ordering {
    b.checked()
        .cmp(&a.checked())
        .then_with(|| match (a.deadline(), b.deadline()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

/// Sort key plus the filter applied before ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortingStrategy {
    pub key: SortKey,
    pub filter: TodoFilter,
}

impl SortingStrategy {
    pub fn new(key: SortKey) -> Self {
        Self {
            key,
            filter: TodoFilter::All,
        }
    }

    pub fn with_filter(mut self, filter: TodoFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn sort<T: TodoLike>(&self, items: Vec<T>) -> Vec<T> {
        let mut items = self.filter.apply(items);
        items.sort_by(|a, b| self.key.compare(a, b));
        items
    }
}
