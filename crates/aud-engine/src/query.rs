//! List filtering and date sorting over entity collections.
//!
//! Records expose named text and date fields through [`QueryRecord`]; a
//! [`FilterSet`] combines an inclusive date range, a role filter and a
//! free-text search. Filtering borrows: the result is a subsequence of the
//! input in input order.

use std::cmp::Ordering;

use chrono::NaiveDate;

use aud_core::entities::{Action, Audit, Finding, UserAccount};

pub trait QueryRecord {
    /// Value of a named text field, if the record has one.
    fn text_field(&self, name: &str) -> Option<&str>;

    /// Value of a named date field, if the record has one and it is set.
    fn date_field(&self, name: &str) -> Option<NaiveDate>;

    /// Role slug for role filtering. Records without roles return `None`.
    fn role(&self) -> Option<&str> {
        None
    }
}

impl QueryRecord for Audit {
    fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(&self.id),
            "title" => Some(&self.title),
            "audit_type" => Some(&self.audit_type),
            "scope" => self.scope.as_deref(),
            "objective" => self.objective.as_deref(),
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }

    fn date_field(&self, name: &str) -> Option<NaiveDate> {
        match name {
            "start_date" => self.start_date,
            "end_date" => self.end_date,
            _ => None,
        }
    }
}

impl QueryRecord for Finding {
    fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(&self.id),
            "title" => Some(&self.title),
            "description" => self.description.as_deref(),
            "severity" => Some(self.severity.as_str()),
            "state" => Some(self.state.as_str()),
            "department_id" => self.department_id.as_deref(),
            _ => None,
        }
    }

    fn date_field(&self, name: &str) -> Option<NaiveDate> {
        match name {
            "deadline" => self.deadline.map(|d| d.date_naive()),
            _ => None,
        }
    }
}

impl QueryRecord for Action {
    fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(&self.id),
            "title" => Some(&self.title),
            "status" => Some(self.status.as_str()),
            "department_id" => self.department_id.as_deref(),
            _ => None,
        }
    }

    fn date_field(&self, name: &str) -> Option<NaiveDate> {
        match name {
            "due_date" => self.due_date.map(|d| d.date_naive()),
            _ => None,
        }
    }
}

impl QueryRecord for UserAccount {
    fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(&self.id),
            "name" => Some(&self.name),
            "email" => Some(&self.email),
            "role" => Some(&self.role),
            "department_id" => self.department_id.as_deref(),
            _ => None,
        }
    }

    fn date_field(&self, name: &str) -> Option<NaiveDate> {
        match name {
            "created_at" => self.created_at.map(|d| d.date_naive()),
            _ => None,
        }
    }

    fn role(&self) -> Option<&str> {
        Some(&self.role)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RoleFilter {
    #[default]
    All,
    Role(String),
}

impl RoleFilter {
    /// `"all"` (any case) or a blank value is the wildcard.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Role(value.to_string())
        }
    }

    fn matches(&self, role: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Role(wanted) => role.is_some_and(|r| r.eq_ignore_ascii_case(wanted)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    /// Date field the `from`/`to` bounds apply to.
    pub date_field: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub role: RoleFilter,
    pub search: Option<String>,
    /// Text fields searched by `search`. With no fields listed, a non-blank
    /// `search` matches nothing.
    pub search_fields: Vec<String>,
}

impl FilterSet {
    fn has_date_bounds(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    fn matches<T: QueryRecord>(&self, record: &T) -> bool {
        self.matches_dates(record) && self.role.matches(record.role()) && self.matches_search(record)
    }

    fn matches_dates<T: QueryRecord>(&self, record: &T) -> bool {
        if !self.has_date_bounds() {
            return true;
        }
        let Some(date) = self
            .date_field
            .as_deref()
            .and_then(|field| record.date_field(field))
        else {
            return false;
        };
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }

    fn matches_search<T: QueryRecord>(&self, record: &T) -> bool {
        let Some(needle) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            return true;
        };
        self.search_fields
            .iter()
            .filter_map(|field| record.text_field(field))
            .any(|haystack| contains_ignore_case(haystack, needle))
    }
}

/// Records matching every filter in `filters`, in input order.
pub fn filter<'a, T: QueryRecord>(records: &'a [T], filters: &FilterSet) -> Vec<&'a T> {
    records.iter().filter(|r| filters.matches(*r)).collect()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    if needle.is_ascii() && haystack.is_ascii() {
        let needle = needle.as_bytes();
        return haystack
            .as_bytes()
            .windows(needle.len())
            .any(|window| window.eq_ignore_ascii_case(needle));
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Stable sort on a date field. Records without the date go last in either
/// direction.
pub fn sort_by_date<T: QueryRecord>(records: &mut [&T], field: &str, direction: SortDirection) {
    records.sort_by(|a, b| {
        match (a.date_field(field), b.date_field(field)) {
            (Some(x), Some(y)) => match direction {
                SortDirection::Ascending => x.cmp(&y),
                SortDirection::Descending => y.cmp(&x),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}
