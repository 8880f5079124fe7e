//! Tables and query building

use serde_json::Value;
use std::fmt;

/// Tables held by the backend store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Products,
    Promotions,
    Orders,
    Users,
    DashboardConfig,
}

impl Table {
    /// Table name on the backend
    pub fn name(&self) -> &'static str {
        match self {
            Table::Products => "products",
            Table::Promotions => "promotions",
            Table::Orders => "orders",
            Table::Users => "users",
            Table::DashboardConfig => "dashboard_config",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Row filter
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Exact match
    Eq(String, Value),
    /// Case-insensitive match; `%` matches any run of characters
    ILike(String, String),
}

impl Filter {
    pub fn field(&self) -> &str {
        match self {
            Filter::Eq(field, _) | Filter::ILike(field, _) => field,
        }
    }

    /// Check a record against this filter
    pub fn matches(&self, record: &Value) -> bool {
        match self {
            Filter::Eq(field, expected) => record.get(field) == Some(expected),
            Filter::ILike(field, pattern) => record
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|actual| ilike(actual, pattern)),
        }
    }
}

/// Case-insensitive LIKE with `%` wildcards
fn ilike(value: &str, pattern: &str) -> bool {
    let value = value.to_lowercase();
    let pattern = pattern.to_lowercase();
    let parts: Vec<&str> = pattern.split('%').collect();
    if parts.len() == 1 {
        return value == pattern;
    }

    let mut rest = value.as_str();
    let last = parts.len() - 1;
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            continue;
        }
        if i == 0 {
            match rest.strip_prefix(part) {
                Some(r) => rest = r,
                None => return false,
            }
        } else if i == last {
            return rest.ends_with(part);
        } else {
            match rest.find(part) {
                Some(pos) => rest = &rest[pos + part.len()..],
                None => return false,
            }
        }
    }
    true
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Select query: filters, ordering, limit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order_by: Option<(String, SortDirection)>,
    pub limit: Option<usize>,
}

impl Query {
    /// Select everything
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq(field.into(), value.into()));
        self
    }

    pub fn ilike(mut self, field: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.filters.push(Filter::ILike(field.into(), pattern.into()));
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order_by = Some((field.into(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check a record against every filter
    pub fn matches(&self, record: &Value) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }
}
