//! Equality-filter query builder rendered in PostgREST syntax.

use crate::models::RowId;

pub const OWNER_COLUMN: &str = "user_id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub descending: bool,
}

/// Filters, ordering and limit for one table request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    filters: Vec<(String, String)>,
    order: Option<Order>,
    limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope to rows owned by `user_id`.
    pub fn owned_by(user_id: &str) -> Self {
        Self::new().eq(OWNER_COLUMN, user_id)
    }

    /// Target a single row by primary key.
    pub fn by_id(id: RowId) -> Self {
        Self::new().eq("id", id)
    }

    #[must_use]
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push((column.to_string(), value.to_string()));
        self
    }

    #[must_use]
    pub fn order_desc(mut self, column: &str) -> Self {
        self.order = Some(Order {
            column: column.to_string(),
            descending: true,
        });
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }

    pub const fn ordering(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub const fn max_rows(&self) -> Option<usize> {
        self.limit
    }

    /// Render as PostgREST query-string pairs, e.g. `user_id=eq.abc`.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self
            .filters
            .iter()
            .map(|(column, value)| (column.clone(), format!("eq.{value}")))
            .collect::<Vec<_>>();
        if let Some(order) = &self.order {
            let direction = if order.descending { "desc" } else { "asc" };
            pairs.push(("order".to_string(), format!("{}.{direction}", order.column)));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}
