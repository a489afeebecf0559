//! Cursor-based pagination types for GraphQL
//!
//! Implements the Relay array-connection algorithm over a counted result set:
//! cursors encode absolute offsets, so replaying a cursor with no writes in
//! between yields the same page.
//!
//! Usage: Use the `define_connection!` macro to create type-specific connections.

use async_graphql::SimpleObject;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use super::errors::ApiError;

const CURSOR_PREFIX: &str = "arrayconnection:";

/// Information about pagination in a connection
#[derive(SimpleObject, Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    /// When paginating forwards, are there more items?
    pub has_next_page: bool,
    /// When paginating backwards, are there more items?
    pub has_previous_page: bool,
    /// Cursor of the first item in this page
    pub start_cursor: Option<String>,
    /// Cursor of the last item in this page
    pub end_cursor: Option<String>,
}

/// An edge in a connection, containing a node and cursor (internal use)
#[derive(Debug, Clone)]
pub struct Edge<T> {
    /// The item at the end of the edge
    pub node: T,
    /// A cursor for pagination
    pub cursor: String,
}

/// A paginated connection result (internal use)
#[derive(Debug, Clone)]
pub struct Connection<T> {
    /// The edges in this connection
    pub edges: Vec<Edge<T>>,
    /// Pagination information
    pub page_info: PageInfo,
}

/// Macro to define a GraphQL connection type for a specific entity
///
/// Usage:
/// ```ignore
/// define_connection!(IngredientTypeConnection, IngredientTypeEdge, Ingredient);
/// ```
#[macro_export]
macro_rules! define_connection {
    ($conn_name:ident, $edge_name:ident, $node_type:ty) => {
        /// A Relay edge containing a node and its cursor
        #[derive(async_graphql::SimpleObject, Debug, Clone)]
        pub struct $edge_name {
            /// The item at the end of the edge
            pub node: $node_type,
            /// A cursor for use in pagination
            pub cursor: String,
        }

        #[derive(async_graphql::SimpleObject, Debug, Clone)]
        pub struct $conn_name {
            /// Pagination data for this connection
            pub page_info: $crate::graphql::pagination::PageInfo,
            /// Contains the nodes in this connection
            pub edges: Vec<$edge_name>,
        }

        impl $conn_name {
            /// Create from a generic Connection
            pub fn from_connection(
                conn: $crate::graphql::pagination::Connection<$node_type>,
            ) -> Self {
                Self {
                    edges: conn
                        .edges
                        .into_iter()
                        .map(|e| $edge_name {
                            node: e.node,
                            cursor: e.cursor,
                        })
                        .collect(),
                    page_info: conn.page_info,
                }
            }
        }
    };
}

/// Raw pagination arguments of a connection field
#[derive(Debug, Clone, Default)]
pub struct ConnectionArgs {
    pub first: Option<i32>,
    pub last: Option<i32>,
    pub after: Option<String>,
    pub before: Option<String>,
    pub offset: Option<i32>,
}

/// The slice of a result set a connection page covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// Absolute offset of the first row in the page
    pub start: i64,
    /// Absolute offset one past the last row in the page
    pub end: i64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PageWindow {
    /// Number of rows to fetch
    pub fn limit(&self) -> i64 {
        (self.end - self.start).max(0)
    }
}

impl ConnectionArgs {
    /// Resolve the arguments against a result set of `total` rows.
    ///
    /// `field` names the connection in limit errors. Without `first` or `last`,
    /// `max_page_size` acts as `first`.
    pub fn window(
        &self,
        total: i64,
        max_page_size: i32,
        field: &str,
    ) -> Result<PageWindow, ApiError> {
        let first = check_limit("first", self.first, max_page_size, field)?;
        let last = check_limit("last", self.last, max_page_size, field)?;
        let first = match (first, last) {
            (None, None) => Some(i64::from(max_page_size)),
            (first, _) => first,
        };

        let mut after = self.after.as_deref().map(decode_cursor).transpose()?;
        if let Some(offset) = self.offset {
            let offset = i64::from(offset);
            after = Some(match after {
                Some(after) => after.saturating_add(offset),
                None => offset - 1,
            });
        }
        let before = self.before.as_deref().map(decode_cursor).transpose()?;

        let after_offset = after.unwrap_or(-1);
        let before_offset = before.unwrap_or(total);

        let mut start = after_offset.saturating_add(1).max(0);
        let mut end = before_offset.min(total);
        if let Some(first) = first {
            end = end.min(start.saturating_add(first));
        }
        if let Some(last) = last {
            start = start.max(end.saturating_sub(last));
        }

        let lower_bound = if after.is_some() { after_offset.saturating_add(1) } else { 0 };
        let upper_bound = if before.is_some() { before_offset } else { total };

        Ok(PageWindow {
            start,
            end: end.max(start),
            has_previous_page: last.is_some() && start > lower_bound,
            has_next_page: first.is_some() && end < upper_bound,
        })
    }
}

fn check_limit(
    arg: &str,
    value: Option<i32>,
    max_page_size: i32,
    field: &str,
) -> Result<Option<i64>, ApiError> {
    match value {
        None => Ok(None),
        Some(v) if v < 0 => Err(ApiError::Validation(format!(
            "Argument '{}' must be a non-negative integer.",
            arg
        ))),
        Some(v) if v > max_page_size => Err(ApiError::Validation(format!(
            "Requesting {} records on the `{}` connection exceeds the `{}` limit of {} records.",
            v, field, arg, max_page_size
        ))),
        Some(v) => Ok(Some(i64::from(v))),
    }
}

impl<T> Connection<T> {
    /// Build a connection from the rows of a window, fetched in order
    pub fn from_window(items: Vec<T>, window: &PageWindow) -> Self {
        let edges: Vec<Edge<T>> = items
            .into_iter()
            .enumerate()
            .map(|(i, node)| Edge {
                cursor: encode_cursor(window.start + i as i64),
                node,
            })
            .collect();

        let page_info = PageInfo {
            has_next_page: window.has_next_page,
            has_previous_page: window.has_previous_page,
            start_cursor: edges.first().map(|e| e.cursor.clone()),
            end_cursor: edges.last().map(|e| e.cursor.clone()),
        };

        Self { edges, page_info }
    }
}

/// Encode an offset as a cursor string
pub fn encode_cursor(offset: i64) -> String {
    BASE64.encode(format!("{}{}", CURSOR_PREFIX, offset))
}

/// Decode a cursor string to an offset. Negative offsets are rejected.
pub fn decode_cursor(cursor: &str) -> Result<i64, ApiError> {
    let invalid = || ApiError::InvalidCursor(cursor.to_string());

    let decoded = BASE64.decode(cursor).map_err(|_| invalid())?;
    let s = String::from_utf8(decoded).map_err(|_| invalid())?;

    s.strip_prefix(CURSOR_PREFIX)
        .and_then(|offset| offset.parse::<i64>().ok())
        .filter(|offset| *offset >= 0)
        .ok_or_else(invalid)
}
