/// State management module
///
/// This module holds everything the views bind to:
/// - Typed records, mutation inputs and dialog forms (data.rs)
/// - Checked-row selection tracking for list views (selection.rs)
/// - Spreadsheet import staging and sequential commit (staging.rs)

pub mod data;
pub mod selection;
pub mod staging;

/// Lifecycle of a remotely fetched value
///
/// Mirrors the loading/error/data triple of a query binding: views
/// render a loading note for `Loading`, the error text for `Failed`,
/// and the data for `Ready`.
#[derive(Debug, Clone, PartialEq)]
pub enum Remote<T> {
    /// Nothing requested yet
    Idle,
    /// A request is in flight
    Loading,
    /// Last fetch succeeded
    Ready(T),
    /// Last fetch failed; the message replaces the view body
    Failed(String),
}

impl<T> Remote<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Remote::Ready(value) => Some(value),
            _ => None,
        }
    }
}
