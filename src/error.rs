/// Error kinds for the admin console
///
/// Every fallible path in the application maps onto one of these
/// variants so the UI can decide where an error surfaces: query
/// errors replace the view body, mutation errors go to the status
/// line and leave the triggering dialog open.

use thiserror::Error;

/// All error kinds surfaced by the console
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Transport failure or non-success HTTP status from the endpoint
    #[error("network error: {0}")]
    Network(String),

    /// The API rejected the operation; the server's message is passed
    /// through verbatim
    #[error("{0}")]
    Server(String),

    /// A required field is missing or malformed, caught client-side
    /// before anything is submitted
    #[error("{0}")]
    Validation(String),

    /// The uploaded import file is not a readable tabular format
    #[error("could not read import file: {0}")]
    Parse(String),

    /// A bulk action was invoked with nothing selected; never reaches
    /// the server
    #[error("nothing selected")]
    EmptySelection,
}
