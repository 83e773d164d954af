use thiserror::Error;

/// Failure talking to the GraphQL endpoint.
///
/// Never used for "nothing matched"; that is a regular value
/// (`RouteRecord::NotFound`, an empty entity list).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build GraphQL client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("{operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{operation} returned HTTP {status}")]
    Status { operation: &'static str, status: u16 },
    #[error("{operation} returned GraphQL errors: {}", messages.join("; "))]
    GraphQl {
        operation: &'static str,
        messages: Vec<String>,
    },
    #[error("{operation} returned no data")]
    MissingData { operation: &'static str },
    #[error("failed to decode {operation} response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Client(_) => None,
            Self::Transport { operation, .. }
            | Self::Status { operation, .. }
            | Self::GraphQl { operation, .. }
            | Self::MissingData { operation }
            | Self::Decode { operation, .. } => Some(*operation),
        }
    }
}
