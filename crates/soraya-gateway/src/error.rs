use thiserror::Error;

/// Generic messages shown when the service gives nothing more specific.
pub const GENERIC_SERVICE_MESSAGE: &str =
    "The risk service could not process this request. Please try again.";
pub const TRANSPORT_MESSAGE: &str =
    "Could not reach the risk service. Check that it is running and try again.";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("field {key} is not a whole number: {value:?}")]
    InvalidNumber { key: String, value: String },

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("risk service returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("response parsing failed: {0}")]
    ResponseParse(String),
}

impl GatewayError {
    /// The message a toast shows. Service-provided reasons pass through
    /// verbatim; everything else degrades to a generic line.
    pub fn user_message(&self) -> String {
        match self {
            Self::Service { message, .. } => message.clone(),
            Self::Transport(_) => TRANSPORT_MESSAGE.to_string(),
            Self::ResponseParse(_) => GENERIC_SERVICE_MESSAGE.to_string(),
            Self::MissingField(_) | Self::InvalidNumber { .. } => {
                "Please review your answers and try again.".to_string()
            }
        }
    }
}
