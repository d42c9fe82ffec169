//! Error types for vizspec operations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or serializing a chart specification.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed shorthand encountered during parsing.
    #[error("invalid shorthand {shorthand:?}: {reason}")]
    InvalidShorthand {
        /// The offending shorthand string.
        shorthand: String,
        /// What made it unparseable.
        reason: String,
    },

    /// A field type could not be inferred from the bound dataset.
    #[error("cannot resolve type of column {column:?}: {reason}")]
    UnresolvableType {
        /// Column the inference ran against.
        column: String,
        /// Why classification failed.
        reason: String,
    },

    /// A renderer was requested under a name the registry does not know.
    #[error("renderer could not be found: {0}")]
    RendererNotFound(String),

    /// A channel was assigned a value outside its accepted set.
    #[error("invalid value for {channel} channel: {reason}")]
    InvalidChannelValue {
        /// Channel the assignment targeted.
        channel: &'static str,
        /// The rejected value or violated constraint.
        reason: String,
    },

    /// An operation required a channel that is not bound.
    #[error("{0} channel is not bound")]
    MissingChannel(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_shorthand_display() {
        let err = Error::InvalidShorthand {
            shorthand: "mode(x)".to_string(),
            reason: "unknown aggregate function \"mode\"".to_string(),
        };
        assert!(err.to_string().contains("mode(x)"));
        assert!(err.to_string().contains("unknown aggregate"));
    }

    #[test]
    fn test_unresolvable_type_display() {
        let err = Error::UnresolvableType {
            column: "age".to_string(),
            reason: "column not present in dataset".to_string(),
        };
        assert!(err.to_string().contains("age"));
    }

    #[test]
    fn test_renderer_not_found_display() {
        let err = Error::RendererNotFound("plotly".to_string());
        assert!(err.to_string().contains("plotly"));
    }

    #[test]
    fn test_missing_channel_display() {
        let err = Error::MissingChannel("y");
        assert_eq!(err.to_string(), "y channel is not bound");
    }
}
