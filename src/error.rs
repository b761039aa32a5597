use thiserror::Error;

/// Caller contract violations.
///
/// Malformed `robots.txt` content never produces an error; these are returned
/// only when the *caller* hands the engine something it cannot honour, such as
/// a wildcard agent name or a successful status code passed to
/// [`RobotRules::from_status()`](crate::RobotRules::from_status).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RobotsError {
    #[error("agent name must not be empty")]
    EmptyAgentName,

    #[error("wildcard '*' is not a valid agent name")]
    WildcardAgentName,

    #[error("agent name '{name}' must be lower-case for exact matching")]
    UppercaseAgentName { name: String },

    #[error("agent name '{name}' contains illegal character {ch:?}")]
    IllegalAgentName { name: String, ch: char },

    #[error("status {status} does not describe a failed robots.txt fetch")]
    NotAFailedFetch { status: u16 },
}
