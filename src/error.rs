/// Errors raised by the card itself.
///
/// Reading and parsing sensor states never fails; unavailable readings are
/// modelled as absent values instead. The only failure is rejecting a
/// configuration at setup time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl Error {
    pub(crate) fn entities_required() -> Self {
        Error::Configuration(String::from("`entities` required"))
    }
}
