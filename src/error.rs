use crate::ErrorBox;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Host(#[source] ErrorBox),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }
}

impl From<crate::table::TableError> for Error {
    fn from(err: crate::table::TableError) -> Self {
        Error::Host(Box::new(err))
    }
}
