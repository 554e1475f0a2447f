use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Overflow in table '{table}', column '{column}' at index {index}: {value} does not fit in a raw i32 at this scale")]
    Overflow {
        table: String,
        column: String,
        index: u32,
        value: f64,
    },

    #[error("Unsupported manifest version: {0}")]
    UnsupportedManifestVersion(u32),
}

impl TableError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        TableError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TableError>;
