use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt item file {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config error: {0}")]
    Config(serde_json::Error),

    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    #[error("Image must be a .jpg file: {0:?}")]
    NotJpeg(String),
}

impl StoreError {
    /// True for failures to open, read, truncate or write a file.
    pub fn is_io(&self) -> bool {
        matches!(self, StoreError::Io(_))
    }

    /// True when existing content could not be decoded as an item collection.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::Corrupt { .. })
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_kind() {
        let err = StoreError::from(io::Error::new(io::ErrorKind::PermissionDenied, "nope"));
        assert!(err.is_io());
        assert!(!err.is_corrupt());
        assert_eq!(err.to_string(), "IO error: nope");
    }

    #[test]
    fn test_corrupt_kind() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = StoreError::Corrupt {
            path: PathBuf::from("items.json"),
            source,
        };
        assert!(err.is_corrupt());
        assert!(!err.is_io());
        assert!(err.to_string().starts_with("Corrupt item file items.json:"));
    }
}
