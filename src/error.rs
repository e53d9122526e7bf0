use std::path::PathBuf;

/// Failures while loading a clippings export from disk.
#[derive(Debug, thiserror::Error)]
pub enum InputReadError {
    #[error("InputReadError: failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("InputReadError: {path} is not valid UTF-8")]
    Decode {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("ExportError: no entries for book '{0}'")]
    EmptyBook(String),

    #[error("ExportError: {0}")]
    Csv(#[from] csv::Error),

    #[error("ExportError: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unpack_error;

    #[test]
    fn test_unpack_error_includes_source() {
        let err = InputReadError::Io {
            path: PathBuf::from("My Clippings.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };

        assert_eq!(
            unpack_error(&err),
            "InputReadError: failed to read My Clippings.txt: no such file"
        );
    }
}
