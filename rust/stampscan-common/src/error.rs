use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_format(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidFormat {
                element: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_operation(name: impl Into<String>) -> Error {
        Error(ErrorKind::InvalidOperation { name: name.into() }.into())
    }

    /// The stamp column of a segment, or the stamp of a single document in it,
    /// is not available.
    pub fn missing_stamp(segment: u32, doc: Option<u32>) -> Error {
        Error(ErrorKind::MissingStamp { segment, doc }.into())
    }

    pub fn missing_field(field: impl Into<String>, segment: u32, doc: u32) -> Error {
        Error(
            ErrorKind::MissingField {
                field: field.into(),
                segment,
                doc,
            }
            .into(),
        )
    }

    pub fn not_found(segment: u32, doc: u32) -> Error {
        Error(ErrorKind::DocumentNotFound { segment, doc }.into())
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Error {
        Error(
            ErrorKind::Io {
                context: context.into(),
                source,
            }
            .into(),
        )
    }

    /// Returns `true` if the error reports unavailable stamp data.
    pub fn is_missing_stamp(&self) -> bool {
        matches!(self.kind(), ErrorKind::MissingStamp { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("invalid operation {name}")]
    InvalidOperation { name: String },

    #[error("invalid data for '{element}': {message}")]
    InvalidFormat { element: String, message: String },

    #[error(
        "stamp data unavailable for segment {segment}{}",
        doc.map(|d| format!(", document {d}")).unwrap_or_default())]
    MissingStamp { segment: u32, doc: Option<u32> },

    #[error("stored field '{field}' unavailable for document {doc} of segment {segment}")]
    MissingField {
        field: String,
        segment: u32,
        doc: u32,
    },

    #[error("document {doc} not found in segment {segment}")]
    DocumentNotFound { segment: u32, doc: u32 },

    #[error("IO error for '{context}': {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_stamp_message() {
        let e = Error::missing_stamp(3, None);
        assert!(e.is_missing_stamp());
        assert_eq!(e.to_string(), "stamp data unavailable for segment 3");

        let e = Error::missing_stamp(1, Some(42));
        assert_eq!(
            e.to_string(),
            "stamp data unavailable for segment 1, document 42"
        );
    }

    #[test]
    fn test_into_kind() {
        let e = Error::invalid_arg("window", "start <= stop");
        match e.into_kind() {
            ErrorKind::InvalidArgument { name, message } => {
                assert_eq!(name, "window");
                assert_eq!(message, "start <= stop");
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }
}
