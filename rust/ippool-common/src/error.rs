use std::net::Ipv4Addr;

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

    pub fn invalid_range(first: Ipv4Addr, last: Ipv4Addr) -> Error {
        Error(ErrorKind::InvalidRange { first, last }.into())
    }

    pub fn invalid_prefix(prefix_len: u8) -> Error {
        Error(ErrorKind::InvalidPrefix { prefix_len }.into())
    }

    pub fn parse(
        element: impl Into<String>,
        text: impl Into<String>,
        message: impl Into<String>,
    ) -> Error {
        Error(
            ErrorKind::Parse {
                element: element.into(),
                text: text.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn not_intersecting(left: impl Into<String>, right: impl Into<String>) -> Error {
        Error(
            ErrorKind::NotIntersecting {
                left: left.into(),
                right: right.into(),
            }
            .into(),
        )
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid address range: first edge {first} exceeds last edge {last}")]
    InvalidRange { first: Ipv4Addr, last: Ipv4Addr },

    #[error("invalid prefix length {prefix_len}, expected 0..=32")]
    InvalidPrefix { prefix_len: u8 },

    #[error("cannot parse {element} from '{text}': {message}")]
    Parse {
        element: String,
        text: String,
        message: String,
    },

    #[error("ranges ({left}) and ({right}) do not intersect")]
    NotIntersecting { left: String, right: String },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
