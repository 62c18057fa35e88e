use std::error::Error as StdError;
use std::fmt::{self, Debug, Display};

/// An alias for [`Result<T>`](std::result::Result) with [`Error`] as the error
/// type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A list of various error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A generic error that doesn't fall under any other category.
    Other,

    /// A material id points to no live material. Widgets must be given a
    /// material before their draw material is fetched, so this is a
    /// programming error on the host side.
    MaterialNotFound,
    /// A sprite id points to no live sprite.
    SpriteNotFound,
}

/// A general purpose error type.
pub struct Error {
    repr: Box<Repr>,
}

struct Repr {
    kind: ErrorKind,
    message: String,
    source: Option<Box<dyn StdError + Send>>,
}

impl Error {
    /// Creates an [`Error`] with the provided [`ErrorKind`] and a text message.
    pub fn new<T: Display>(kind: ErrorKind, message: T) -> Error {
        Error {
            repr: Box::new(Repr {
                kind,
                message: message.to_string(),
                source: None,
            }),
        }
    }

    /// Wraps a foreign error into this type, additionally providing an
    /// [`ErrorKind`] for it.
    pub fn wrap<E: StdError + Send + 'static>(kind: ErrorKind, source: E) -> Error {
        Error::new(kind, source.to_string()).with_source(source)
    }

    /// Specifies a source error for this one.
    pub fn with_source<E: StdError + Send + 'static>(mut self, source: E) -> Error {
        self.repr.source = Some(Box::new(source));
        self
    }

    /// Creates a new error, which has the same [`ErrorKind`] as `self`, `self`
    /// as source, but a different message.
    ///
    /// This is intended for providing additional context, for example which
    /// widget triggered an error.
    pub fn with_context<T: Display>(self, context: T) -> Error {
        Error {
            repr: Box::new(Repr {
                kind: self.repr.kind,
                message: context.to_string(),
                source: Some(Box::new(self)),
            }),
        }
    }

    /// Returns the corresponding [`ErrorKind`] for this error.
    pub fn kind(&self) -> ErrorKind {
        self.repr.kind
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.repr.message)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr.source {
            Some(source) => {
                write!(f, "{}, caused by: {:?}", self.repr.message, source)
            }
            None => {
                write!(f, "{}", self.repr.message)
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.repr.source.as_ref().map(|v| (&**v) as &dyn StdError)
    }
}
