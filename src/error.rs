use failure::{Backtrace, Context, Fail};
use std::fmt;

#[derive(Debug)]
pub struct Error {
    inner: Context<ErrorKind>,
}

#[derive(Clone, Debug, Eq, PartialEq, Fail)]
pub enum ErrorKind {
    #[fail(display = "line {}: unrecognized character '{}'", line, character)]
    Lex { character: char, line: usize },
    #[fail(display = "line {}: {}", line, message)]
    Parse { message: String, line: usize },
    #[fail(display = "undefined name '{}'", name)]
    UndefinedName { name: String },
    #[fail(display = "division by zero")]
    DivisionByZero,
    #[fail(
        display = "function '{}' takes {} argument(s) but {} were given",
        name, expected, found
    )]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    #[fail(display = "type error: {}", message)]
    Type { message: String },
    #[fail(display = "recursion limit of {} nested calls exceeded", limit)]
    RecursionLimit { limit: usize },
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.inner.get_context()
    }

    /// Source line of a lex or parse error. Runtime errors carry none.
    pub fn line(&self) -> Option<usize> {
        match *self.kind() {
            ErrorKind::Lex { line, .. } | ErrorKind::Parse { line, .. } => Some(line),
            _ => None,
        }
    }

    pub(crate) fn parse(message: impl Into<String>, line: usize) -> Error {
        Error::from(ErrorKind::Parse {
            message: message.into(),
            line,
        })
    }

    pub(crate) fn type_error(message: impl Into<String>) -> Error {
        Error::from(ErrorKind::Type {
            message: message.into(),
        })
    }
}

impl Fail for Error {
    fn cause(&self) -> Option<&dyn Fail> {
        self.inner.cause()
    }

    fn backtrace(&self) -> Option<&Backtrace> {
        self.inner.backtrace()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Error) -> bool {
        self.kind() == other.kind()
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Context::new(kind),
        }
    }
}

impl From<Context<ErrorKind>> for Error {
    fn from(inner: Context<ErrorKind>) -> Error {
        Error { inner }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display() {
        let e = Error::from(ErrorKind::Lex {
            character: '$',
            line: 3,
        });
        assert_eq!(e.to_string(), "line 3: unrecognized character '$'");
        assert_eq!(e.line(), Some(3));

        let e = Error::from(ErrorKind::ArityMismatch {
            name: "add".to_owned(),
            expected: 2,
            found: 1,
        });
        assert_eq!(
            e.to_string(),
            "function 'add' takes 2 argument(s) but 1 were given"
        );
        assert_eq!(e.line(), None);
    }
}
