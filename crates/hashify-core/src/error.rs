mod type_conversion;
mod unconfigured_keys;

use type_conversion::TypeConversionError;
use unconfigured_keys::UnconfiguredKeysError;

use std::sync::Arc;

/// Creates an [`Error`] from format arguments.
///
/// Intended for caller-supplied transform and instantiation code that needs
/// an ad-hoc failure without defining an error type.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// Returns early with an [`Error`] built from format arguments.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// An error produced while mapping between objects and maps.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorKind>,
}

#[derive(Debug)]
enum ErrorKind {
    /// Failure raised by caller-supplied transform or instantiation code.
    /// Carried as-is; the mapper never wraps or rewords it.
    Anyhow(anyhow::Error),
    TypeConversion(TypeConversionError),
    UnconfiguredKeys(UnconfiguredKeysError),
}

impl Error {
    /// Creates an error from format arguments.
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Error {
        Error::from(ErrorKind::Anyhow(anyhow::Error::msg(std::fmt::format(
            args,
        ))))
    }

    /// Error for a deserialize input map carrying keys no descriptor covers.
    pub fn unconfigured_keys(host: &'static str, keys: Vec<String>) -> Error {
        Error::from(ErrorKind::UnconfiguredKeys(UnconfiguredKeysError {
            host,
            keys,
        }))
    }

    /// Error for a [`Value`](crate::Value) that cannot be converted to the
    /// expected type.
    pub fn type_conversion(from: &'static str, to_type: &'static str) -> Error {
        Error::from(ErrorKind::TypeConversion(TypeConversionError {
            from,
            to_type,
        }))
    }

    /// Returns true if this error was raised for unconfigured input keys.
    pub fn is_unconfigured_keys(&self) -> bool {
        matches!(*self.inner, ErrorKind::UnconfiguredKeys(_))
    }

    /// The host type name and offending keys, when this is an
    /// unconfigured-keys error.
    pub fn as_unconfigured_keys(&self) -> Option<(&str, &[String])> {
        match &*self.inner {
            ErrorKind::UnconfiguredKeys(err) => Some((err.host, &err.keys)),
            _ => None,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &*self.inner {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            ErrorKind::TypeConversion(err) => Some(err),
            ErrorKind::UnconfiguredKeys(err) => Some(err),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.inner, f)
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error").field("kind", &self.inner).finish()
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            ErrorKind::Anyhow(err) => core::fmt::Display::fmt(err, f),
            ErrorKind::TypeConversion(err) => core::fmt::Display::fmt(err, f),
            ErrorKind::UnconfiguredKeys(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Arc::new(kind),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(err: std::num::ParseIntError) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}
