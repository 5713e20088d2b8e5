use std::fmt;

/// Error kind for conversion errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Nil, non-pointer or non-struct source/target at the top level.
    InvalidInput,
    /// A matched source field is not a symbolic value (Expand) or not a
    /// native value (Flatten).
    UnsupportedSourceType,
    /// Scalar, container or nested kind incompatibility between a field pair.
    TypeMismatch,
    /// `Unknown` symbolic value met on the Expand path.
    UnknownValue,
}

impl ErrorKind {
    /// `true` for kinds that describe an incompatible field pair.
    ///
    /// `UnknownValue` counts: an unresolved value has no native shape.
    pub fn is_mismatch(self) -> bool {
        matches!(self, ErrorKind::TypeMismatch | ErrorKind::UnknownValue)
    }
}

/// Conversion error returned by every Expand/Flatten operation.
///
/// `path` is built while the error unwinds out of nested fields,
/// e.g. `data[1].name`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlexError {
    pub kind: ErrorKind,
    pub path: String,
    pub message: String,
}

impl FlexError {
    fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            path: String::new(),
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, msg)
    }

    pub fn unsupported_source(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedSourceType, msg)
    }

    pub fn type_mismatch(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeMismatch, msg)
    }

    pub fn unknown_value(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownValue, msg)
    }

    /// Prefix the path with a struct field or attribute name.
    pub fn at_field(self, name: &str) -> Self {
        let path = if self.path.is_empty() {
            name.to_string()
        } else if self.path.starts_with('[') {
            format!("{name}{}", self.path)
        } else {
            format!("{name}.{}", self.path)
        };
        Self { path, ..self }
    }

    /// Prefix the path with a sequence index.
    pub fn at_index(self, index: usize) -> Self {
        self.at_segment(format!("[{index}]"))
    }

    /// Prefix the path with a map key.
    pub fn at_key(self, key: &str) -> Self {
        self.at_segment(format!("[{key:?}]"))
    }

    fn at_segment(self, segment: String) -> Self {
        let path = if self.path.is_empty() || self.path.starts_with('[') {
            format!("{segment}{}", self.path)
        } else {
            format!("{segment}.{}", self.path)
        };
        Self { path, ..self }
    }

    /// Add context to the error, preserving the original ErrorKind and path.
    ///
    /// Produces: `"context: original message"`.
    pub fn with_context(self, ctx: impl fmt::Display) -> Self {
        Self {
            message: format!("{ctx}: {}", self.message),
            ..self
        }
    }
}

impl fmt::Display for FlexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{:?}: {}", self.kind, self.message)
        } else {
            write!(f, "{:?}: {}: {}", self.kind, self.path, self.message)
        }
    }
}

impl std::error::Error for FlexError {}
