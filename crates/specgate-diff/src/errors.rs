/// Result type alias using DiffError
pub type Result<T> = std::result::Result<T, DiffError>;

/// Canonical error kind taxonomy for the diff engine
///
/// Each kind maps to a stable error code usable for programmatic handling
/// and in tests. The engine assumes pre-validated input documents, so the
/// taxonomy is small: configuration problems, internal invariant breaks,
/// and serialization failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffErrorKind {
    /// A configuration value is invalid (bad pattern, zero traversal bound)
    InvalidConfig,
    /// A diff facet references a key with no object on either side
    InternalInvariant,
    /// A diff tree failed to serialize
    Serialization,
}

impl DiffErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            DiffErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            DiffErrorKind::InternalInvariant => "ERR_INTERNAL_INVARIANT",
            DiffErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type for the diff engine
///
/// Carries the failing operation and element path as context so that a
/// comparison aborted deep inside the tree walk still reports where.
#[derive(Debug, Clone)]
pub struct DiffError {
    kind: DiffErrorKind,
    op: Option<String>,
    element: Option<String>,
    message: String,
}

impl DiffError {
    /// Create a new error with the specified kind
    pub fn new(kind: DiffErrorKind) -> Self {
        Self {
            kind,
            op: None,
            element: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the document element (path string, schema name) being compared
    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.element = Some(element.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> DiffErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the element context, if any
    pub fn element(&self) -> Option<&str> {
        self.element.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for DiffError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(element) = &self.element {
            write!(f, " (element: {})", element)?;
        }
        Ok(())
    }
}

impl std::error::Error for DiffError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_context() {
        let err = DiffError::new(DiffErrorKind::InternalInvariant)
            .with_op("compare")
            .with_element("/pets")
            .with_message("modified path missing from both sides");

        let rendered = err.to_string();
        assert!(rendered.contains("ERR_INTERNAL_INVARIANT"));
        assert!(rendered.contains("compare"));
        assert!(rendered.contains("/pets"));
    }

    #[test]
    fn test_kind_codes_are_stable() {
        assert_eq!(DiffErrorKind::InvalidConfig.code(), "ERR_INVALID_CONFIG");
        assert_eq!(DiffErrorKind::Serialization.code(), "ERR_SERIALIZATION");
    }
}
