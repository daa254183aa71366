//! Repository error types
//!
//! Every storage backend reports failures through [`RepositoryError`], which
//! carries the operation that failed, a coarse error category and, when
//! known, the entity involved.
//!
//! # Example
//!
//! ```rust
//! use lens_catalog::repository::{RepositoryError, RepositoryErrorKind};
//!
//! let error = RepositoryError::not_found("Product", "0190a5a4-7c1e-7000-8000-000000000000");
//! assert!(matches!(error.kind, RepositoryErrorKind::NotFound));
//! assert!(error.entity_id.is_some());
//! ```

use std::fmt;

/// Operation being performed when the repository error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Resolving a single product by identifier
    FindById,
    /// Listing products with filters
    FindAll,
    /// Counting products matching filters
    Count,
    /// Inserting a new product
    Create,
    /// Persisting changes to an existing product
    Update,
    /// Marking a product inactive
    SoftDelete,
    /// Probing the backend for readiness
    HealthCheck,
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FindById => write!(f, "find_by_id"),
            Self::FindAll => write!(f, "find_all"),
            Self::Count => write!(f, "count"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::SoftDelete => write!(f, "soft_delete"),
            Self::HealthCheck => write!(f, "health_check"),
        }
    }
}

/// Category of repository error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryErrorKind {
    /// Entity was not found (or is inactive)
    NotFound,
    /// Entity already exists (duplicate key)
    AlreadyExists,
    /// Input rejected before reaching storage
    ValidationFailed,
    /// Failed to reach the backend
    ConnectionFailed,
    /// Operation timed out
    Timeout,
    /// Underlying database error
    DatabaseError,
    /// A stored row could not be decoded
    SerializationError,
    /// Other unclassified error
    Other,
}

impl fmt::Display for RepositoryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::AlreadyExists => write!(f, "already_exists"),
            Self::ValidationFailed => write!(f, "validation_failed"),
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::Timeout => write!(f, "timeout"),
            Self::DatabaseError => write!(f, "database_error"),
            Self::SerializationError => write!(f, "serialization_error"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Structured repository error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    /// The operation being performed when the error occurred
    pub operation: RepositoryOperation,
    /// The category of error
    pub kind: RepositoryErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The type of entity involved
    pub entity_type: Option<String>,
    /// The ID of the entity involved
    pub entity_id: Option<String>,
}

impl RepositoryError {
    /// Create a new repository error
    pub fn new(
        operation: RepositoryOperation,
        kind: RepositoryErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
        }
    }

    /// Create a "not found" error with entity context
    ///
    /// Missing and inactive records produce the same error so callers cannot
    /// tell them apart.
    pub fn not_found(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        let entity_type = entity_type.into();
        let message = format!("{} not found", entity_type);
        Self {
            operation: RepositoryOperation::FindById,
            kind: RepositoryErrorKind::NotFound,
            message,
            entity_type: Some(entity_type),
            entity_id: Some(entity_id.into()),
        }
    }

    /// Create an "already exists" error with entity context
    pub fn already_exists(entity_type: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            operation: RepositoryOperation::Create,
            kind: RepositoryErrorKind::AlreadyExists,
            message: "Entity already exists".to_string(),
            entity_type: Some(entity_type.into()),
            entity_id: Some(identifier.into()),
        }
    }

    /// Create a validation failed error
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(
            RepositoryOperation::FindAll,
            RepositoryErrorKind::ValidationFailed,
            message,
        )
    }

    /// Create a connection failed error
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::new(
            RepositoryOperation::HealthCheck,
            RepositoryErrorKind::ConnectionFailed,
            message,
        )
    }

    /// Create a timeout error
    pub fn timeout(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::Timeout, message)
    }

    /// Create a database error
    pub fn database_error(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::DatabaseError, message)
    }

    /// Create a serialization error
    pub fn serialization_error(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::SerializationError, message)
    }

    /// Add entity context to an existing error
    #[must_use]
    pub fn with_entity(
        mut self,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Set the operation that caused the error
    #[must_use]
    pub fn with_operation(mut self, operation: RepositoryOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Whether the caller should treat this as not-found
    pub fn is_not_found(&self) -> bool {
        self.kind == RepositoryErrorKind::NotFound
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Repository {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(ref entity_type), Some(ref entity_id)) = (&self.entity_type, &self.entity_id) {
            write!(f, " [{}: {}]", entity_type, entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for RepositoryError {}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::Error as E;
        let op = RepositoryOperation::FindAll;
        match err {
            E::RowNotFound => Self::new(op, RepositoryErrorKind::NotFound, "Row not found"),
            E::PoolTimedOut => Self::timeout(op, "Connection pool timed out"),
            E::PoolClosed => Self::connection_failed("Connection pool is closed").with_operation(op),
            E::Io(e) => Self::connection_failed(e.to_string()).with_operation(op),
            E::Tls(e) => Self::connection_failed(format!("TLS error: {}", e)).with_operation(op),
            E::Database(db) if db.is_unique_violation() => Self::new(
                RepositoryOperation::Create,
                RepositoryErrorKind::AlreadyExists,
                db.message().to_string(),
            ),
            E::ColumnDecode { index, source } => Self::serialization_error(
                op,
                format!("Failed to decode column {}: {}", index, source),
            ),
            E::Decode(e) => Self::serialization_error(op, e.to_string()),
            other => Self::database_error(op, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_operation_display() {
        assert_eq!(format!("{}", RepositoryOperation::FindById), "find_by_id");
        assert_eq!(format!("{}", RepositoryOperation::FindAll), "find_all");
        assert_eq!(format!("{}", RepositoryOperation::SoftDelete), "soft_delete");
        assert_eq!(format!("{}", RepositoryOperation::HealthCheck), "health_check");
    }

    #[test]
    fn test_not_found_names_the_entity() {
        let error = RepositoryError::not_found("Product", "abc");
        assert_eq!(error.operation, RepositoryOperation::FindById);
        assert_eq!(error.kind, RepositoryErrorKind::NotFound);
        assert_eq!(error.message, "Product not found");
        assert_eq!(error.entity_type.as_deref(), Some("Product"));
        assert_eq!(error.entity_id.as_deref(), Some("abc"));
        assert!(error.is_not_found());
    }

    #[test]
    fn test_with_operation_keeps_kind() {
        let error = RepositoryError::not_found("Product", "abc")
            .with_operation(RepositoryOperation::SoftDelete);
        assert_eq!(error.operation, RepositoryOperation::SoftDelete);
        assert!(error.is_not_found());
    }

    #[test]
    fn test_display_with_entity() {
        let error = RepositoryError::not_found("Product", "p1");
        let display = error.to_string();
        assert!(display.contains("not_found"));
        assert!(display.contains("find_by_id"));
        assert!(display.contains("[Product: p1]"));
    }

    #[test]
    fn test_display_without_entity() {
        let error = RepositoryError::database_error(RepositoryOperation::Count, "boom");
        let display = error.to_string();
        assert_eq!(display, "Repository database_error error during count: boom");
        assert!(!display.contains('['));
    }
}
