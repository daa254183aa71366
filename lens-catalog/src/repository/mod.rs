//! Product storage
//!
//! [`ProductRepository`] is the storage seam. Two backends implement it:
//!
//! - [`MemoryProductStore`]: process-local, used when no database is
//!   configured and in tests
//! - [`PgProductStore`]: PostgreSQL through `sqlx` (feature `postgres`)
//!
//! Reads the service performs go through [`ActiveProducts`], which scopes
//! every query to active records.
//!
//! # Example
//!
//! ```rust
//! use lens_catalog::repository::{ActiveProducts, FilterCondition, MemoryProductStore, Pagination};
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let store = MemoryProductStore::new();
//! let (items, total) = store
//!     .list_active(&[FilterCondition::icontains("model", "nikon")], Pagination::new(0, 5))
//!     .await
//!     .unwrap();
//! assert!(items.is_empty());
//! assert_eq!(total, 0);
//! # });
//! ```

mod error;
mod memory;
mod pagination;
#[cfg(feature = "postgres")]
mod postgres;
mod traits;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use memory::MemoryProductStore;
pub use pagination::{FilterCondition, FilterOperator, FilterValue, OrderDirection, Pagination};
#[cfg(feature = "postgres")]
pub use postgres::PgProductStore;
pub use traits::{active_scope, ActiveProducts, ProductRepository, RepositoryResult};
