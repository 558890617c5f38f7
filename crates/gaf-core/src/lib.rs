pub mod artifact;
pub mod error;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod models;
pub mod repository;
pub mod schema;
pub mod store;
pub mod types;

pub use artifact::Artifact;
pub use error::{Error, Result};
pub use models::{ArtifactRow, ArtifactView};
pub use repository::{ArtifactConnection, ConnectionPool};
pub use store::ArtifactStore;
pub use types::Rows;
