//! Storage trait implementations for PostgreSQL

mod artifact;

use async_trait::async_trait;
use gaf_core::{ArtifactConnection, ConnectionPool, Result};

use crate::Pool;

#[async_trait]
impl ConnectionPool for Pool {
    async fn get_connection(&self) -> Result<Box<dyn ArtifactConnection>> {
        let connection = Pool::get_connection(self).await?;
        Ok(Box::new(connection))
    }
}
