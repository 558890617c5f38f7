//! A single checked-out PostgreSQL session

use gaf_core::{Error, Result, Rows};
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::Postgres;
use tracing::warn;

/// Positional query argument, bound as `$1`, `$2`, ...
#[derive(Debug, Clone, PartialEq)]
pub enum QueryArg {
    Text(String),
    Integer(i64),
    Real(f64),
    Null,
}

impl QueryArg {
    fn bind_to<'q>(
        &self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments> {
        match self {
            QueryArg::Text(value) => query.bind(value.clone()),
            QueryArg::Integer(value) => query.bind(*value),
            QueryArg::Real(value) => query.bind(*value),
            QueryArg::Null => query.bind(None::<String>),
        }
    }
}

impl From<&str> for QueryArg {
    fn from(value: &str) -> Self {
        QueryArg::Text(value.to_string())
    }
}

impl From<String> for QueryArg {
    fn from(value: String) -> Self {
        QueryArg::Text(value)
    }
}

impl From<i64> for QueryArg {
    fn from(value: i64) -> Self {
        QueryArg::Integer(value)
    }
}

impl From<i32> for QueryArg {
    fn from(value: i32) -> Self {
        QueryArg::Integer(value.into())
    }
}

impl From<f64> for QueryArg {
    fn from(value: f64) -> Self {
        QueryArg::Real(value)
    }
}

/// One connection checked out of a [`crate::Pool`].
///
/// Release it with [`Connection::free`]. Dropping it without `free` also
/// returns it to the pool.
pub struct Connection {
    inner: PoolConnection<Postgres>,
}

impl Connection {
    pub(crate) fn new(inner: PoolConnection<Postgres>) -> Self {
        Self { inner }
    }

    /// Run a parameterized query.
    ///
    /// Returns [`Rows::NoRows`] when the query succeeded but matched
    /// nothing. Driver failures surface as [`Error::Query`] carrying the
    /// driver's message.
    pub async fn query(&mut self, sql: &str, args: &[QueryArg]) -> Result<Rows<PgRow>> {
        let query = args
            .iter()
            .fold(sqlx::query(sql), |query, arg| arg.bind_to(query));

        let rows = query.fetch_all(&mut *self.inner).await.map_err(|e| {
            warn!(error = %e, "query failed");
            Error::Query(e)
        })?;

        Ok(Rows::from_vec(rows))
    }

    /// Return the connection to the pool
    pub fn free(self) {
        drop(self.inner);
    }
}
