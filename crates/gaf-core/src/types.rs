//! Query result sentinel shared by the storage seam

/// Result rows of a successfully executed query.
///
/// A query that matched nothing yields [`Rows::NoRows`] rather than an
/// empty vector, so callers cannot confuse "no match" with "matched an
/// empty set". `Matched` always holds at least one row.
#[derive(Debug, Clone, PartialEq)]
pub enum Rows<T> {
    Matched(Vec<T>),
    NoRows,
}

impl<T> Rows<T> {
    /// Wrap driver output, mapping an empty result to `NoRows`
    pub fn from_vec(rows: Vec<T>) -> Self {
        if rows.is_empty() {
            Rows::NoRows
        } else {
            Rows::Matched(rows)
        }
    }

    pub fn is_no_rows(&self) -> bool {
        matches!(self, Rows::NoRows)
    }

    pub fn len(&self) -> usize {
        match self {
            Rows::Matched(rows) => rows.len(),
            Rows::NoRows => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.is_no_rows()
    }

    /// Take the first row, if any matched
    pub fn into_first(self) -> Option<T> {
        match self {
            Rows::Matched(rows) => rows.into_iter().next(),
            Rows::NoRows => None,
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Rows::Matched(rows) => rows,
            Rows::NoRows => Vec::new(),
        }
    }

    /// Convert each row, stopping at the first failure
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Rows<U>, E> {
        match self {
            Rows::Matched(rows) => rows
                .into_iter()
                .map(f)
                .collect::<Result<Vec<_>, E>>()
                .map(Rows::Matched),
            Rows::NoRows => Ok(Rows::NoRows),
        }
    }
}
