//! Error types for query construction.

use thiserror::Error;

/// Errors that can occur while building or rendering a search query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// No author, title, or abstract terms have been added.
    #[error(
        "query has no search terms\n  Suggestion: add at least one author, title keyword, or abstract keyword"
    )]
    EmptyQuery,

    /// The category name is not one of the known arXiv subject classes.
    #[error(
        "unknown category: '{name}'\n  Suggestion: known categories are cond-mat, cond-mat.soft, cond-mat.stat-mech, cond-mat.dis-nn, cond-mat.other, cond-mat.mtrl-sci, physics.bio-ph, physics.comp-ph"
    )]
    InvalidCategory {
        /// The unrecognized category name.
        name: String,
    },

    /// The connector is neither `and` nor `or`.
    #[error("invalid connector: '{value}' (expected 'and' or 'or')")]
    InvalidConnector {
        /// The unrecognized connector value.
        value: String,
    },

    /// A removal targeted a term that was never added.
    #[error("'{term}' is not part of the query")]
    NotInQuery {
        /// The absent term.
        term: String,
    },
}

impl QueryError {
    /// Creates an `InvalidCategory` error for an unrecognized category name.
    #[must_use]
    pub fn invalid_category(name: impl Into<String>) -> Self {
        Self::InvalidCategory { name: name.into() }
    }

    /// Creates an `InvalidConnector` error for an unrecognized connector value.
    #[must_use]
    pub fn invalid_connector(value: impl Into<String>) -> Self {
        Self::InvalidConnector {
            value: value.into(),
        }
    }

    /// Creates a `NotInQuery` error for a term that was never added.
    #[must_use]
    pub fn not_in_query(term: impl Into<String>) -> Self {
        Self::NotInQuery { term: term.into() }
    }
}
