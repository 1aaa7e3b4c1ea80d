//! SQL construction for patient queries.
//!
//! Criteria are translated into parameterized fragments. User input is
//! always bound, never spliced into the SQL text, and substring matching
//! uses `instr` so `%` and `_` carry no wildcard meaning.

use rusqlite::ToSql;
use rusqlite::types::ToSqlOutput;

use crate::types::PatientSearch;

/// Columns read back into a `PatientRecord`, in row-mapping order.
pub(crate) const PATIENT_COLUMNS: &str = "id, internal_guid, pesel, first_name, last_name, \
     birth_date, gender, phone, email, address_line, city, postal_code, country";

/// Largest number of guids bound into one `IN (...)` list. Longer lists are
/// split so a query stays well under SQLite's bound-variable limit.
pub(crate) const MAX_GUIDS_PER_QUERY: usize = 500;

/// A fragment of SQL with bound parameters.
///
/// Placeholders are positional (`?`), so fragments can be combined freely.
#[derive(Debug, Clone, Default)]
pub(crate) struct SqlFragment {
    /// The SQL clause.
    pub sql: String,
    /// Bound parameter values.
    pub params: Vec<SqlParam>,
}

/// A bound SQL parameter.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SqlParam {
    /// String parameter.
    String(String),
    /// Integer parameter.
    Integer(i64),
}

impl ToSql for SqlParam {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            SqlParam::String(s) => s.to_sql(),
            SqlParam::Integer(i) => i.to_sql(),
        }
    }
}

impl SqlFragment {
    /// Creates a fragment with parameters.
    pub fn with_params(sql: impl Into<String>, params: Vec<SqlParam>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Returns true if the fragment has no SQL.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Combines with another fragment using OR.
    pub fn or(mut self, other: SqlFragment) -> Self {
        if !self.sql.is_empty() && !other.sql.is_empty() {
            self.sql = format!("{} OR {}", self.sql, other.sql);
        } else if !other.sql.is_empty() {
            self.sql = other.sql;
        }
        self.params.extend(other.params);
        self
    }
}

/// Unicode lowercase form stored in the `*_folded` columns and applied to
/// name criteria before matching.
pub(crate) fn fold(value: &str) -> String {
    value.to_lowercase()
}

fn contains(column: &str, value: String) -> SqlFragment {
    SqlFragment::with_params(
        format!("instr({}, ?) > 0", column),
        vec![SqlParam::String(value)],
    )
}

/// Builds the OR-combined filter for search criteria.
///
/// Returns an empty fragment when no effective criterion is set.
pub(crate) fn search_filter(criteria: &PatientSearch) -> SqlFragment {
    let mut filter = SqlFragment::default();
    if let Some(first_name) = criteria.first_name() {
        filter = filter.or(contains("first_name_folded", fold(first_name)));
    }
    if let Some(last_name) = criteria.last_name() {
        filter = filter.or(contains("last_name_folded", fold(last_name)));
    }
    if let Some(national_id) = criteria.national_id() {
        filter = filter.or(contains("pesel", national_id.to_string()));
    }
    filter
}

/// Builds an `internal_guid IN (...)` filter.
pub(crate) fn guid_filter(guids: &[String]) -> SqlFragment {
    let placeholders = vec!["?"; guids.len()].join(", ");
    SqlFragment::with_params(
        format!("internal_guid IN ({})", placeholders),
        guids.iter().cloned().map(SqlParam::String).collect(),
    )
}

/// Selects only the guid column for rows matching `filter`.
pub(crate) fn select_guids(filter: SqlFragment) -> SqlFragment {
    SqlFragment::with_params(
        format!("SELECT internal_guid FROM patients WHERE {}", filter.sql),
        filter.params,
    )
}

/// Builds the full select for a filter, ordered by id and capped at `limit`.
pub(crate) fn select_patients(filter: SqlFragment, limit: usize) -> SqlFragment {
    let mut sql = format!("SELECT {} FROM patients", PATIENT_COLUMNS);
    if !filter.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&filter.sql);
    }
    sql.push_str(" ORDER BY id LIMIT ?");

    let mut params = filter.params;
    params.push(SqlParam::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));
    SqlFragment::with_params(sql, params)
}
