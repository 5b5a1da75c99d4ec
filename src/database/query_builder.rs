use serde_json::Value;
use sqlx::{self, mysql::MySqlArguments, MySql};

/// A statement with `?` placeholders and the values bound to them, in order
#[derive(Debug, Clone, PartialEq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

/// Single-table statement builder. Table and column names come from the
/// model constants and are quoted; every value is bound.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    kind: StatementKind,
    table: &'static str,
    values: Vec<(&'static str, Value)>,
    conditions: Vec<(&'static str, Value)>,
    order_by_desc: Option<&'static str>,
    limit: Option<u64>,
}

impl QueryBuilder {
    fn new(kind: StatementKind, table: &'static str) -> Self {
        Self {
            kind,
            table,
            values: Vec::new(),
            conditions: Vec::new(),
            order_by_desc: None,
            limit: None,
        }
    }

    pub fn select(table: &'static str) -> Self {
        Self::new(StatementKind::Select, table)
    }

    pub fn insert(table: &'static str) -> Self {
        Self::new(StatementKind::Insert, table)
    }

    pub fn update(table: &'static str) -> Self {
        Self::new(StatementKind::Update, table)
    }

    pub fn delete(table: &'static str) -> Self {
        Self::new(StatementKind::Delete, table)
    }

    /// Column value for INSERT / SET clause for UPDATE
    pub fn value(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.values.push((column, value.into()));
        self
    }

    pub fn values(mut self, columns: Vec<(&'static str, Value)>) -> Self {
        self.values.extend(columns);
        self
    }

    /// `column = ?`, joined with AND. A `None` binds SQL NULL, which matches no row.
    pub fn where_eq(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.conditions.push((column, value.into()));
        self
    }

    pub fn order_by_desc(mut self, column: &'static str) -> Self {
        self.order_by_desc = Some(column);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn build(self) -> SqlResult {
        let table = quote_identifier(self.table);
        let mut params = Vec::with_capacity(self.values.len() + self.conditions.len());

        let mut query = match self.kind {
            StatementKind::Select => format!("SELECT * FROM {}", table),
            StatementKind::Delete => format!("DELETE FROM {}", table),
            StatementKind::Insert => {
                let columns: Vec<String> = self.values.iter().map(|(c, _)| quote_identifier(c)).collect();
                let placeholders = vec!["?"; self.values.len()].join(", ");
                format!("INSERT INTO {} ({}) VALUES ({})", table, columns.join(", "), placeholders)
            }
            StatementKind::Update => {
                let assignments: Vec<String> = self
                    .values
                    .iter()
                    .map(|(c, _)| format!("{} = ?", quote_identifier(c)))
                    .collect();
                format!("UPDATE {} SET {}", table, assignments.join(", "))
            }
        };

        if matches!(self.kind, StatementKind::Insert | StatementKind::Update) {
            params.extend(self.values.into_iter().map(|(_, v)| v));
        }

        if !self.conditions.is_empty() {
            let clauses: Vec<String> = self
                .conditions
                .iter()
                .map(|(c, _)| format!("{} = ?", quote_identifier(c)))
                .collect();
            query.push_str(" WHERE ");
            query.push_str(&clauses.join(" AND "));
            params.extend(self.conditions.into_iter().map(|(_, v)| v));
        }

        if let Some(column) = self.order_by_desc {
            query.push_str(&format!(" ORDER BY {} DESC", quote_identifier(column)));
        }

        if let Some(limit) = self.limit {
            query.push_str(&format!(" LIMIT {}", limit));
        }

        SqlResult { query, params }
    }
}

fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Bind a JSON value to the next placeholder
pub fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, MySql, MySqlArguments>,
    v: &'q Value,
) -> sqlx::query::Query<'q, MySql, MySqlArguments> {
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(u) = n.as_u64() {
                q.bind(u)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s.as_str()),
        // Nested structures are stored as their JSON text
        Value::Array(_) | Value::Object(_) => q.bind(v.to_string()),
    }
}
