use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::mysql::{MySql, MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::pool::PoolConnection;
use sqlx::{ConnectOptions, Connection};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::format::row_to_values;
use crate::config::DatabaseConfig;
use crate::database::query_builder::{bind_param_query, SqlResult};

/// One result row, columns in table order
pub type Row = Vec<Value>;

/// Errors raised by the database gateway
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Executes single statements. Each call holds one connection for the
/// duration of the statement and gives it back on return, error or not.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn fetch_rows(&self, statement: &SqlResult) -> Result<Vec<Row>, DatabaseError>;

    /// Returns the affected row count
    async fn execute(&self, statement: &SqlResult) -> Result<u64, DatabaseError>;

    async fn is_connected(&self) -> bool;

    async fn close(&self);
}

/// MySQL connection pool behind the gateway
pub struct DatabaseManager {
    pool: MySqlPool,
    options: MySqlConnectOptions,
    connect_timeout: Duration,
    log_queries: bool,
}

impl DatabaseManager {
    /// Build the pool without connecting; connections are opened on first use
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let connection_string = Self::build_connection_string(config)?;
        let options = MySqlConnectOptions::from_str(&connection_string)?;

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_lazy_with(options.clone());

        info!(
            "Database pool configured for {}:{}/{} (max {} connections)",
            config.host, config.port, config.name, config.max_connections
        );

        Ok(Self {
            pool,
            options,
            connect_timeout: Duration::from_secs(config.connection_timeout),
            log_queries: config.enable_query_logging,
        })
    }

    /// `DATABASE_URL` wins; a URL without a database path gets the configured
    /// name. Otherwise the URL is composed from host, port, user and password.
    fn build_connection_string(config: &DatabaseConfig) -> Result<String, DatabaseError> {
        let invalid = |what: &str| DatabaseError::InvalidDatabaseUrl(what.to_string());

        let mut url = match &config.url {
            Some(base) => url::Url::parse(base).map_err(|e| invalid(&e.to_string()))?,
            None => {
                let mut url = url::Url::parse(&format!("mysql://{}:{}", config.host, config.port))
                    .map_err(|e| invalid(&e.to_string()))?;
                url.set_username(&config.user)
                    .map_err(|_| invalid("cannot set username"))?;
                if !config.password.is_empty() {
                    url.set_password(Some(&config.password))
                        .map_err(|_| invalid("cannot set password"))?;
                }
                url
            }
        };

        if url.path().trim_matches('/').is_empty() {
            url.set_path(&format!("/{}", config.name));
        }

        Ok(url.into())
    }

    /// Pooled connection for one statement. A pool timeout is replaced by
    /// the error of a direct connection attempt when that attempt fails too.
    async fn acquire(&self) -> Result<PoolConnection<MySql>, DatabaseError> {
        match self.pool.acquire().await {
            Ok(conn) => Ok(conn),
            Err(sqlx::Error::PoolTimedOut) => {
                match tokio::time::timeout(self.connect_timeout, self.options.connect()).await {
                    Ok(Err(e)) => {
                        warn!("Database connection failed: {}", e);
                        Err(e.into())
                    }
                    Ok(Ok(conn)) => {
                        let _ = conn.close().await;
                        Err(sqlx::Error::PoolTimedOut.into())
                    }
                    Err(_) => Err(sqlx::Error::PoolTimedOut.into()),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    fn log_statement(&self, statement: &SqlResult) {
        if self.log_queries {
            debug!(query = %statement.query, params = ?statement.params, "executing statement");
        }
    }
}

#[async_trait]
impl Gateway for DatabaseManager {
    async fn fetch_rows(&self, statement: &SqlResult) -> Result<Vec<Row>, DatabaseError> {
        self.log_statement(statement);
        let mut conn = self.acquire().await?;

        let mut q = sqlx::query(&statement.query);
        for p in statement.params.iter() {
            q = bind_param_query(q, p);
        }
        let rows = q.fetch_all(&mut *conn).await?;

        Ok(rows.iter().map(row_to_values).collect())
    }

    async fn execute(&self, statement: &SqlResult) -> Result<u64, DatabaseError> {
        self.log_statement(statement);
        let mut conn = self.acquire().await?;

        let mut q = sqlx::query(&statement.query);
        for p in statement.params.iter() {
            q = bind_param_query(q, p);
        }
        let result = q.execute(&mut *conn).await?;

        Ok(result.rows_affected())
    }

    async fn is_connected(&self) -> bool {
        match self.pool.acquire().await {
            Ok(mut conn) => conn.ping().await.is_ok(),
            Err(e) => {
                debug!("Health probe could not acquire a connection: {}", e);
                false
            }
        }
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}
