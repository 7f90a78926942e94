//! `PostgreSQL` store backing the auth service.

use sqlx::{PgPool, Row};
use tracing::{info_span, Instrument};

use super::{NewUser, StoreError, UserStore};
use crate::domain::{Application, User};
use crate::storage::AppStore;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.into())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

impl UserStore for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<User, StoreError> {
        let query = r"
            SELECT id, email, pass_hash, press_times, press_intervals, is_admin
            FROM users
            WHERE email = $1
        ";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .map_err(backend)?;

        let Some(row) = row else {
            return Err(StoreError::NotFound);
        };

        Ok(User {
            id: row.get("id"),
            email: row.get("email"),
            pass_hash: row.get("pass_hash"),
            press_times: row.get("press_times"),
            press_intervals: row.get("press_intervals"),
            is_admin: row.get("is_admin"),
        })
    }

    async fn create(&self, user: NewUser<'_>) -> Result<i64, StoreError> {
        let query = r"
            INSERT INTO users (email, pass_hash, press_times, press_intervals)
            VALUES ($1, $2, $3, $4)
            RETURNING id
        ";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(user.email)
            .bind(user.pass_hash)
            .bind(user.press_times)
            .bind(user.press_intervals)
            .fetch_one(&self.pool)
            .instrument(span)
            .await;

        match row {
            Ok(row) => Ok(row.get("id")),
            Err(err) if is_unique_violation(&err) => Err(StoreError::Duplicate),
            Err(err) => Err(backend(err)),
        }
    }

    async fn is_admin(&self, user_id: i64) -> Result<bool, StoreError> {
        let query = "SELECT is_admin FROM users WHERE id = $1";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .map_err(backend)?;

        row.map(|row| row.get("is_admin")).ok_or(StoreError::NotFound)
    }
}

impl AppStore for PgStore {
    async fn find_app(&self, app_id: i64) -> Result<Application, StoreError> {
        let query = "SELECT id, name, secret FROM apps WHERE id = $1";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(app_id)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .map_err(backend)?;

        let Some(row) = row else {
            return Err(StoreError::NotFound);
        };

        Ok(Application {
            id: row.get("id"),
            name: row.get("name"),
            secret: row.get::<String, _>("secret").into(),
        })
    }
}
