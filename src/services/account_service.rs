use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{info, instrument};

use crate::error::{Error, Result};
use crate::models::account::Account;
use crate::utils::crypto::{hash_password, verify_password};

const ACCOUNT_COLUMNS: &str = "id, username, email, password_hash, created_at";

#[derive(Clone)]
pub struct AccountService {
    pool: SqlitePool,
}

impl AccountService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {} FROM accounts WHERE id = ?",
            ACCOUNT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {} FROM accounts WHERE username = ?",
            ACCOUNT_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    /// Creates an account. Uniqueness of username and email is enforced by
    /// the table constraints; the username pre-check only gives a clearer
    /// message.
    #[instrument(skip(self, email, password))]
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<Account> {
        if self.find_by_username(username).await?.is_some() {
            return Err(Error::Conflict(format!("User {} already exists", username)));
        }

        let password_hash = hash_password(password)?;
        let id = sqlx::query(
            "INSERT INTO accounts (username, email, password_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(username)
        .bind(email)
        .bind(&password_hash)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        info!(account_id = id, "account registered");
        self.find_by_id(id)
            .await?
            .ok_or_else(|| Error::Internal("Account vanished after insert".to_string()))
    }

    /// Unknown username and wrong password produce the same error.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Account> {
        let invalid = || Error::Unauthorized("Invalid username or password".to_string());
        let account = self.find_by_username(username).await?.ok_or_else(invalid)?;
        if !verify_password(password, &account.password_hash) {
            return Err(invalid());
        }
        Ok(account)
    }
}
