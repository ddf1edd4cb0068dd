//! Database access layer with connection pooling and migrations
//!
//! This module is organized by domain:
//! - `transactions` - Ledger transaction operations
//! - `incomes` - Income operations
//! - `holdings` - Liabilities and assets
//! - `categories` - Expense category list
//! - `budgets` - Monthly category budgets
//! - `recurring` - Recurring entry templates
//!
//! All tables are scoped by `user_id`; every query takes the acting user.
//! Writes that must land together go through [`Database::batch_submit`],
//! which wraps them in a single SQLite transaction.

use chrono::{DateTime, NaiveDate, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::info;

use crate::dispatch::{ChangeDispatcher, Collection};
use crate::error::{Error, Result};
use crate::models::{NewIncome, NewTransaction};

mod budgets;
mod categories;
mod holdings;
mod incomes;
mod recurring;
mod transactions;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Environment variable for database encryption key
pub const DB_KEY_ENV: &str = "HEARTH_DB_KEY";

/// Derive an encryption key from a passphrase using Argon2
///
/// Uses a fixed application salt so the same passphrase always produces the same key,
/// regardless of database path. This allows moving/renaming/restoring the database freely.
fn derive_key(passphrase: &str) -> Result<String> {
    use argon2::{password_hash::SaltString, Argon2, PasswordHasher};

    // Fixed application salt - changing this would invalidate all existing encrypted databases
    const APP_SALT: &[u8; 16] = b"hearth-salt-v1-f";

    let salt = SaltString::encode_b64(APP_SALT)
        .map_err(|e| Error::Encryption(format!("Failed to create salt: {}", e)))?;

    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(passphrase.as_bytes(), &salt)
        .map_err(|e| Error::Encryption(format!("Failed to derive key: {}", e)))?;

    // Extract the hash portion for use as SQLCipher key (hex encoded)
    let hash_str = hash
        .hash
        .ok_or_else(|| Error::Encryption("No hash output".to_string()))?;
    Ok(hex::encode(hash_str.as_bytes()))
}

/// Parse a SQLite datetime string into a DateTime<Utc>
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    // SQLite stores as "YYYY-MM-DD HH:MM:SS" format
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.and_utc())
        .unwrap_or_else(|_| Utc::now())
}

/// A single write queued for atomic submission
///
/// The recurring materializer builds a batch of these so that created
/// occurrences and the cursor advances they justify commit together.
#[derive(Debug, Clone)]
pub enum StoreOp {
    InsertTransaction(NewTransaction),
    InsertIncome(NewIncome),
    AdvanceRecurringCursor { template_id: i64, cursor: NaiveDate },
}

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    dispatcher: ChangeDispatcher,
    /// Path to the database file
    db_path: String,
}

impl Database {
    /// Create a new database connection pool with encryption
    ///
    /// Requires `HEARTH_DB_KEY` environment variable to be set.
    /// The database will be encrypted using SQLCipher with a key derived
    /// from the passphrase via Argon2.
    ///
    /// Returns an error if `HEARTH_DB_KEY` is not set. Use `new_unencrypted()`
    /// for development/testing without encryption.
    pub fn new(path: &str) -> Result<Self> {
        let encryption_key = std::env::var(DB_KEY_ENV).ok();
        match encryption_key {
            Some(key) => Self::new_with_key(path, Some(&key)),
            None => Err(Error::Encryption(format!(
                "Database encryption required. Set {} environment variable with your passphrase, \
                or use --no-encrypt for unencrypted databases (not recommended for production).",
                DB_KEY_ENV
            ))),
        }
    }

    /// Create a new unencrypted database connection pool
    ///
    /// WARNING: This creates an unencrypted database. Only use for development
    /// or testing. For production, use `new()` with `HEARTH_DB_KEY` set.
    pub fn new_unencrypted(path: &str) -> Result<Self> {
        Self::new_with_key(path, None)
    }

    /// Create a new database with an explicit encryption key
    pub fn new_with_key(path: &str, passphrase: Option<&str>) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);

        let pool = if let Some(pass) = passphrase {
            let key = derive_key(pass)?;
            let key_pragma = format!("PRAGMA key = 'x\"{}\"';", key);

            // Use with_init to set the key on every new connection
            let manager = manager.with_init(move |conn| {
                conn.execute_batch(&key_pragma)?;
                Ok(())
            });

            Pool::builder().max_size(10).build(manager)?
        } else {
            Pool::builder().max_size(10).build(manager)?
        };

        let db = Self {
            pool,
            dispatcher: ChangeDispatcher::new(),
            db_path: path.to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create an in-memory database (for testing)
    ///
    /// Note: Uses a temporary file rather than `:memory:` because SQLCipher
    /// has issues with in-memory databases in the connection pool.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = format!("/tmp/hearth_test_{}_{}.db", std::process::id(), id);

        // Remove any existing file
        let _ = std::fs::remove_file(&path);

        Self::new_unencrypted(&path)
    }

    /// Check if the database is encrypted
    pub fn is_encrypted(&self) -> Result<bool> {
        let conn = self.conn()?;
        // SQLCipher sets cipher_version if encryption is active
        let result: rusqlite::Result<String> =
            conn.query_row("PRAGMA cipher_version;", [], |row| row.get(0));
        Ok(result.is_ok() && std::env::var(DB_KEY_ENV).is_ok())
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Change notifications for this database
    pub fn dispatcher(&self) -> &ChangeDispatcher {
        &self.dispatcher
    }

    pub(crate) fn notify(&self, collection: Collection) {
        self.dispatcher.notify(collection);
    }

    /// Submit a batch of writes in a single SQLite transaction
    ///
    /// Either every operation lands or none does. Observers are notified once
    /// per touched collection, after the commit.
    pub fn batch_submit(&self, user_id: &str, ops: &[StoreOp]) -> Result<()> {
        if ops.is_empty() {
            return Ok(());
        }

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        for op in ops {
            match op {
                StoreOp::InsertTransaction(ntx) => {
                    transactions::insert_in(&tx, user_id, ntx)?;
                }
                StoreOp::InsertIncome(inc) => {
                    incomes::insert_in(&tx, user_id, inc)?;
                }
                StoreOp::AdvanceRecurringCursor {
                    template_id,
                    cursor,
                } => {
                    recurring::advance_cursor_in(&tx, user_id, *template_id, *cursor)?;
                }
            }
        }

        tx.commit()?;

        let mut touched = Vec::new();
        for op in ops {
            let collection = match op {
                StoreOp::InsertTransaction(_) => Collection::Transactions,
                StoreOp::InsertIncome(_) => Collection::Incomes,
                StoreOp::AdvanceRecurringCursor { .. } => Collection::Recurring,
            };
            if !touched.contains(&collection) {
                touched.push(collection);
            }
        }
        for collection in touched {
            self.notify(collection);
        }

        Ok(())
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- Enable foreign keys
            PRAGMA foreign_keys = ON;

            -- WAL mode: better concurrency, readers don't block writers
            -- Note: creates -wal and -shm sidecar files alongside the database
            PRAGMA journal_mode = WAL;

            -- Synchronous NORMAL: good balance of safety and performance
            PRAGMA synchronous = NORMAL;

            -- Liabilities (loans, credit lines)
            -- Defined before transactions because transactions references liabilities
            CREATE TABLE IF NOT EXISTS liabilities (
                id INTEGER PRIMARY KEY,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                total_amount REAL NOT NULL,
                currency TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_liabilities_user ON liabilities(user_id);

            -- Transactions (expenses, savings movements, liability payments,
            -- opening balances)
            CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY,
                user_id TEXT NOT NULL,
                date DATE NOT NULL,
                kind TEXT NOT NULL,
                amount REAL NOT NULL,
                currency TEXT NOT NULL,
                category TEXT,
                payer TEXT,
                saver TEXT,
                liability_id INTEGER REFERENCES liabilities(id),
                description TEXT,
                import_hash TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                UNIQUE(user_id, import_hash)
            );

            CREATE INDEX IF NOT EXISTS idx_transactions_user_date ON transactions(user_id, date);
            CREATE INDEX IF NOT EXISTS idx_transactions_kind ON transactions(kind);
            CREATE INDEX IF NOT EXISTS idx_transactions_liability ON transactions(liability_id);

            -- Incomes
            CREATE TABLE IF NOT EXISTS incomes (
                id INTEGER PRIMARY KEY,
                user_id TEXT NOT NULL,
                date DATE NOT NULL,
                amount REAL NOT NULL,
                currency TEXT NOT NULL,
                source TEXT NOT NULL,
                description TEXT,
                import_hash TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                UNIQUE(user_id, import_hash)
            );

            CREATE INDEX IF NOT EXISTS idx_incomes_user_date ON incomes(user_id, date);

            -- Assets (property, deposits, vehicles)
            CREATE TABLE IF NOT EXISTS assets (
                id INTEGER PRIMARY KEY,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                value REAL NOT NULL,
                currency TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_assets_user ON assets(user_id);

            -- Expense categories (ordered per user)
            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                position INTEGER NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                UNIQUE(user_id, name)
            );

            CREATE INDEX IF NOT EXISTS idx_categories_user ON categories(user_id, position);

            -- Monthly category budgets
            CREATE TABLE IF NOT EXISTS budgets (
                user_id TEXT NOT NULL,
                year INTEGER NOT NULL,
                month INTEGER NOT NULL,
                category TEXT NOT NULL,
                amount REAL NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (user_id, year, month, category)
            );

            -- Recurring entry templates
            -- last_processed is the materialization cursor; it only advances
            CREATE TABLE IF NOT EXISTS recurring_templates (
                id INTEGER PRIMARY KEY,
                user_id TEXT NOT NULL,
                frequency TEXT NOT NULL,
                start_date DATE NOT NULL,
                last_processed DATE,
                details TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_recurring_user ON recurring_templates(user_id);
            "#,
        )?;

        info!("Database schema initialized");
        Ok(())
    }
}
