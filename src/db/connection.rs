use std::{sync::Arc, time::Duration};

use anyhow::{Result, bail};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::{info, warn};

use super::{dao::DaoContext, memory::MemoryGroceryStore, store::GroceryStore};
use crate::config::DatabaseConfig;

const SQLITE_BUSY_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbBackendKind {
    Postgres,
    Sqlite,
}

impl DbBackendKind {
    pub fn from_url(url: &str) -> Result<Self> {
        let normalized = url.trim().to_ascii_lowercase();
        if normalized.starts_with("postgres://") || normalized.starts_with("postgresql://") {
            return Ok(Self::Postgres);
        }
        if normalized.starts_with("sqlite:") {
            return Ok(Self::Sqlite);
        }
        bail!(
            "unsupported database url '{}'; expected scheme postgres://, postgresql://, or sqlite://",
            redact_url(url)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DbBackendKind::Postgres => "postgres",
            DbBackendKind::Sqlite => "sqlite",
        }
    }
}

/// Opens the pool and creates or alters `grocery_items` to match the entity.
pub async fn connect(cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
    let backend = DbBackendKind::from_url(&cfg.url)?;

    let mut options = ConnectOptions::new(cfg.url.clone());
    options
        .max_connections(cfg.max_connections)
        .min_connections(cfg.min_idle)
        .connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    if backend == DbBackendKind::Sqlite {
        db.execute_unprepared(&format!("PRAGMA busy_timeout = {SQLITE_BUSY_TIMEOUT_MS}"))
            .await?;
    }

    info!(backend = backend.as_str(), "syncing database schema from entities");
    db.get_schema_registry("grocery_tree::db::entities::*")
        .sync(&db)
        .await?;
    Ok(db)
}

pub async fn open_store(cfg: Option<&DatabaseConfig>) -> Result<Arc<dyn GroceryStore>> {
    match cfg {
        Some(cfg) => {
            let db = connect(cfg).await?;
            Ok(Arc::new(DaoContext::new(&db).grocery()))
        }
        None => {
            warn!("no database configured; grocery items are kept in memory only");
            Ok(Arc::new(MemoryGroceryStore::new()))
        }
    }
}

fn redact_url(url: &str) -> String {
    let trimmed = url.trim();
    if let Some((scheme, _)) = trimmed.split_once("://") {
        format!("{scheme}://<redacted>")
    } else if let Some((scheme, _)) = trimmed.split_once(':') {
        format!("{scheme}:<redacted>")
    } else {
        "<invalid-url>".to_string()
    }
}
