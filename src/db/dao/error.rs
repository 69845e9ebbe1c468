use sea_orm::DbErr;
use std::fmt;

#[derive(Debug)]
pub enum DaoLayerError {
    Db(DbErr),
}

pub type DaoResult<T> = Result<T, DaoLayerError>;

impl fmt::Display for DaoLayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaoLayerError::Db(err) => write!(f, "Database error: {err}"),
        }
    }
}

impl std::error::Error for DaoLayerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DaoLayerError::Db(err) => Some(err),
        }
    }
}

impl From<DbErr> for DaoLayerError {
    fn from(err: DbErr) -> Self {
        DaoLayerError::Db(err)
    }
}
