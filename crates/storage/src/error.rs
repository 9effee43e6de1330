use thiserror::Error;

/// The store constraint a rejected write would have breached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    HouseNameUnique,
    HouseNameEmpty,
    EventIdentityUnique,
    EventNameEmpty,
    ResultPositionUnique,
    ResultPositionPositive,
    UnknownEvent,
    UnknownHouse,
}

impl Constraint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HouseNameUnique => "house_name_unique",
            Self::HouseNameEmpty => "house_name_not_empty",
            Self::EventIdentityUnique => "event_identity_unique",
            Self::EventNameEmpty => "event_name_not_empty",
            Self::ResultPositionUnique => "result_position_unique",
            Self::ResultPositionPositive => "result_position_positive",
            Self::UnknownEvent => "result_event_exists",
            Self::UnknownHouse => "result_house_exists",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::HouseNameUnique => "House name already exists",
            Self::HouseNameEmpty => "House name must not be empty",
            Self::EventIdentityUnique => {
                "Event with this name, category and gender already exists"
            }
            Self::EventNameEmpty => "Event name must not be empty",
            Self::ResultPositionUnique => "Position is already taken for this event",
            Self::ResultPositionPositive => "Position must be a positive integer",
            Self::UnknownEvent => "Event does not exist",
            Self::UnknownHouse => "House does not exist",
        }
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message(), self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Store file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store is busy")]
    Busy,

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(Constraint),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    /// The violated constraint, if this error is a constraint violation.
    pub fn constraint(&self) -> Option<Constraint> {
        match self {
            StorageError::ConstraintViolation(c) => Some(*c),
            _ => None,
        }
    }
}
