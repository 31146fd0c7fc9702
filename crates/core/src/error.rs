//! Error taxonomy for the core services.
//!
//! Every failure surfaced by the core is one of these variants. Business
//! rejections (`NoBedAvailable`, `NotFound`) are expected outcomes that the
//! HTTP layer maps to 4xx responses; the snapshot variants indicate storage
//! trouble and map to 5xx.

/// The entity class a `NotFound` error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Bed,
    Patient,
    Staff,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EntityKind::Bed => "bed",
            EntityKind::Patient => "patient",
            EntityKind::Staff => "staff member",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HospitalError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("no available beds in department '{department}'")]
    NoBedAvailable { department: String },
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("account pending admin approval")]
    PendingApproval,
    #[error("bed/patient references out of sync: {0}")]
    Consistency(String),
    #[error("failed to read snapshot: {0}")]
    SnapshotRead(std::io::Error),
    #[error("failed to write snapshot: {0}")]
    SnapshotWrite(std::io::Error),
    #[error("failed to serialize snapshot: {0}")]
    SnapshotSerialize(serde_json::Error),
    #[error("failed to deserialize snapshot: {0}")]
    SnapshotDeserialize(serde_json::Error),
    #[error("failed to hash password: {0}")]
    PasswordHash(bcrypt::BcryptError),
}

impl HospitalError {
    /// Convenience constructor for `NotFound`.
    pub fn not_found(kind: EntityKind, id: impl std::fmt::Display) -> Self {
        HospitalError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

impl From<wardline_types::TextError> for HospitalError {
    fn from(err: wardline_types::TextError) -> Self {
        HospitalError::Validation(err.to_string())
    }
}

pub type HospitalResult<T> = std::result::Result<T, HospitalError>;
