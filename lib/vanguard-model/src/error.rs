use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("{field} at {timestamp}s is outside the match duration of {duration}s")]
    TimestampOutOfRange {
        field: &'static str,
        timestamp: u32,
        duration: u32,
    },
    #[error("{field} names `{label}`, which is neither the team nor the opponent")]
    ForeignTeam { field: &'static str, label: String },
    #[error("round {found} follows round {previous}; round numbers must increase by one")]
    RoundOutOfOrder { previous: u8, found: u8 },
    #[error("round {0} has an eco flag that disagrees with its loadout")]
    EcoFlagMismatch(u8),
    #[error("round {0} has spike coordinates without a site, or a site without coordinates")]
    SpikeMismatch(u8),
    #[error("unknown label: {0}")]
    UnknownLabel(String),
}
