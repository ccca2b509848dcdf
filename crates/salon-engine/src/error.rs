//! Error types for salon-engine operations.

use chrono::NaiveDate;
use thiserror::Error;

use crate::clock::ClockTime;
use crate::model::{AppointmentId, AppointmentStatus};

/// Errors produced while validating and booking appointments.
///
/// The `Display` text of each variant is the human-readable reason reported to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SalonError {
    #[error("Invalid time format: {0}. Use HH:MM")]
    InvalidTimeFormat(String),

    /// The minute component is not a multiple of 5.
    #[error("Time must be a round number of minutes (multiple of 5). Got: {0}")]
    UnroundMinutes(String),

    #[error("Invalid date: {0}. Use YYYY-MM-DD")]
    MalformedDate(String),

    #[error("Cannot book a past date: {0}")]
    PastDate(NaiveDate),

    #[error("Master {master} does not provide service '{service}'")]
    ServiceNotOffered { master: String, service: String },

    #[error("Time {slot} on {date} is occupied")]
    SlotOccupied { slot: ClockTime, date: NaiveDate },

    /// One of the client, master or service of a booking request is unknown.
    #[error("Client, master or service not found")]
    PartyNotFound,

    #[error("{entity} #{id} not found")]
    NotFound { entity: &'static str, id: u32 },

    #[error("Appointment #{id} is already {status}")]
    AppointmentClosed {
        id: AppointmentId,
        status: AppointmentStatus,
    },

    #[error("Service duration must be positive, got {0} minutes")]
    InvalidDuration(u32),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of a [`SalonError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Time string is not `HH:MM`.
    Format,
    /// Minute component not a multiple of 5.
    Granularity,
    PastDate,
    /// Master does not offer the requested service.
    Eligibility,
    /// Requested interval overlaps a booking or its trailing break.
    Conflict,
    NotFound,
    /// Appointment is no longer confirmed.
    State,
    /// Malformed date, non-positive duration or bad configuration.
    Input,
}

impl SalonError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SalonError::InvalidTimeFormat(_) => ErrorKind::Format,
            SalonError::UnroundMinutes(_) => ErrorKind::Granularity,
            SalonError::PastDate(_) => ErrorKind::PastDate,
            SalonError::ServiceNotOffered { .. } => ErrorKind::Eligibility,
            SalonError::SlotOccupied { .. } => ErrorKind::Conflict,
            SalonError::PartyNotFound | SalonError::NotFound { .. } => ErrorKind::NotFound,
            SalonError::AppointmentClosed { .. } => ErrorKind::State,
            SalonError::MalformedDate(_)
            | SalonError::InvalidDuration(_)
            | SalonError::Config(_) => ErrorKind::Input,
        }
    }
}

pub type Result<T> = std::result::Result<T, SalonError>;
