//! Salon entities: clients, services, masters and appointments.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::Calendar;
use crate::clock::ClockTime;

/// Defines a `u32` newtype id with `Display` and conversions to and from `u32`.
macro_rules! define_id_type {
    ($name:ident) => {
        #[derive(
            Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(v: u32) -> Self {
                $name(v)
            }
        }

        impl From<$name> for u32 {
            fn from(v: $name) -> Self {
                v.0
            }
        }
    };
}

define_id_type!(ClientId);
define_id_type!(ServiceId);
define_id_type!(MasterId);
define_id_type!(AppointmentId);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    /// Every appointment ever booked for this client, in booking order. Cancelled
    /// appointments stay in the history.
    pub visits: Vec<AppointmentId>,
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Client: {}, phone: {}", self.name, self.phone)
    }
}

/// A bookable service. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    /// Length in minutes, always positive.
    pub duration: u32,
    pub price: u32,
    /// Free-form tag such as `hair`, `nails` or `cosmetology`.
    pub category: String,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} min - {}", self.name, self.duration, self.price)
    }
}

/// A service provider with a personal calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Master {
    pub id: MasterId,
    pub name: String,
    /// Names of the services this master performs.
    pub specialization: Vec<String>,
    pub phone: String,
    /// Idle minutes booked after every service.
    pub break_duration: u32,
    #[serde(skip)]
    pub calendar: Calendar,
}

impl Master {
    pub fn offers(&self, service_name: &str) -> bool {
        self.specialization.iter().any(|s| s == service_name)
    }
}

impl fmt::Display for Master {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Master: {} ({})", self.name, self.specialization.join(", "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Confirmed,
    Cancelled,
    Completed,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Confirmed => f.write_str("confirmed"),
            AppointmentStatus::Cancelled => f.write_str("cancelled"),
            AppointmentStatus::Completed => f.write_str("completed"),
        }
    }
}

/// A booked visit. Refers to its client, master and service by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub client: ClientId,
    pub master: MasterId,
    pub service: ServiceId,
    pub date: NaiveDate,
    pub time: ClockTime,
    pub status: AppointmentStatus,
}

impl Appointment {
    pub fn is_confirmed(&self) -> bool {
        self.status == AppointmentStatus::Confirmed
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Appointment #{}: {} {} ({})",
            self.id, self.date, self.time, self.status
        )
    }
}
