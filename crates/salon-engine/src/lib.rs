//! # salon-engine
//!
//! Conflict-free appointment booking for a roster of service providers ("masters").
//!
//! Every master owns a personal [`Calendar`] of service and break intervals. Booking a
//! service validates the requested time, checks that the master offers the service,
//! checks the master's calendar for overlaps and then commits the service together with
//! the master's mandatory post-service break.
//!
//! ## Quick start
//!
//! ```rust
//! use salon_engine::Salon;
//!
//! let mut salon = Salon::default();
//! let haircut = salon.add_service("Haircut", 60, 1500, "hair").unwrap();
//! let anna = salon.add_master("Anna", ["Haircut"], "+10000000000", None);
//! let ivan = salon.add_client("Ivan", "+10000000001", None);
//!
//! let appointment = salon
//!     .create_appointment(ivan, anna, haircut, "2099-06-01", "10:00")
//!     .unwrap();
//! assert_eq!(appointment.time.to_string(), "10:00");
//!
//! let schedule = salon.master_schedule(anna, "2099-06-01").unwrap();
//! assert_eq!(schedule, vec!["10:00 (60 min)", "11:00 (break)"]);
//! ```
//!
//! ## Modules
//!
//! - [`clock`]: `ClockTime`, a minute-of-day value rendered as `HH:MM`
//! - [`validator`]: time format, 5-minute granularity and past-date checks
//! - [`calendar`]: per-master interval map with availability checks
//! - [`slots`]: open-slot enumeration and free windows inside working hours
//! - [`directory`]: keyed stores with monotonically increasing ids
//! - [`model`]: clients, services, masters and appointments
//! - [`booking`]: [`Salon`], the booking coordinator
//! - [`config`]: salon settings loaded from TOML
//! - [`error`]: Error types

pub mod booking;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod directory;
pub mod error;
pub mod model;
pub mod slots;
pub mod validator;

pub use booking::Salon;
pub use calendar::{BusyInterval, Calendar, IntervalKind};
pub use clock::ClockTime;
pub use config::SalonConfig;
pub use error::{ErrorKind, SalonError};
pub use model::{
    Appointment, AppointmentId, AppointmentStatus, Client, ClientId, Master, MasterId, Service,
    ServiceId,
};
pub use slots::{
    find_available_slots, find_free_windows, first_free_window, FreeWindow, WorkingHours,
};
