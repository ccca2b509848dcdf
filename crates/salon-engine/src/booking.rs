//! The booking coordinator.
//!
//! [`Salon`] owns the client, service, master and appointment directories and is the
//! only place appointments are created or closed. A booking runs validation, then the
//! eligibility check, then the calendar availability check for the service and its
//! trailing break, and commits only when all three pass. Every domain failure comes back as a [`SalonError`] whose `Display` is
//! the reason shown to the user.
//!
//! All mutating operations take `&mut self`, so the availability check and the commit
//! that follows it can never interleave with another booking.

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::clock::ClockTime;
use crate::config::SalonConfig;
use crate::directory::Directory;
use crate::error::{Result, SalonError};
use crate::model::{
    Appointment, AppointmentId, AppointmentStatus, Client, ClientId, Master, MasterId, Service,
    ServiceId,
};
use crate::slots::{self, FreeWindow, WorkingHours};
use crate::validator;

type Today = Box<dyn Fn() -> NaiveDate + Send + Sync>;

pub struct Salon {
    config: SalonConfig,
    hours: WorkingHours,
    today: Today,
    clients: Directory<ClientId, Client>,
    services: Directory<ServiceId, Service>,
    masters: Directory<MasterId, Master>,
    appointments: Directory<AppointmentId, Appointment>,
}

impl Default for Salon {
    fn default() -> Self {
        Self::with_hours(SalonConfig::default(), WorkingHours::default())
    }
}

impl Salon {
    /// Create an empty salon. Past-date checks use the local calendar date.
    ///
    /// # Errors
    /// `SalonError::Config` if the configured working hours are invalid.
    pub fn new(config: SalonConfig) -> Result<Self> {
        let hours = config.working_hours()?;
        Ok(Self::with_hours(config, hours))
    }

    fn with_hours(config: SalonConfig, hours: WorkingHours) -> Self {
        Self {
            config,
            hours,
            today: Box::new(|| Local::now().date_naive()),
            clients: Directory::new(),
            services: Directory::new(),
            masters: Directory::new(),
            appointments: Directory::new(),
        }
    }

    /// Replace the source of "today" used by the past-date check.
    pub fn with_clock(mut self, today: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.today = Box::new(today);
        self
    }

    pub fn config(&self) -> &SalonConfig {
        &self.config
    }

    pub fn working_hours(&self) -> &WorkingHours {
        &self.hours
    }

    // ── Directories ─────────────────────────────────────────────────────────

    pub fn add_client(
        &mut self,
        name: impl Into<String>,
        phone: impl Into<String>,
        email: Option<String>,
    ) -> ClientId {
        let (name, phone) = (name.into(), phone.into());
        self.clients.insert_with(|id| Client {
            id,
            name,
            phone,
            email,
            visits: Vec::new(),
        })
    }

    /// # Errors
    /// `SalonError::InvalidDuration` if `duration` is zero.
    pub fn add_service(
        &mut self,
        name: impl Into<String>,
        duration: u32,
        price: u32,
        category: impl Into<String>,
    ) -> Result<ServiceId> {
        if duration == 0 {
            return Err(SalonError::InvalidDuration(duration));
        }
        let (name, category) = (name.into(), category.into());
        Ok(self.services.insert_with(|id| Service {
            id,
            name,
            duration,
            price,
            category,
        }))
    }

    /// Add a master performing the named services. Without an explicit
    /// `break_duration` the configured default break applies.
    pub fn add_master<S: Into<String>>(
        &mut self,
        name: impl Into<String>,
        specialization: impl IntoIterator<Item = S>,
        phone: impl Into<String>,
        break_duration: Option<u32>,
    ) -> MasterId {
        let mut services: Vec<String> = Vec::new();
        for service in specialization {
            let service = service.into();
            if !services.contains(&service) {
                services.push(service);
            }
        }
        let (name, phone) = (name.into(), phone.into());
        let break_duration = break_duration.unwrap_or(self.config.default_break_minutes);
        self.masters.insert_with(|id| Master {
            id,
            name,
            specialization: services,
            phone,
            break_duration,
            calendar: Default::default(),
        })
    }

    pub fn client(&self, id: ClientId) -> Option<&Client> {
        self.clients.get(id)
    }

    pub fn service(&self, id: ServiceId) -> Option<&Service> {
        self.services.get(id)
    }

    pub fn master(&self, id: MasterId) -> Option<&Master> {
        self.masters.get(id)
    }

    pub fn appointment(&self, id: AppointmentId) -> Option<&Appointment> {
        self.appointments.get(id)
    }

    pub fn clients(&self) -> impl Iterator<Item = &Client> + '_ {
        self.clients.iter()
    }

    pub fn services(&self) -> impl Iterator<Item = &Service> + '_ {
        self.services.iter()
    }

    pub fn masters(&self) -> impl Iterator<Item = &Master> + '_ {
        self.masters.iter()
    }

    /// All appointments ever created, in id order.
    pub fn appointments(&self) -> impl Iterator<Item = &Appointment> + '_ {
        self.appointments.iter()
    }

    /// Masters whose specialization includes the given service, in id order.
    pub fn masters_offering(&self, service_id: ServiceId) -> Vec<&Master> {
        let Some(service) = self.services.get(service_id) else {
            return Vec::new();
        };
        self.masters
            .iter()
            .filter(|m| m.offers(&service.name))
            .collect()
    }

    // ── Booking ─────────────────────────────────────────────────────────────

    /// Book `service_id` with `master_id` for `client_id` at `time_slot` on `date`.
    ///
    /// Checks run in order: time format, 5-minute granularity, past date, existence
    /// of all three parties, eligibility of the master, calendar availability for the
    /// service's exact duration. On success the service and the master's break are
    /// written to the calendar and the appointment joins the client's history.
    pub fn create_appointment(
        &mut self,
        client_id: ClientId,
        master_id: MasterId,
        service_id: ServiceId,
        date: &str,
        time_slot: &str,
    ) -> Result<Appointment> {
        let result = self.book(client_id, master_id, service_id, date, time_slot);
        if let Err(e) = &result {
            debug!(
                client = %client_id,
                master = %master_id,
                service = %service_id,
                date,
                time_slot,
                kind = ?e.kind(),
                reason = %e,
                "booking rejected"
            );
        }
        result
    }

    fn book(
        &mut self,
        client_id: ClientId,
        master_id: MasterId,
        service_id: ServiceId,
        date: &str,
        time_slot: &str,
    ) -> Result<Appointment> {
        validator::validate_time_format(time_slot)?;
        let time = validator::validate_round_minutes(time_slot)?;
        let date = validator::validate_future_date(date, (self.today)())?;

        let (Some(_), Some(master), Some(service)) = (
            self.clients.get(client_id),
            self.masters.get(master_id),
            self.services.get(service_id),
        ) else {
            return Err(SalonError::PartyNotFound);
        };

        if !master.offers(&service.name) {
            return Err(SalonError::ServiceNotOffered {
                master: master.name.clone(),
                service: service.name.clone(),
            });
        }

        let duration = service.duration;
        if !master.calendar.is_available(date, time, duration) {
            return Err(SalonError::SlotOccupied { slot: time, date });
        }
        if !break_fits(master, date, time, duration) {
            return Err(SalonError::SlotOccupied { slot: time, date });
        }
        let break_duration = master.break_duration;

        self.masters
            .get_mut(master_id)
            .ok_or(SalonError::PartyNotFound)?
            .calendar
            .book_interval(date, time, duration, break_duration)?;

        let id = self.appointments.insert_with(|id| Appointment {
            id,
            client: client_id,
            master: master_id,
            service: service_id,
            date,
            time,
            status: AppointmentStatus::Confirmed,
        });
        if let Some(client) = self.clients.get_mut(client_id) {
            client.visits.push(id);
        }

        info!(
            appointment = %id,
            client = %client_id,
            master = %master_id,
            service = %service_id,
            %date,
            %time,
            "appointment booked"
        );
        self.appointments
            .get(id)
            .cloned()
            .ok_or(SalonError::NotFound {
                entity: "Appointment",
                id: id.0,
            })
    }

    /// Cancel a confirmed appointment and free its service and break intervals.
    ///
    /// # Errors
    /// `SalonError::NotFound` for an unknown id, `SalonError::AppointmentClosed` if the
    /// appointment is already cancelled or completed. The calendar is untouched then.
    pub fn cancel_appointment(&mut self, id: AppointmentId) -> Result<()> {
        let appointment = self.confirmed_appointment(id)?;
        let (master_id, date, time) = (appointment.master, appointment.date, appointment.time);
        let duration = self
            .services
            .get(appointment.service)
            .map(|s| s.duration)
            .ok_or(SalonError::NotFound {
                entity: "Service",
                id: appointment.service.0,
            })?;

        self.set_status(id, AppointmentStatus::Cancelled);
        if let Some(master) = self.masters.get_mut(master_id) {
            master.calendar.release_interval(date, time, duration);
        }

        info!(appointment = %id, master = %master_id, %date, %time, "appointment cancelled");
        Ok(())
    }

    /// Mark a confirmed appointment as completed. Its calendar time stays occupied.
    pub fn complete_appointment(&mut self, id: AppointmentId) -> Result<()> {
        self.confirmed_appointment(id)?;
        self.set_status(id, AppointmentStatus::Completed);
        info!(appointment = %id, "appointment completed");
        Ok(())
    }

    fn confirmed_appointment(&self, id: AppointmentId) -> Result<&Appointment> {
        let appointment = self.appointments.get(id).ok_or(SalonError::NotFound {
            entity: "Appointment",
            id: id.0,
        })?;
        if !appointment.is_confirmed() {
            return Err(SalonError::AppointmentClosed {
                id,
                status: appointment.status,
            });
        }
        Ok(appointment)
    }

    fn set_status(&mut self, id: AppointmentId, status: AppointmentStatus) {
        if let Some(appointment) = self.appointments.get_mut(id) {
            appointment.status = status;
        }
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    /// Open start times for a `duration`-minute service with `master_id` on `date`,
    /// probed across the configured working hours.
    ///
    /// Only starts that [`Salon::create_appointment`] would accept are returned, so a
    /// start whose trailing break runs into a booking is left out.
    pub fn available_slots(
        &self,
        master_id: MasterId,
        date: &str,
        duration: u32,
    ) -> Result<Vec<ClockTime>> {
        let date = validator::parse_date(date)?;
        let master = self.require_master(master_id)?;
        let mut slots = slots::find_available_slots(&master.calendar, date, duration, &self.hours);
        slots.retain(|start| break_fits(master, date, *start, duration));
        Ok(slots)
    }

    /// Gaps in `master_id`'s working day on `date`.
    pub fn free_windows(&self, master_id: MasterId, date: &str) -> Result<Vec<FreeWindow>> {
        let date = validator::parse_date(date)?;
        let master = self.require_master(master_id)?;
        Ok(slots::find_free_windows(&master.calendar, date, &self.hours))
    }

    /// The earliest gap of at least `min_duration` minutes in `master_id`'s day.
    pub fn first_free_window(
        &self,
        master_id: MasterId,
        date: &str,
        min_duration: u32,
    ) -> Result<Option<FreeWindow>> {
        let date = validator::parse_date(date)?;
        let master = self.require_master(master_id)?;
        Ok(slots::first_free_window(
            &master.calendar,
            date,
            &self.hours,
            min_duration,
        ))
    }

    /// Schedule lines for `master_id` on `date`: `HH:MM (N min)` for services and
    /// `HH:MM (break)` for breaks, in time order.
    pub fn master_schedule(&self, master_id: MasterId, date: &str) -> Result<Vec<String>> {
        let date = validator::parse_date(date)?;
        let master = self.require_master(master_id)?;
        Ok(master
            .calendar
            .list_busy_intervals(date)
            .iter()
            .map(|busy| busy.describe())
            .collect())
    }

    /// The client's visit history in booking order, cancelled visits included.
    pub fn client_appointments(&self, client_id: ClientId) -> Result<Vec<&Appointment>> {
        let client = self.clients.get(client_id).ok_or(SalonError::NotFound {
            entity: "Client",
            id: client_id.0,
        })?;
        Ok(client
            .visits
            .iter()
            .filter_map(|id| self.appointments.get(*id))
            .collect())
    }

    /// One-line summary naming the client, master and service.
    pub fn describe_appointment(&self, appointment: &Appointment) -> String {
        let client = self.clients.get(appointment.client).map_or("?", |c| c.name.as_str());
        let master = self.masters.get(appointment.master).map_or("?", |m| m.name.as_str());
        let service = self
            .services
            .get(appointment.service)
            .map_or("?", |s| s.name.as_str());
        format!(
            "Appointment #{}: {} -> {} ({}) {} {}",
            appointment.id, client, master, service, appointment.date, appointment.time
        )
    }

    fn require_master(&self, id: MasterId) -> Result<&Master> {
        self.masters.get(id).ok_or(SalonError::NotFound {
            entity: "Master",
            id: id.0,
        })
    }
}

/// Whether the break after a `duration`-minute service at `start` lands on free time.
fn break_fits(master: &Master, date: NaiveDate, start: ClockTime, duration: u32) -> bool {
    master.break_duration == 0
        || master
            .calendar
            .is_available(date, start.plus(duration), master.break_duration)
}
