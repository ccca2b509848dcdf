//! TOML scenario files: a salon roster plus an ordered list of booking requests.
//!
//! ```toml
//! [settings]
//! name = "Elite Salon"
//!
//! [[services]]
//! name = "Haircut"
//! duration = 60
//! price = 1500
//! category = "hair"
//!
//! [[masters]]
//! name = "Anna"
//! services = ["Haircut"]
//! break_minutes = 10
//!
//! [[clients]]
//! name = "Ivan Petrov"
//! phone = "+79031112233"
//!
//! [[requests]]
//! action = "book"
//! client = 1
//! master = 1
//! service = 1
//! date = "2099-06-01"
//! time = "10:00"
//! ```
//!
//! Entities are numbered from 1 in file order, per kind.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use salon_engine::{
    Appointment, AppointmentId, ClientId, MasterId, Salon, SalonConfig, ServiceId,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub settings: SalonConfig,
    #[serde(default)]
    pub services: Vec<ServiceSpec>,
    #[serde(default)]
    pub masters: Vec<MasterSpec>,
    #[serde(default)]
    pub clients: Vec<ClientSpec>,
    #[serde(default)]
    pub requests: Vec<Request>,
}

#[derive(Debug, Deserialize)]
pub struct ServiceSpec {
    pub name: String,
    pub duration: u32,
    #[serde(default)]
    pub price: u32,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct MasterSpec {
    pub name: String,
    pub services: Vec<String>,
    #[serde(default)]
    pub phone: String,
    /// Falls back to `settings.default_break_minutes`.
    pub break_minutes: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ClientSpec {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    pub email: Option<String>,
}

/// One step replayed against the salon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Request {
    Book {
        client: u32,
        master: u32,
        service: u32,
        date: String,
        time: String,
    },
    Cancel {
        appointment: u32,
    },
    Complete {
        appointment: u32,
    },
}

impl Request {
    pub fn action(&self) -> &'static str {
        match self {
            Request::Book { .. } => "book",
            Request::Cancel { .. } => "cancel",
            Request::Complete { .. } => "complete",
        }
    }
}

/// What happened to one request.
#[derive(Debug, Serialize)]
pub struct Outcome {
    /// 1-based position in the request list.
    pub index: usize,
    #[serde(flatten)]
    pub request: Request,
    pub ok: bool,
    pub message: String,
    /// The appointment created by a successful `book`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booked: Option<Appointment>,
}

impl Scenario {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("Failed to parse scenario TOML")
    }

    pub fn load(path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path))?;
        Self::from_toml_str(&raw).with_context(|| format!("Invalid scenario: {}", path))
    }

    /// Build the salon roster. `today` pins the date used by the past-date check.
    pub fn build(&self, today: Option<NaiveDate>) -> Result<Salon> {
        let mut salon =
            Salon::new(self.settings.clone()).context("Invalid [settings] section")?;
        if let Some(today) = today {
            salon = salon.with_clock(move || today);
        }

        for spec in &self.services {
            salon
                .add_service(&spec.name, spec.duration, spec.price, &spec.category)
                .with_context(|| format!("Invalid service '{}'", spec.name))?;
        }
        for spec in &self.masters {
            salon.add_master(
                &spec.name,
                spec.services.iter().cloned(),
                &spec.phone,
                spec.break_minutes,
            );
        }
        for spec in &self.clients {
            salon.add_client(&spec.name, &spec.phone, spec.email.clone());
        }

        debug!(
            services = self.services.len(),
            masters = self.masters.len(),
            clients = self.clients.len(),
            "roster loaded"
        );
        Ok(salon)
    }

    /// Apply every request in order. Failed requests are reported, not fatal.
    pub fn replay(&self, salon: &mut Salon) -> Vec<Outcome> {
        self.requests
            .iter()
            .enumerate()
            .map(|(i, request)| apply(salon, i + 1, request))
            .collect()
    }
}

fn apply(salon: &mut Salon, index: usize, request: &Request) -> Outcome {
    let result = match request {
        Request::Book {
            client,
            master,
            service,
            date,
            time,
        } => salon
            .create_appointment(
                ClientId(*client),
                MasterId(*master),
                ServiceId(*service),
                date,
                time,
            )
            .map(|appointment| (salon.describe_appointment(&appointment), Some(appointment))),
        Request::Cancel { appointment } => salon
            .cancel_appointment(AppointmentId(*appointment))
            .map(|()| (format!("Appointment #{} cancelled", appointment), None)),
        Request::Complete { appointment } => salon
            .complete_appointment(AppointmentId(*appointment))
            .map(|()| (format!("Appointment #{} completed", appointment), None)),
    };

    let (ok, message, booked) = match result {
        Ok((message, booked)) => (true, message, booked),
        Err(e) => (false, e.to_string(), None),
    };
    Outcome {
        index,
        request: request.clone(),
        ok,
        message,
        booked,
    }
}
