use chrono::{DateTime, TimeZone};
use rand::Rng;

pub const FIELD_COUNT: usize = 7;

pub const DESCRIPTION: &str = "Descripción";
pub const OPERATOR: &str = "Operador";
pub const ORIGIN: &str = "Origen";
pub const DESTINATION: &str = "Destino";
pub const WEIGHT: &str = "Peso";
pub const DATE: &str = "Fecha";
pub const TIME: &str = "Hora";

pub const WEIGHT_UNIT: &str = "kg";
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// One printed field. Only fields with `wrap` set may spill onto a second line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelField {
    pub label: &'static str,
    pub value: String,
    pub wrap: bool,
}

impl LabelField {
    fn single(label: &'static str, value: impl Into<String>) -> Self {
        Self { label, value: value.into(), wrap: false }
    }

    fn wrapped(label: &'static str, value: impl Into<String>) -> Self {
        Self { label, value: value.into(), wrap: true }
    }

    pub fn prefix(&self) -> String {
        format!("{}: ", self.label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelContent {
    pub description: String,
    pub operator: String,
    pub origin: String,
    pub destination: String,
    pub weight: String,
    pub date: String,
    pub time: String,
}

impl LabelContent {
    /// Fills in the date and time from `now` in whatever zone it carries.
    pub fn stamped<Tz: TimeZone>(
        description: &str,
        operator: &str,
        origin: &str,
        destination: &str,
        weight: String,
        now: &DateTime<Tz>,
    ) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            description: description.to_owned(),
            operator: operator.to_owned(),
            origin: origin.to_owned(),
            destination: destination.to_owned(),
            weight,
            date: now.format(DATE_FORMAT).to_string(),
            time: now.format(TIME_FORMAT).to_string(),
        }
    }

    pub fn fields(&self) -> [LabelField; FIELD_COUNT] {
        [
            LabelField::single(DESCRIPTION, self.description.as_str()),
            LabelField::single(OPERATOR, self.operator.as_str()),
            LabelField::wrapped(ORIGIN, self.origin.as_str()),
            LabelField::wrapped(DESTINATION, self.destination.as_str()),
            LabelField::single(WEIGHT, format!("{} {}", self.weight, WEIGHT_UNIT)),
            LabelField::single(DATE, self.date.as_str()),
            LabelField::single(TIME, self.time.as_str()),
        ]
    }
}

/// Simulated scale reading, `NNN.NNN`.
pub fn generate_weight<R: Rng + ?Sized>(rng: &mut R) -> String {
    let whole: u32 = rng.random_range(100..=999);
    let fraction: u32 = rng.random_range(0..=999);
    format!("{whole:03}.{fraction:03}")
}
