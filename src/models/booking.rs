use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A persisted booking as it goes over the wire.
///
/// Storage uses snake_case columns (`room_number`, `number_of_people`), the
/// API speaks camelCase; the row side of the mapping lives in
/// `repositories::postgres_repo::parse_row_into_booking`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub time: String,
    pub name: String,
    pub room_number: String,
    pub number_of_people: i32,
}

impl Booking {
    pub fn from_fields(id: String, fields: BookingFields) -> Self {
        Self {
            id,
            time: fields.time,
            name: fields.name,
            room_number: fields.room_number,
            number_of_people: fields.number_of_people,
        }
    }
}

/// The four client supplied fields once they passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingFields {
    pub time: String,
    pub name: String,
    pub room_number: String,
    pub number_of_people: i32,
}

/// Raw request body for create and update. Fields are kept as loose JSON so
/// that a wrong type is reported as invalid booking data instead of a
/// deserialization rejection.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    #[serde(default)]
    pub time: Value,
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub room_number: Value,
    #[serde(default)]
    pub number_of_people: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidBooking {
    MalformedJson,
    NotAnObject,
    MissingTime,
    MissingName,
    MissingRoomNumber,
    NumberOfPeopleNotWholeNumber,
}

impl fmt::Display for InvalidBooking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedJson => write!(f, "request body must be valid JSON"),
            Self::NotAnObject => write!(f, "request body must be a JSON object"),
            Self::MissingTime => write!(f, "time is required"),
            Self::MissingName => write!(f, "name is required"),
            Self::MissingRoomNumber => write!(f, "roomNumber is required"),
            Self::NumberOfPeopleNotWholeNumber => {
                write!(f, "numberOfPeople must be a whole number")
            }
        }
    }
}

impl BookingPayload {
    /// Parses a request body, anything other than a JSON object is rejected.
    pub fn from_json(body: Value) -> Result<Self, InvalidBooking> {
        if !body.is_object() {
            return Err(InvalidBooking::NotAnObject);
        }
        serde_json::from_value(body).map_err(|_| InvalidBooking::NotAnObject)
    }

    pub fn validate(self) -> Result<BookingFields, InvalidBooking> {
        let time = present_text(self.time).ok_or(InvalidBooking::MissingTime)?;
        let name = present_text(self.name).ok_or(InvalidBooking::MissingName)?;
        let room_number =
            present_text(self.room_number).ok_or(InvalidBooking::MissingRoomNumber)?;
        let number_of_people = whole_number(&self.number_of_people)
            .ok_or(InvalidBooking::NumberOfPeopleNotWholeNumber)?;

        Ok(BookingFields {
            time,
            name,
            room_number,
            number_of_people,
        })
    }
}

// Text fields may be sent as "101" or 101 (an epoch timestamp for `time`);
// both are stored as text. Empty strings and zero count as absent.
fn present_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => number_text(&n),
        _ => None,
    }
}

fn number_text(n: &Number) -> Option<String> {
    if let Some(i) = n.as_i64() {
        return (i != 0).then(|| i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Some(u.to_string());
    }
    let f = n.as_f64()?;
    (f != 0.0).then(|| f.to_string())
}

/// Accepts `4` and `4.0`, rejects fractions, strings and anything outside the
/// range of the `integer` column.
fn whole_number(value: &Value) -> Option<i32> {
    let n = match value {
        Value::Number(n) => n,
        _ => return None,
    };

    if let Some(i) = n.as_i64() {
        return i32::try_from(i).ok();
    }
    if let Some(u) = n.as_u64() {
        return i32::try_from(u).ok();
    }

    let f = n.as_f64()?;
    if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
        Some(f as i32)
    } else {
        None
    }
}
