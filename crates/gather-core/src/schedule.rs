use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// How a bookable service is scheduled.
///
/// Times are local wall-clock strings (`HH:mm`, `YYYY-MM-DDTHH:mm`) in the
/// listing's timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ServiceSchedule {
    /// Booked on request; no fixed availability.
    #[default]
    Appointment,
    /// Recurring availability on the given weekdays between `start` and `end`.
    Weekly {
        days: Vec<Weekday>,
        start: String,
        end: String,
    },
    /// A fixed list of bookable start times.
    Slots { slots: Vec<String> },
}

impl ServiceSchedule {
    #[must_use]
    pub fn mode(&self) -> &'static str {
        match self {
            ServiceSchedule::Appointment => "appointment",
            ServiceSchedule::Weekly { .. } => "weekly",
            ServiceSchedule::Slots { .. } => "slots",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_is_tagged_by_mode() {
        let weekly = ServiceSchedule::Weekly {
            days: vec![Weekday::Mon, Weekday::Wed],
            start: "09:00".to_owned(),
            end: "17:00".to_owned(),
        };
        let json = serde_json::to_value(&weekly).unwrap();
        assert_eq!(json["mode"], "weekly");
        assert_eq!(json["days"], serde_json::json!(["Mon", "Wed"]));

        let back: ServiceSchedule = serde_json::from_value(json).unwrap();
        assert_eq!(back, weekly);
    }

    #[test]
    fn default_is_appointment() {
        assert_eq!(ServiceSchedule::default().mode(), "appointment");
        let parsed: ServiceSchedule =
            serde_json::from_value(serde_json::json!({ "mode": "appointment" })).unwrap();
        assert_eq!(parsed, ServiceSchedule::Appointment);
    }
}
