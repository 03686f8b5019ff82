// THEORY:
// An `EventRecord` is the payload a legend color points at: one televised game with
// its day, kickoff time, matchup and broadcast details. The engine never invents or
// edits a record; whatever the acquisition stage produced is returned verbatim.
//
// The only field the engine interprets is `day`, and only for ordering. Broadcast
// weeks run Tuesday through Monday, so `BroadcastDay::rank` is anchored on Tuesday
// rather than on the calendar week.

use crate::error::BatchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One televised event, as listed in a legend or in the national broadcast list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    pub matchup: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub broadcast: Option<String>,
    #[serde(default)]
    pub announcers: Option<String>,
}

impl EventRecord {
    /// A record with only a day and matchup set.
    pub fn new(day: impl Into<String>, matchup: impl Into<String>) -> Self {
        Self {
            day: Some(day.into()),
            time: None,
            matchup: matchup.into(),
            location: None,
            broadcast: None,
            announcers: None,
        }
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_broadcast(mut self, broadcast: impl Into<String>) -> Self {
        self.broadcast = Some(broadcast.into());
        self
    }

    pub fn with_announcers(mut self, announcers: impl Into<String>) -> Self {
        self.announcers = Some(announcers.into());
        self
    }

    /// Interprets `day` for sorting. Absent and unrecognized days are both errors.
    pub fn broadcast_day(&self) -> Result<BroadcastDay, BatchError> {
        let day = self.day.as_deref().ok_or_else(|| BatchError::MissingWeekday {
            matchup: self.matchup.clone(),
        })?;
        day.parse().map_err(|_| BatchError::UnknownWeekday {
            matchup: self.matchup.clone(),
            day: day.to_string(),
        })
    }
}

/// The seven days of a broadcast week, declared in broadcast order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BroadcastDay {
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
    Monday,
}

impl BroadcastDay {
    pub const ALL: [BroadcastDay; 7] = [
        BroadcastDay::Tuesday,
        BroadcastDay::Wednesday,
        BroadcastDay::Thursday,
        BroadcastDay::Friday,
        BroadcastDay::Saturday,
        BroadcastDay::Sunday,
        BroadcastDay::Monday,
    ];

    /// Position within the Tuesday-to-Monday week: Tuesday is 0, Monday is 6.
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            BroadcastDay::Tuesday => "Tuesday",
            BroadcastDay::Wednesday => "Wednesday",
            BroadcastDay::Thursday => "Thursday",
            BroadcastDay::Friday => "Friday",
            BroadcastDay::Saturday => "Saturday",
            BroadcastDay::Sunday => "Sunday",
            BroadcastDay::Monday => "Monday",
        }
    }
}

impl fmt::Display for BroadcastDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDay;

impl FromStr for BroadcastDay {
    type Err = UnknownDay;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        BroadcastDay::ALL
            .into_iter()
            .find(|day| day.name() == name)
            .ok_or(UnknownDay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_is_anchored_on_tuesday() {
        assert_eq!(BroadcastDay::Tuesday.rank(), 0);
        assert_eq!(BroadcastDay::Sunday.rank(), 5);
        assert_eq!(BroadcastDay::Monday.rank(), 6);
        assert!(BroadcastDay::Sunday < BroadcastDay::Monday);
    }

    #[test]
    fn parses_exact_day_names_only() {
        assert_eq!("Thursday".parse::<BroadcastDay>(), Ok(BroadcastDay::Thursday));
        assert_eq!("thursday".parse::<BroadcastDay>(), Err(UnknownDay));
        assert_eq!("Thu".parse::<BroadcastDay>(), Err(UnknownDay));
    }

    #[test]
    fn broadcast_day_reports_missing_and_unknown_days() {
        let mut record = EventRecord::new("Funday", "A@B");
        assert!(matches!(
            record.broadcast_day(),
            Err(BatchError::UnknownWeekday { ref day, .. }) if day == "Funday"
        ));

        record.day = None;
        assert!(matches!(
            record.broadcast_day(),
            Err(BatchError::MissingWeekday { ref matchup }) if matchup == "A@B"
        ));
    }

    #[test]
    fn optional_fields_default_when_missing_and_serialize_as_null() {
        let record: EventRecord =
            serde_json::from_str(r#"{"matchup": "Eagles @ Giants", "announcers": "Kevin Burkhardt"}"#)
                .unwrap();
        assert_eq!(record.day, None);
        assert_eq!(record.time, None);
        assert_eq!(record.announcers.as_deref(), Some("Kevin Burkhardt"));

        let value = serde_json::to_value(EventRecord::new("Sunday", "A@B")).unwrap();
        assert_eq!(value["day"], "Sunday");
        assert!(value["location"].is_null());
    }
}
