// THEORY:
// A `Legend` is the key printed beside one coverage map: which exact color stands for
// which televised event. One legend exists per map image and it never changes while
// that map is being queried.
//
// Key architectural principles:
// 1.  **Unique Colors**: Two events can never share a color. Any constructor that
//     would silently overwrite an entry fails with `DuplicateColor` instead.
// 2.  **Fail Fast At The Boundary**: Persisted legends use tuple strings as JSON
//     object keys. Every key is parsed when the legend is loaded; a single bad key
//     rejects the whole legend, because a partially loaded legend would produce
//     wrong answers rather than missing ones.
// 3.  **Deterministic Output**: Serialization walks colors in ascending order so the
//     same legend always produces the same document.

use crate::core_modules::color_key::ColorKey;
use crate::core_modules::event_record::EventRecord;
use crate::error::LegendError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

/// Immutable mapping from an exact map color to the event it represents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Legend {
    entries: HashMap<ColorKey, EventRecord>,
}

impl Legend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a legend from `(color, record)` pairs, rejecting repeated colors.
    pub fn from_entries<I>(entries: I) -> Result<Self, LegendError>
    where
        I: IntoIterator<Item = (ColorKey, EventRecord)>,
    {
        let mut legend = Self::new();
        for (color, record) in entries {
            legend.insert(color, record)?;
        }
        Ok(legend)
    }

    pub(crate) fn insert(&mut self, color: ColorKey, record: EventRecord) -> Result<(), LegendError> {
        if self.entries.contains_key(&color) {
            return Err(LegendError::DuplicateColor(color));
        }
        self.entries.insert(color, record);
        Ok(())
    }

    pub fn get(&self, color: &ColorKey) -> Option<&EventRecord> {
        self.entries.get(color)
    }

    pub fn contains(&self, color: &ColorKey) -> bool {
        self.entries.contains_key(color)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ColorKey, &EventRecord)> {
        self.entries.iter()
    }

    /// All registered colors in ascending order.
    pub fn colors(&self) -> Vec<ColorKey> {
        let mut colors: Vec<ColorKey> = self.entries.keys().copied().collect();
        colors.sort();
        colors
    }

    /// Loads a persisted legend: a JSON object keyed by `"(r, g, b, a)"` strings.
    pub fn from_json_str(json: &str) -> Result<Self, LegendError> {
        let raw: BTreeMap<String, EventRecord> = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    pub fn to_json_string(&self) -> Result<String, LegendError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl TryFrom<BTreeMap<String, EventRecord>> for Legend {
    type Error = LegendError;

    fn try_from(raw: BTreeMap<String, EventRecord>) -> Result<Self, Self::Error> {
        let mut legend = Legend::new();
        for (key, record) in raw {
            let color = key
                .parse::<ColorKey>()
                .map_err(|source| LegendError::MalformedEntry {
                    key: key.clone(),
                    source,
                })?;
            legend.insert(color, record)?;
        }
        Ok(legend)
    }
}

impl Serialize for Legend {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for color in self.colors() {
            if let Some(record) = self.entries.get(&color) {
                map.serialize_entry(&color.to_string(), record)?;
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Legend {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, EventRecord>::deserialize(deserializer)?;
        Legend::try_from(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ColorKeyError;

    fn sample_record(matchup: &str) -> EventRecord {
        EventRecord::new("Sunday", matchup).with_announcers("Booth")
    }

    #[test]
    fn lookup_is_exact() {
        let legend = Legend::from_entries([(ColorKey::opaque(10, 20, 30), sample_record("A@B"))]).unwrap();

        assert_eq!(legend.len(), 1);
        assert_eq!(legend.get(&ColorKey::opaque(10, 20, 30)).map(|r| r.matchup.as_str()), Some("A@B"));
        assert!(legend.get(&ColorKey::opaque(10, 20, 31)).is_none());
        assert!(legend.get(&ColorKey::new(10, 20, 30, 254)).is_none());
    }

    #[test]
    fn duplicate_colors_are_rejected() {
        let color = ColorKey::opaque(1, 1, 1);
        let result = Legend::from_entries([(color, sample_record("A@B")), (color, sample_record("C@D"))]);
        assert!(matches!(result, Err(LegendError::DuplicateColor(c)) if c == color));
    }

    #[test]
    fn loads_persisted_tuple_keys() {
        let json = r#"{
            "(10, 20, 30, 255)": {"day": "Sunday", "matchup": "A@B", "announcers": "X, Y"},
            "(1,2,3,255)": {"day": "Sunday", "matchup": "C@D"}
        }"#;
        let legend = Legend::from_json_str(json).unwrap();

        assert_eq!(legend.len(), 2);
        assert_eq!(legend.get(&ColorKey::opaque(1, 2, 3)).unwrap().matchup, "C@D");
        assert_eq!(legend.colors(), vec![ColorKey::opaque(1, 2, 3), ColorKey::opaque(10, 20, 30)]);
    }

    #[test]
    fn malformed_key_fails_the_whole_legend() {
        let json = r#"{
            "(10, 20, 30, 255)": {"matchup": "A@B"},
            "(10, 20, 30)": {"matchup": "C@D"}
        }"#;
        match Legend::from_json_str(json) {
            Err(LegendError::MalformedEntry { key, source }) => {
                assert_eq!(key, "(10, 20, 30)");
                assert_eq!(source, ColorKeyError::ChannelCount { found: 3 });
            }
            other => panic!("expected malformed entry, got {other:?}"),
        }
    }

    #[test]
    fn textually_different_keys_for_one_color_are_duplicates() {
        let json = r#"{
            "(10, 20, 30, 255)": {"matchup": "A@B"},
            "(10,20,30,255)": {"matchup": "C@D"}
        }"#;
        assert!(matches!(Legend::from_json_str(json), Err(LegendError::DuplicateColor(_))));
    }

    #[test]
    fn serializes_in_color_order() {
        let legend = Legend::from_entries([
            (ColorKey::opaque(200, 0, 0), sample_record("Late")),
            (ColorKey::opaque(5, 0, 0), sample_record("Early")),
        ])
        .unwrap();

        let json = legend.to_json_string().unwrap();
        let early = json.find("(5, 0, 0, 255)").unwrap();
        let late = json.find("(200, 0, 0, 255)").unwrap();
        assert!(early < late);

        assert_eq!(Legend::from_json_str(&json).unwrap(), legend);
    }
}
