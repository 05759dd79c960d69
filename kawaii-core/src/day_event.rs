//! Single-day entries: a note, a stamp and a background image.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::day::DayKey;

/// All single-day entries, keyed by day.
pub type DayEvents = BTreeMap<DayKey, DayEvent>;

/// What the user attached to one calendar day.
///
/// Empty strings are stored as absent, so an entry with every field `None`
/// is never kept in [`DayEvents`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEvent {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_empty")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_empty")]
    pub stamp: Option<String>,

    /// Image as a `data:` URI.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_empty")]
    pub image: Option<String>,
}

impl DayEvent {
    /// Build an entry, or `None` when there is nothing worth keeping.
    pub fn from_parts(
        text: Option<String>,
        stamp: Option<String>,
        image: Option<String>,
    ) -> Option<Self> {
        let event = DayEvent {
            text: text.map(|t| t.trim().to_string()).and_then(keep_non_empty),
            stamp: stamp.and_then(keep_non_empty),
            image: image.and_then(keep_non_empty),
        };
        (!event.is_empty()).then_some(event)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.stamp.is_none() && self.image.is_none()
    }

    /// A comment dot is shown only for written text, stamp or not.
    pub fn has_comment(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
    }
}

fn keep_non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

pub(crate) fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.and_then(keep_non_empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_empty_parts_produce_nothing() {
        assert!(DayEvent::from_parts(None, None, None).is_none());
        assert!(DayEvent::from_parts(Some("   ".into()), Some(String::new()), None).is_none());
    }

    #[test]
    fn text_is_trimmed() {
        let event = DayEvent::from_parts(Some("  picnic  ".into()), None, None).unwrap();
        assert_eq!(event.text.as_deref(), Some("picnic"));
    }

    #[test]
    fn stamp_alone_has_no_comment() {
        let event = DayEvent::from_parts(None, Some("💖".into()), None).unwrap();
        assert!(!event.has_comment());
    }

    #[test]
    fn stored_empty_fields_read_as_absent() {
        let event: DayEvent =
            serde_json::from_str(r#"{"text":"","stamp":"⭐","image":null}"#).unwrap();
        assert_eq!(event.text, None);
        assert_eq!(event.stamp.as_deref(), Some("⭐"));
        assert_eq!(event.image, None);
    }

    #[test]
    fn absent_fields_are_not_written() {
        let event = DayEvent::from_parts(Some("memo".into()), None, None).unwrap();
        assert_eq!(serde_json::to_string(&event).unwrap(), r#"{"text":"memo"}"#);
    }
}
