//! Outbound message assembly.
//!
//! The watch opens its inbox with a fixed schema: every key below must be
//! present in every message, with empty-string/zero defaults when the source
//! datum is unavailable. Omitting a key is not tolerated by the device side.

use std::collections::BTreeMap;

use wristwx_weather::{ForecastWindow, WeatherReading};

/// Inbox buffer the watch opens for one message (`app_message_open`).
pub const DEVICE_INBOX_BYTES: usize = 128;

/// Every key the watch expects, in schema order.
pub const MESSAGE_KEYS: [&str; 12] = [
    "TEMPERATURE_F",
    "TEMPERATURE_C",
    "ICONNAME",
    "LOCALNAME",
    "FORECASTTIME1",
    "FORECASTTIME2",
    "FORECASTTIME3",
    "FORECASTTIME4",
    "FORECASTICONS1",
    "FORECASTICONS2",
    "FORECASTICONS3",
    "FORECASTICONS4",
];

/// A primitive value in the device dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Int(i32),
    Text(String),
}

impl FieldValue {
    /// Bytes this value occupies in the device dictionary encoding
    /// (4-byte integer, or the string plus its NUL terminator).
    fn encoded_len(&self) -> usize {
        match self {
            Self::Int(_) => 4,
            Self::Text(s) => s.len() + 1,
        }
    }
}

/// Flat fixed-schema mapping delivered to the watch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    fields: BTreeMap<&'static str, FieldValue>,
}

impl OutboundMessage {
    /// Merge a reading and a forecast window into the full field set.
    ///
    /// No validation beyond type coercion: defaulted upstream data simply
    /// propagates as zeros and empty strings.
    pub fn assemble(reading: &WeatherReading, window: &ForecastWindow) -> Self {
        let mut fields = BTreeMap::new();

        fields.insert("TEMPERATURE_F", FieldValue::Int(reading.temperature_f));
        fields.insert("TEMPERATURE_C", FieldValue::Int(reading.temperature_c));
        fields.insert("ICONNAME", FieldValue::Text(reading.icon.clone()));
        fields.insert("LOCALNAME", FieldValue::Text(reading.place.clone()));

        let time_keys = [
            "FORECASTTIME1",
            "FORECASTTIME2",
            "FORECASTTIME3",
            "FORECASTTIME4",
        ];
        let icon_keys = [
            "FORECASTICONS1",
            "FORECASTICONS2",
            "FORECASTICONS3",
            "FORECASTICONS4",
        ];
        for (k, slot) in window.slots.iter().enumerate() {
            let (hour, icon) = match slot {
                Some(s) => (s.hour.to_string(), s.icon.clone()),
                None => (String::new(), String::new()),
            };
            fields.insert(time_keys[k], FieldValue::Text(hour));
            fields.insert(icon_keys[k], FieldValue::Text(icon));
        }

        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (*k, v))
    }

    /// Size of this message in the device dictionary encoding: one count
    /// byte, then per tuple a 4-byte key, 2-byte length and 1-byte type
    /// ahead of the data (mirrors `dict_calc_buffer_size`).
    pub fn encoded_len(&self) -> usize {
        1 + self
            .fields
            .values()
            .map(|v| 7 + v.encoded_len())
            .sum::<usize>()
    }

    /// True when the message will not fit the watch inbox. The message is
    /// still handed to the channel; the device reports it as dropped.
    pub fn over_budget(&self) -> bool {
        self.encoded_len() > DEVICE_INBOX_BYTES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wristwx_weather::{ForecastSlot, RemoteStatus};

    fn reading() -> WeatherReading {
        WeatherReading {
            status: RemoteStatus::Success,
            temperature_f: 81,
            temperature_c: 27,
            conditions: "Clear".to_string(),
            icon: "01d".to_string(),
            place: "Testville".to_string(),
            observed_at: 1_700_000_000,
        }
    }

    fn window() -> ForecastWindow {
        ForecastWindow {
            status: RemoteStatus::Success,
            slots: [
                Some(ForecastSlot {
                    hour: 15,
                    icon: "10d".to_string(),
                }),
                Some(ForecastSlot {
                    hour: 18,
                    icon: "04n".to_string(),
                }),
                None,
                None,
            ],
        }
    }

    #[test]
    fn every_expected_key_is_present() {
        let message = OutboundMessage::assemble(&reading(), &window());
        for key in MESSAGE_KEYS {
            assert!(message.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(message.fields().count(), MESSAGE_KEYS.len());
    }

    #[test]
    fn populated_fields_map_from_sources() {
        let message = OutboundMessage::assemble(&reading(), &window());
        assert_eq!(message.get("TEMPERATURE_F"), Some(&FieldValue::Int(81)));
        assert_eq!(message.get("TEMPERATURE_C"), Some(&FieldValue::Int(27)));
        assert_eq!(
            message.get("ICONNAME"),
            Some(&FieldValue::Text("01d".to_string()))
        );
        assert_eq!(
            message.get("LOCALNAME"),
            Some(&FieldValue::Text("Testville".to_string()))
        );
        assert_eq!(
            message.get("FORECASTTIME1"),
            Some(&FieldValue::Text("15".to_string()))
        );
        assert_eq!(
            message.get("FORECASTICONS2"),
            Some(&FieldValue::Text("04n".to_string()))
        );
    }

    #[test]
    fn absent_slots_become_empty_strings_not_omissions() {
        let message = OutboundMessage::assemble(&reading(), &window());
        assert_eq!(
            message.get("FORECASTTIME3"),
            Some(&FieldValue::Text(String::new()))
        );
        assert_eq!(
            message.get("FORECASTICONS4"),
            Some(&FieldValue::Text(String::new()))
        );
    }

    #[test]
    fn error_reading_assembles_to_defaults() {
        let reading = WeatherReading::status_only(RemoteStatus::RemoteError("404".to_string()));
        let window = ForecastWindow::status_only(RemoteStatus::RemoteError("404".to_string()));
        let message = OutboundMessage::assemble(&reading, &window);
        assert_eq!(message.get("TEMPERATURE_F"), Some(&FieldValue::Int(0)));
        assert_eq!(message.get("TEMPERATURE_C"), Some(&FieldValue::Int(0)));
        assert_eq!(
            message.get("LOCALNAME"),
            Some(&FieldValue::Text(String::new()))
        );
    }

    #[test]
    fn assembly_is_idempotent() {
        let a = OutboundMessage::assemble(&reading(), &window());
        let b = OutboundMessage::assemble(&reading(), &window());
        assert_eq!(a, b);
    }

    #[test]
    fn encoded_len_counts_headers_and_data() {
        let reading = WeatherReading::status_only(RemoteStatus::Success);
        let window = ForecastWindow::status_only(RemoteStatus::Success);
        let message = OutboundMessage::assemble(&reading, &window);
        // 1 count byte + 12 * 7 header bytes + 2 ints (4 each) + 10 empty
        // strings (1 NUL each)
        assert_eq!(message.encoded_len(), 1 + 84 + 8 + 10);
        assert!(!message.over_budget());
    }

    #[test]
    fn long_place_name_exceeds_budget() {
        let mut reading = reading();
        reading.place = "Llanfairpwllgwyngyllgogerychwyrndrobwllllantysilio".to_string();
        let message = OutboundMessage::assemble(&reading, &window());
        assert!(message.over_budget());
    }
}
