//! Resolving raw slot values into animation configurations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key whose presence marks a configuration as a real animation spec.
pub const TIME_FIELD: &str = "time";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A configuration ready to hand to an engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationConfig {
    pub container_id: String,
    pub legend_container_id: String,
    pub spinner_container_id: String,
    pub time: Value,
    /// Lay the time slider out vertically. Owned by the pane, not the slot.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub time_slider_vertical: bool,
    /// Everything else the host put in the slot, passed through untouched.
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl AnimationConfig {
    /// Build from a parsed slot object, injecting the ids derived from
    /// `container_id`. Returns `None` when the object has no `time` field.
    pub fn from_object(mut object: Map<String, Value>, container_id: &str) -> Option<Self> {
        let time = object.remove(TIME_FIELD)?;
        for key in [
            "containerId",
            "legendContainerId",
            "spinnerContainerId",
            "timeSliderVertical",
        ] {
            object.remove(key);
        }

        Some(Self {
            container_id: container_id.to_string(),
            legend_container_id: legend_container_id(container_id),
            spinner_container_id: spinner_container_id(container_id),
            time,
            time_slider_vertical: false,
            options: object,
        })
    }

    /// Serialize back to the JSON object engines consume.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

pub fn legend_container_id(container_id: &str) -> String {
    format!("{}-legend", container_id)
}

pub fn spinner_container_id(container_id: &str) -> String {
    format!("{}-spinner", container_id)
}

/// What a raw slot value amounts to.
#[derive(Debug)]
pub enum ConfigOutcome {
    /// Nothing there yet: absent, empty, null or zero.
    Inert,
    /// Could not be parsed. Usually a partially written value.
    Malformed(ConfigError),
    /// Parsed, but not an animation spec yet.
    Placeholder,
    Ready(AnimationConfig),
}

impl ConfigOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, ConfigOutcome::Ready(_))
    }
}

/// Resolve the raw value of a configuration slot for the pane rendering into
/// `container_id`.
pub fn resolve_config(raw: Option<&str>, container_id: &str) -> ConfigOutcome {
    let raw = match raw.map(str::trim) {
        None | Some("") | Some("0") => return ConfigOutcome::Inert,
        Some(raw) => raw,
    };

    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => return ConfigOutcome::Malformed(err.into()),
    };

    match value {
        Value::Null | Value::Bool(false) => ConfigOutcome::Inert,
        Value::Number(n) if n.as_f64() == Some(0.0) => ConfigOutcome::Inert,
        Value::Object(object) => AnimationConfig::from_object(object, container_id)
            .map_or(ConfigOutcome::Placeholder, ConfigOutcome::Ready),
        _ => ConfigOutcome::Placeholder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CONTAINER: &str = "ws-0-map";

    #[test]
    fn absent_and_zero_are_inert() {
        for raw in [None, Some(""), Some("0"), Some("null"), Some(" 0 ")] {
            assert!(
                matches!(resolve_config(raw, CONTAINER), ConfigOutcome::Inert),
                "{:?}",
                raw
            );
        }
    }

    #[test]
    fn garbage_is_malformed() {
        let outcome = resolve_config(Some("{\"time\": 12"), CONTAINER);
        assert!(matches!(outcome, ConfigOutcome::Malformed(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_time_is_placeholder() {
        assert!(matches!(
            resolve_config(Some(r#"{"layers":["radar"]}"#), CONTAINER),
            ConfigOutcome::Placeholder
        ));
        assert!(matches!(
            resolve_config(Some("[1,2]"), CONTAINER),
            ConfigOutcome::Placeholder
        ));
    }

    #[test]
    fn ready_config_gets_derived_ids() {
        let raw = r#"{"time":{"start":0,"end":6},"layers":["radar"],"containerId":"spoofed"}"#;
        let ConfigOutcome::Ready(config) = resolve_config(Some(raw), CONTAINER) else {
            panic!("expected a ready configuration");
        };

        assert_eq!(config.container_id, "ws-0-map");
        assert_eq!(config.legend_container_id, "ws-0-map-legend");
        assert_eq!(config.spinner_container_id, "ws-0-map-spinner");
        assert_eq!(config.time, json!({"start": 0, "end": 6}));
        assert_eq!(config.options.get("layers"), Some(&json!(["radar"])));
        assert!(!config.options.contains_key("containerId"));

        let value = config.to_value();
        assert_eq!(value["containerId"], "ws-0-map");
        assert_eq!(value["layers"], json!(["radar"]));
        assert!(value.get("timeSliderVertical").is_none());
    }

    #[test]
    fn slider_orientation_is_not_taken_from_the_slot() {
        let raw = r#"{"time":{"start":0},"timeSliderVertical":true}"#;
        let ConfigOutcome::Ready(mut config) = resolve_config(Some(raw), CONTAINER) else {
            panic!("expected a ready configuration");
        };
        assert!(!config.time_slider_vertical);
        assert!(!config.options.contains_key("timeSliderVertical"));

        config.time_slider_vertical = true;
        assert_eq!(config.to_value()["timeSliderVertical"], true);
    }
}
