//! Raw configuration values for slot tests.

use serde_json::{Map, Value, json};

/// Truncated JSON, as seen mid-write.
pub const MALFORMED: &str = "{\"time\": {\"start\": 0";

/// A complete radar animation configuration as a JSON object.
pub fn radar_object() -> Map<String, Value> {
    match radar_value() {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn radar_value() -> Value {
    json!({
        "time": { "start": -3, "end": 0, "step": 1 },
        "layers": ["radar"],
        "map": { "zoom": 5 }
    })
}

/// A complete radar animation configuration, serialized.
pub fn radar() -> String {
    radar_value().to_string()
}

/// A complete configuration with a custom layer list, so successive writes differ.
pub fn with_layer(layer: &str) -> String {
    json!({
        "time": { "start": -3, "end": 0, "step": 1 },
        "layers": [layer]
    })
    .to_string()
}

/// Parses, but has no `time` yet.
pub fn placeholder() -> String {
    json!({ "layers": ["radar"] }).to_string()
}
