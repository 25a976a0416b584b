use serde::Serialize;
use serde_json::Value;

/// Conversion into the JSON-compatible tree written into telemetry
///
/// The tree is the wire contract. Object keys come out in deterministic
/// (sorted) order, binary data is base64 text, and parts carry an explicit
/// `type` tag.
pub trait ToWire {
    /// Serialize into a JSON value tree
    fn to_wire(&self) -> Value;
}

impl<T: Serialize + ?Sized> ToWire for T {
    fn to_wire(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to serialize telemetry payload");
            Value::Null
        })
    }
}
