//! Data transfer objects for the measurement API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use qdice_engine::{DEFAULT_PROBABILITY, MeasureError, MeasureResult, MeasurementRequest, Mode};

/// Body of `POST /api/measure`.
///
/// Fields are kept as raw JSON so that wrongly-typed values are reported
/// through the failure response instead of a framework rejection.
#[derive(Debug, Default, Deserialize)]
pub struct MeasureRequestBody {
    /// Preparation mode; absent or `null` means `superposition`.
    #[serde(default)]
    pub mode: Option<Value>,
    /// Probability of measuring `1`; absent or `null` means 0.5.
    #[serde(default)]
    pub probability: Option<Value>,
}

impl MeasureRequestBody {
    /// Decode into an engine request plus the probability to echo back.
    ///
    /// The echoed value is the field exactly as supplied. Only modes that
    /// use the probability require it to be a number.
    pub fn decode(self) -> MeasureResult<(MeasurementRequest, Value)> {
        let mode = match self.mode {
            None | Some(Value::Null) => Mode::default(),
            Some(Value::String(name)) => Mode::parse(&name),
            Some(other) => {
                return Err(MeasureError::InvalidRequest(format!(
                    "mode must be a string, got {other}"
                )));
            }
        };

        let (probability, echo) = match self.probability {
            None | Some(Value::Null) => (None, Value::from(DEFAULT_PROBABILITY)),
            Some(Value::Number(n)) => {
                let p = n.as_f64().ok_or_else(|| {
                    MeasureError::InvalidRequest(format!("probability {n} is not representable"))
                })?;
                (Some(p), Value::Number(n))
            }
            // Modes that ignore the probability echo whatever was sent.
            Some(other) if !mode.uses_probability() => (None, other),
            Some(other) => {
                return Err(MeasureError::InvalidRequest(format!(
                    "probability must be a number, got {other}"
                )));
            }
        };

        Ok((MeasurementRequest::new(mode, probability), echo))
    }
}

/// Successful measurement.
#[derive(Debug, Serialize)]
pub struct MeasureResponse {
    /// Always `true`.
    pub success: bool,
    /// The requested mode.
    pub mode: String,
    /// The requested probability, or 0.5.
    pub probability_target: Value,
    /// The collapsed bit.
    pub result: u8,
}

/// Failed request.
#[derive(Debug, Serialize)]
pub struct FailureResponse {
    /// Always `false`.
    pub success: bool,
    /// What went wrong.
    pub error: String,
}

impl FailureResponse {
    /// Create a failure body.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status (always "ok" if responding).
    pub status: String,
    /// Server version.
    pub version: String,
    /// Name of the backend measurements run on.
    pub backend: String,
}

impl HealthResponse {
    /// Healthy response for `backend`.
    pub fn new(backend: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            backend: backend.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> MeasureRequestBody {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_decode_defaults() {
        let (request, echo) = body(json!({})).decode().unwrap();
        assert_eq!(request.mode, Mode::Superposition);
        assert_eq!(request.probability, None);
        assert_eq!(echo, json!(0.5));

        let (request, echo) = body(json!({"mode": null, "probability": null}))
            .decode()
            .unwrap();
        assert_eq!(request.mode, Mode::Superposition);
        assert_eq!(echo, json!(0.5));
    }

    #[test]
    fn test_decode_echoes_number_as_sent() {
        let (request, echo) = body(json!({"mode": "navigation", "probability": 1}))
            .decode()
            .unwrap();
        assert_eq!(request.mode, Mode::Navigation);
        assert_eq!(request.probability, Some(1.0));
        assert_eq!(echo, json!(1));
    }

    #[test]
    fn test_decode_rejects_wrong_types() {
        for value in [
            json!({"mode": "navigation", "probability": "0.3"}),
            json!({"mode": "tunneling", "probability": [0.3]}),
            json!({"mode": 3}),
            json!({"mode": true}),
        ] {
            let err = body(value).decode().unwrap_err();
            assert!(matches!(err, MeasureError::InvalidRequest(_)));
        }
    }

    #[test]
    fn test_decode_ignored_probability_is_echoed_raw() {
        for value in [json!("0.5"), json!([0.3]), json!({"p": 1}), json!(false)] {
            let (request, echo) = body(json!({"probability": value.clone()}))
                .decode()
                .unwrap();
            assert_eq!(request.mode, Mode::Superposition);
            assert_eq!(request.probability, None);
            assert_eq!(echo, value);

            let (request, echo) = body(json!({"mode": "warp", "probability": value.clone()}))
                .decode()
                .unwrap();
            assert_eq!(request.mode, Mode::parse("warp"));
            assert_eq!(echo, value);
        }
    }

    #[test]
    fn test_failure_shape() {
        let json = serde_json::to_value(FailureResponse::new("boom")).unwrap();
        assert_eq!(json, json!({"success": false, "error": "boom"}));
    }
}
