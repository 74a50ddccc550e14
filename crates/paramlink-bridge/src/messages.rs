//! Wire shapes exchanged with the UI.
//!
//! Field names are fixed by the page-side code: the snapshot uses
//! `defaultVal`, pushes use `parameter` for the uid.

use paramlink_core::{DisplayValue, Parameter, UserRange};
use serde::{Deserialize, Serialize};

/// Range part of a [`ParameterSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeSpec {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl From<UserRange> for RangeSpec {
    fn from(range: UserRange) -> Self {
        Self {
            min: range.min,
            max: range.max,
            step: range.step,
        }
    }
}

/// One record of the parameter snapshot returned by get-spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSpec {
    pub uid: String,
    pub name: String,
    pub value: f64,
    pub default_val: f64,
    pub range: RangeSpec,
}

impl ParameterSpec {
    /// Capture the parameter's state right now.
    pub fn capture(parameter: &dyn Parameter) -> Self {
        Self {
            uid: parameter.uid().to_string(),
            name: parameter.name().to_string(),
            value: parameter.user_value(),
            default_val: parameter.user_default_value(),
            range: parameter.user_range().into(),
        }
    }
}

/// Reply of get-display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayReply {
    pub value: String,
    pub suffix: String,
}

impl From<DisplayValue> for DisplayReply {
    fn from(display: DisplayValue) -> Self {
        Self {
            value: display.value,
            suffix: display.suffix,
        }
    }
}

/// Payload of a push to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterUpdate {
    pub parameter: String,
    pub value: f64,
}

/// Render the script that delivers `update` to `function`.
pub fn update_script(function: &str, update: &ParameterUpdate) -> serde_json::Result<String> {
    let payload = serde_json::to_string(update)?;
    Ok(format!("{}({})", function, payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use paramlink_core::{FloatParameter, ParameterInfo};
    use serde_json::json;

    #[test]
    fn test_spec_wire_shape() {
        let gain = FloatParameter::new(
            ParameterInfo::new("gain", "Gain")
                .with_range(UserRange::new(0.0, 1.0, 0.5))
                .with_default(0.5),
        );
        let spec = ParameterSpec::capture(&gain);

        assert_eq!(
            serde_json::to_value(&spec).unwrap(),
            json!({
                "uid": "gain",
                "name": "Gain",
                "value": 0.5,
                "defaultVal": 0.5,
                "range": { "min": 0.0, "max": 1.0, "step": 0.5 }
            })
        );
    }

    #[test]
    fn test_update_script() {
        let update = ParameterUpdate {
            parameter: "gain".to_string(),
            value: 0.75,
        };
        assert_eq!(
            update_script("window.ui.updateParameterState", &update).unwrap(),
            r#"window.ui.updateParameterState({"parameter":"gain","value":0.75})"#
        );
    }

    #[test]
    fn test_update_script_escapes_uid() {
        let update = ParameterUpdate {
            parameter: "a\"b".to_string(),
            value: 1.0,
        };
        let script = update_script("f", &update).unwrap();
        assert_eq!(script, r#"f({"parameter":"a\"b","value":1.0})"#);
    }
}
