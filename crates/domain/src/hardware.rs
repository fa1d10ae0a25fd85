//! Controller board variants and their editable parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::HardwareId;

/// Selected board plus every board the firmware supports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareList {
    #[serde(default)]
    pub current: Option<HardwareId>,
    pub supported: Vec<HardwareType>,
}

impl HardwareList {
    #[must_use]
    pub fn find(&self, id: &HardwareId) -> Option<&HardwareType> {
        self.supported.iter().find(|hw| &hw.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareType {
    pub id: HardwareId,
    #[serde(alias = "name")]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    Number,
    String,
}

impl ParameterKind {
    /// HTML input type used to edit a parameter of this kind.
    #[must_use]
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "text",
        }
    }
}

/// Current value of a hardware parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Integer(i64),
    Text(String),
}

impl ParameterValue {
    /// Parse raw form input according to the parameter kind.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidParameterValue`] when a number
    /// parameter receives non-numeric text.
    pub fn parse(id: &str, kind: ParameterKind, raw: &str) -> Result<Self, ValidationError> {
        match kind {
            ParameterKind::Number => raw.trim().parse().map(Self::Integer).map_err(|_| {
                ValidationError::InvalidParameterValue {
                    id: id.to_string(),
                    value: raw.to_string(),
                }
            }),
            ParameterKind::String => Ok(Self::Text(raw.to_string())),
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => value.fmt(f),
            Self::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareParameter {
    pub id: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ParameterKind,
    pub value: ParameterValue,
}

/// Form field carrying the selected hardware id.
pub const HARDWARE_FIELD: &str = "hardware";

/// Hardware selection with the parameter values to store for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareSettings {
    pub hardware: HardwareId,
    pub values: Vec<(String, ParameterValue)>,
}

impl HardwareSettings {
    /// Build settings from submitted form fields.
    ///
    /// Every parameter of `parameters` gets a value: the submitted one when
    /// present, the current one otherwise. Unknown fields are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidParameterValue`] when a submitted
    /// value does not match its parameter kind.
    pub fn from_form(
        hardware: HardwareId,
        fields: &[(String, String)],
        parameters: &[HardwareParameter],
    ) -> Result<Self, ValidationError> {
        let values = parameters
            .iter()
            .map(|param| {
                let value = match fields.iter().find(|(name, _)| name == &param.id) {
                    Some((_, raw)) => ParameterValue::parse(&param.id, param.kind, raw)?,
                    None => param.value.clone(),
                };
                Ok((param.id.clone(), value))
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;
        Ok(Self { hardware, values })
    }

    /// Url-encoded form fields as posted to the controller.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(String, String)> {
        std::iter::once((HARDWARE_FIELD.to_string(), self.hardware.to_string()))
            .chain(
                self.values
                    .iter()
                    .map(|(id, value)| (id.clone(), value.to_string())),
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ext_count() -> HardwareParameter {
        HardwareParameter {
            id: "ext_count".to_string(),
            description: "Nombre de cartes d'extension E1".to_string(),
            kind: ParameterKind::Number,
            value: ParameterValue::Integer(3),
        }
    }

    #[test]
    fn should_build_settings_from_form_fields() {
        let fields = vec![
            ("hardware".to_string(), "M1E1".to_string()),
            ("ext_count".to_string(), "2".to_string()),
            ("unknown".to_string(), "x".to_string()),
        ];
        let settings =
            HardwareSettings::from_form(HardwareId::new("M1E1"), &fields, &[ext_count()]).unwrap();
        assert_eq!(
            settings.values,
            vec![("ext_count".to_string(), ParameterValue::Integer(2))]
        );
        assert_eq!(
            settings.form_fields(),
            vec![
                ("hardware".to_string(), "M1E1".to_string()),
                ("ext_count".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn should_keep_current_value_for_missing_field() {
        let settings =
            HardwareSettings::from_form(HardwareId::new("M1E1"), &[], &[ext_count()]).unwrap();
        assert_eq!(settings.values[0].1, ParameterValue::Integer(3));
    }

    #[test]
    fn should_reject_invalid_number_field() {
        let fields = vec![("ext_count".to_string(), "many".to_string())];
        let result = HardwareSettings::from_form(HardwareId::new("M1E1"), &fields, &[ext_count()]);
        assert!(result.is_err());
    }

    #[test]
    fn should_read_hardware_list_with_legacy_name() {
        let list: HardwareList = serde_json::from_str(
            r#"{"current":"M1E1","supported":[{"id":"ESP32","name":"modules ou DevKit seul"},{"id":"M1E1","description":"DevKit"}]}"#,
        )
        .unwrap();
        assert_eq!(list.current, Some(HardwareId::new("M1E1")));
        assert_eq!(list.supported[0].description, "modules ou DevKit seul");
        assert!(list.find(&HardwareId::new("M1E1")).is_some());
    }

    #[test]
    fn should_accept_null_current_hardware() {
        let list: HardwareList =
            serde_json::from_str(r#"{"current":null,"supported":[]}"#).unwrap();
        assert_eq!(list.current, None);
    }

    #[test]
    fn should_read_number_and_string_parameters() {
        let params: Vec<HardwareParameter> = serde_json::from_str(
            r#"[{"id":"dummy1","description":"dummy number","type":"number","value":69},
                {"id":"dummy2","description":"dummy string","type":"string","value":"blah"}]"#,
        )
        .unwrap();
        assert_eq!(params[0].value, ParameterValue::Integer(69));
        assert_eq!(params[1].value, ParameterValue::Text("blah".to_string()));
        assert_eq!(params[1].kind.input_type(), "text");
    }

    #[test]
    fn should_validate_number_parameter_input() {
        assert_eq!(
            ParameterValue::parse("ext_count", ParameterKind::Number, " 4 "),
            Ok(ParameterValue::Integer(4))
        );
        assert!(ParameterValue::parse("ext_count", ParameterKind::Number, "four").is_err());
        assert_eq!(
            ParameterValue::parse("dummy2", ParameterKind::String, "four"),
            Ok(ParameterValue::Text("four".to_string()))
        );
    }
}
