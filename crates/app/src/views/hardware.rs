//! Hardware section: board selection and its parameter form.

use ofp_domain::error::OfpError;
use ofp_domain::hardware::{HardwareList, HardwareParameter, HardwareSettings};
use ofp_domain::id::HardwareId;

use super::Outcome;
use crate::ports::ControllerApi;
use crate::render::{Choice, choices};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterField {
    pub id: String,
    pub description: String,
    pub input_type: &'static str,
    pub value: String,
}

impl From<&HardwareParameter> for ParameterField {
    fn from(param: &HardwareParameter) -> Self {
        Self {
            id: param.id.clone(),
            description: param.description.clone(),
            input_type: param.kind.input_type(),
            value: param.value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareView {
    pub supported: Vec<Choice>,
    pub selected: Option<HardwareId>,
    pub parameters: Vec<ParameterField>,
}

impl HardwareView {
    #[must_use]
    pub fn render(
        list: &HardwareList,
        selected: Option<HardwareId>,
        parameters: &[HardwareParameter],
    ) -> Self {
        let selected_value = selected.as_ref().map(HardwareId::as_str);
        Self {
            supported: choices(
                &list.supported,
                |hw| hw.id.to_string(),
                |hw| format!("{}: {}", hw.id, hw.description),
                selected_value,
            ),
            parameters: parameters.iter().map(ParameterField::from).collect(),
            selected,
        }
    }
}

#[derive(Clone)]
pub struct HardwareController<A> {
    api: A,
}

impl<A: ControllerApi> HardwareController<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Load the board list and the parameters of `requested`, or of the
    /// current board when `requested` is absent or unsupported.
    ///
    /// # Errors
    ///
    /// Propagates the first failing fetch.
    pub async fn load(&self, requested: Option<HardwareId>) -> Result<HardwareView, OfpError> {
        let list = self.api.get_hardware().await?;
        let selected = requested
            .filter(|id| list.find(id).is_some())
            .or_else(|| list.current.clone());
        let parameters = match &selected {
            Some(id) => self.api.get_hardware_parameters(id.clone()).await?,
            None => Vec::new(),
        };
        Ok(HardwareView::render(&list, selected, &parameters))
    }

    /// Store the board selection with the submitted parameter values.
    ///
    /// # Errors
    ///
    /// Propagates the controller error.
    #[tracing::instrument(skip(self, fields))]
    pub async fn apply(
        &self,
        hardware: &str,
        fields: &[(String, String)],
        confirmed: bool,
    ) -> Result<Outcome, OfpError> {
        let hardware = hardware.trim();
        if !confirmed || hardware.is_empty() {
            return Ok(Outcome::Skipped);
        }
        let hardware = HardwareId::new(hardware);
        let parameters = self.api.get_hardware_parameters(hardware.clone()).await?;
        let Ok(settings) = HardwareSettings::from_form(hardware, fields, &parameters) else {
            return Ok(Outcome::Skipped);
        };
        self.api.apply_hardware(settings).await?;
        Ok(Outcome::Reboot)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ofp_domain::hardware::ParameterValue;

    use super::*;
    use crate::testing::StubController;

    fn field(name: &str, value: &str) -> (String, String) {
        (name.to_string(), value.to_string())
    }

    #[tokio::test]
    async fn should_select_current_hardware_by_default() {
        let controller = HardwareController::new(StubController::default());
        let view = controller.load(None).await.unwrap();
        assert_eq!(view.selected, Some(HardwareId::new("M1E1")));
        let selected: Vec<&str> = view
            .supported
            .iter()
            .filter(|c| c.selected)
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(selected, vec!["M1E1: DevKit NodeMCU 30 pin + OFP M1 + OFP E1"]);
        assert_eq!(view.parameters[0].id, "ext_count");
        assert_eq!(view.parameters[0].input_type, "number");
        assert_eq!(view.parameters[0].value, "3");
    }

    #[tokio::test]
    async fn should_show_requested_hardware_parameters() {
        let controller = HardwareController::new(StubController::default());
        let view = controller
            .load(Some(HardwareId::new("ESP32")))
            .await
            .unwrap();
        assert_eq!(view.selected, Some(HardwareId::new("ESP32")));
        assert!(view.parameters.is_empty());

        let view = controller
            .load(Some(HardwareId::new("Z80")))
            .await
            .unwrap();
        assert_eq!(view.selected, Some(HardwareId::new("M1E1")));
    }

    #[tokio::test]
    async fn should_apply_confirmed_settings_and_ask_for_reboot() {
        let stub = Arc::new(StubController::default());
        let controller = HardwareController::new(Arc::clone(&stub));
        let outcome = controller
            .apply("M1E1", &[field("ext_count", "2")], true)
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Reboot);
        let applied = stub.state().last_hardware.clone().unwrap();
        assert_eq!(
            applied.values,
            vec![("ext_count".to_string(), ParameterValue::Integer(2))]
        );
    }

    #[tokio::test]
    async fn should_skip_unconfirmed_or_invalid_settings() {
        let stub = Arc::new(StubController::default());
        let controller = HardwareController::new(Arc::clone(&stub));
        assert_eq!(
            controller
                .apply("M1E1", &[field("ext_count", "2")], false)
                .await
                .unwrap(),
            Outcome::Skipped
        );
        assert_eq!(
            controller
                .apply("M1E1", &[field("ext_count", "deux")], true)
                .await
                .unwrap(),
            Outcome::Skipped
        );
        assert!(!stub.calls().contains(&"apply_hardware"));
    }
}
