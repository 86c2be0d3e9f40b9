//! Rule requiring the Serverless `service` to be named after its module.

use monolint_core::{
    Configuration, Module, Rule, RuleError, RuleExample, RuleOutcome, RuleResult, RuleSetting,
};
use serde_yaml::Value;

/// Rule name for serverless-same-name.
pub const NAME: &str = "serverless-same-name";

/// Descriptor file inspected by this rule.
pub const DESCRIPTOR: &str = "serverless.yml";

/// Checks that `service` in a module's `serverless.yml` equals the module name.
///
/// Both `service: name` and `service: { name: name }` are accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerlessSameName;

impl ServerlessSameName {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn service_name(doc: &Value) -> Option<&str> {
    let service = doc.get("service")?;
    service
        .as_str()
        .or_else(|| service.get("name").and_then(Value::as_str))
}

impl Rule for ServerlessSameName {
    fn name(&self) -> &'static str {
        NAME
    }

    fn check(&self, module: &Module, _base_config: &Configuration) -> RuleOutcome {
        let descriptor = module.path.join(DESCRIPTOR);
        if !descriptor.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&descriptor).map_err(|e| RuleError::Io {
            path: descriptor.clone(),
            source: e,
        })?;

        let result = match serde_yaml::from_str::<Value>(&content) {
            Ok(doc) => match service_name(&doc) {
                Some(name) if name == module.name => {
                    RuleResult::valid(NAME, &descriptor, "serverless.yml service equals module name")
                }
                Some(name) => RuleResult::invalid(
                    NAME,
                    &descriptor,
                    format!("serverless.yml service \"{name}\" should be \"{}\"", module.name),
                ),
                None => RuleResult::invalid(
                    NAME,
                    &descriptor,
                    format!(
                        "serverless.yml should have attribute \"service\" set to \"{}\"",
                        module.name
                    ),
                ),
            },
            Err(e) => RuleResult::invalid(
                NAME,
                &descriptor,
                format!("serverless.yml is not valid YAML: {e}"),
            ),
        };

        Ok(Some(vec![result.with_module(module)]))
    }

    fn doc_markdown(&self) -> &'static str {
        "* Checks if the attribute \"service\" in serverless.yml equals the name of the module folder"
    }

    fn doc_example_configs(&self) -> Vec<RuleExample> {
        vec![
            RuleExample::new("Enables this rule", RuleSetting::EnabledDefault),
            RuleExample::new("Disables this rule", RuleSetting::Disabled),
        ]
    }
}
