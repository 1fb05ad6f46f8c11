use serde::Deserialize;

use crate::error::ConfigError;

/// A `(source, exported name)` pair, compared structurally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct ImportSpec {
    pub from: String,
    pub name: String,
}

impl ImportSpec {
    pub fn new(from: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            name: name.into(),
        }
    }
}

/// Plugin options as handed over by the host, all optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginConfig {
    /// Exports that create form components. Calls are matched against this table.
    pub factories: Vec<ImportSpec>,
    pub bindings: ImportSpec,
    pub inputs_prefix: String,
    pub library: String,
    pub library_export: String,
    pub default_type: String,
    pub config_function: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            factories: vec![ImportSpec::new("@formkit/vue", "FormKit")],
            bindings: ImportSpec::new("@formkit/vue", "bindings"),
            inputs_prefix: "virtual:formkit/inputs".to_string(),
            library: "virtual:formkit/library".to_string(),
            library_export: "library".to_string(),
            default_type: "text".to_string(),
            config_function: "defineFormKitConfig".to_string(),
        }
    }
}

impl PluginConfig {
    /// Parse the host's JSON options. Blank input means defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: PluginConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.factories.is_empty() {
            return Err(ConfigError::NoFactories);
        }
        let required = [
            ("bindings.from", self.bindings.from.as_str()),
            ("bindings.name", self.bindings.name.as_str()),
            ("inputsPrefix", self.inputs_prefix.as_str()),
            ("library", self.library.as_str()),
            ("libraryExport", self.library_export.as_str()),
            ("configFunction", self.config_function.as_str()),
        ];
        for (field, value) in required {
            if value.is_empty() {
                return Err(ConfigError::Empty { field });
            }
        }
        if self
            .factories
            .iter()
            .any(|f| f.from.is_empty() || f.name.is_empty())
        {
            return Err(ConfigError::Empty { field: "factories" });
        }
        Ok(())
    }

    pub fn factory(&self, from: &str, name: &str) -> Option<&ImportSpec> {
        self.factories
            .iter()
            .find(|f| f.from == from && f.name == name)
    }

    pub fn has_factory_source(&self, from: &str) -> bool {
        self.factories.iter().any(|f| f.from == from)
    }

    /// `<inputsPrefix>:<type>`, one specialized module per input type.
    pub fn input_spec(&self, type_name: &str) -> ImportSpec {
        ImportSpec::new(
            format!("{}:{}", self.inputs_prefix, type_name),
            self.library_export.clone(),
        )
    }

    pub fn library_spec(&self) -> ImportSpec {
        ImportSpec::new(self.library.clone(), self.library_export.clone())
    }
}
