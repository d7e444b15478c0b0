use serde::{Deserialize, Serialize};

/// Data-attribute names the host document is annotated with.
///
/// The wrapper and container are marked with the bare prefix attribute
/// (`data-glissade="wrapper"` / `data-glissade="container"`); namespace and
/// prevent markers are suffixed attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSchema {
    pub prefix: String,
    pub wrapper: String,
    pub container: String,
    pub namespace: String,
    pub prevent: String,
}

impl Default for AttributeSchema {
    fn default() -> Self {
        Self {
            prefix: "data-glissade".to_string(),
            wrapper: "wrapper".to_string(),
            container: "container".to_string(),
            namespace: "namespace".to_string(),
            prevent: "prevent".to_string(),
        }
    }
}

impl AttributeSchema {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Default::default()
        }
    }

    /// The marker attribute name, e.g. `data-glissade`.
    pub fn marker(&self) -> &str {
        &self.prefix
    }

    /// The namespace attribute name, e.g. `data-glissade-namespace`.
    pub fn namespace_attr(&self) -> String {
        format!("{}-{}", self.prefix, self.namespace)
    }

    /// The prevent attribute name, e.g. `data-glissade-prevent`.
    pub fn prevent_attr(&self) -> String {
        format!("{}-{}", self.prefix, self.prevent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_attribute_names() {
        let schema = AttributeSchema::default();
        assert_eq!(schema.marker(), "data-glissade");
        assert_eq!(schema.namespace_attr(), "data-glissade-namespace");
        assert_eq!(schema.prevent_attr(), "data-glissade-prevent");
    }

    #[test]
    fn custom_prefix() {
        let schema = AttributeSchema::with_prefix("data-nav");
        assert_eq!(schema.namespace_attr(), "data-nav-namespace");
    }
}
