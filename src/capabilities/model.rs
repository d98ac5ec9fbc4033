use crate::{
    capabilities::extent::parse_time_extent,
    foundation::error::{TimestepError, TimestepResult},
    stepping::stepper::TimeStepper,
};

/// One layer advertised by a capabilities document.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityLayer {
    pub name: String,
    /// Raw values of the layer's time dimension, as they appear in the document.
    #[serde(default)]
    pub time_values: Vec<String>,
}

impl CapabilityLayer {
    /// Availability described by the layer's time dimension.
    pub fn availability(&self) -> TimestepResult<TimeStepper> {
        let values: Vec<&str> = self
            .time_values
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .collect();
        if values.is_empty() {
            return Err(TimestepError::missing_capability(format!(
                "layer '{}' has no time dimension",
                self.name
            )));
        }
        parse_time_extent(&values.join(","))
    }
}

/// Parsed capabilities document for one service url.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CapabilitiesDocument {
    pub url: String,
    #[serde(default)]
    pub layers: Vec<CapabilityLayer>,
}

/// All capabilities documents known to the animation, in fetch order.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CapabilityStore {
    documents: Vec<CapabilitiesDocument>,
}

impl CapabilityStore {
    pub fn new(documents: Vec<CapabilitiesDocument>) -> Self {
        Self { documents }
    }

    pub fn from_json_str(s: &str) -> TimestepResult<Self> {
        serde_json::from_str(s).map_err(|e| TimestepError::serde(e.to_string()))
    }

    pub fn documents(&self) -> &[CapabilitiesDocument] {
        &self.documents
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// First layer named `name` in a document fetched from `url`.
    pub fn layer(&self, url: &str, name: &str) -> Option<&CapabilityLayer> {
        self.documents
            .iter()
            .filter(|d| d.url == url)
            .find_map(|d| d.layers.iter().find(|l| l.name == name))
    }

    /// Stepper for `(url, name)`.
    ///
    /// `Ok(None)` when the store does not know the layer; errors when the layer exists
    /// but its time dimension is missing or malformed.
    pub fn availability(&self, url: &str, name: &str) -> TimestepResult<Option<TimeStepper>> {
        self.layer(url, name)
            .map(CapabilityLayer::availability)
            .transpose()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capabilities/model.rs"]
mod tests;
