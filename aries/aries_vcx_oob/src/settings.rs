use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use url::Url;

/// Settings of an [`OobMessageProcessor`](crate::processor::OobMessageProcessor).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, TypedBuilder)]
pub struct OobProcessorConfig {
    /// Endpoint advertised in the `~service` block of connectionless replies.
    pub default_endpoint: Url,
}

impl OobProcessorConfig {
    pub fn default_endpoint(&self) -> &str {
        self.default_endpoint.as_str()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_config() {
        let config: OobProcessorConfig =
            serde_json::from_value(json!({ "default_endpoint": "http://localhost:8020/" }))
                .unwrap();

        assert_eq!(config.default_endpoint(), "http://localhost:8020/");
    }

    #[test]
    fn test_rejects_invalid_endpoint() {
        let res: Result<OobProcessorConfig, _> =
            serde_json::from_value(json!({ "default_endpoint": "not a url" }));
        assert!(res.is_err());
    }
}
