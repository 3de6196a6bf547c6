use crate::common_types::DeviceModelId;
use crate::errors::AppError;
use crate::matching::normalize_text;
use crate::AppResult;
use rvstruct::ValueStruct;
use serde::Serialize;
use url::Url;

// Device model identifiers and the page each of them opens.
// The order matters: with the default policy the first identifier found in the text wins.
const BUILTIN_MODELS: &[(&str, &str)] = &[(
    "SPD3303X-E",
    "https://vr.douhuiai.com/v/954703e9k7a998-1751007178.html",
)];

#[derive(Debug, Clone, Serialize)]
pub struct RegistryEntry {
    pub model_id: DeviceModelId,
    pub url: Url,
    #[serde(skip)]
    normalized_id: String,
}

impl RegistryEntry {
    pub fn normalized_id(&self) -> &str {
        &self.normalized_id
    }

    pub fn normalized_len(&self) -> usize {
        self.normalized_id.chars().count()
    }
}

/// An ordered, validated, immutable table of device models.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    entries: Vec<RegistryEntry>,
}

impl ModelRegistry {
    pub fn builtin() -> AppResult<Self> {
        Self::from_entries(BUILTIN_MODELS.iter().copied())
    }

    pub fn from_entries<'s, I>(entries: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (&'s str, &'s str)>,
    {
        let mut validated: Vec<RegistryEntry> = Vec::new();
        for (model_id, url) in entries {
            let normalized_id = normalize_text(model_id);
            if normalized_id.is_empty() {
                return Err(AppError::RegistryConfigError {
                    message: format!(
                        "Model identifier '{}' is empty after normalization",
                        model_id
                    ),
                });
            }
            if let Some(existing) = validated
                .iter()
                .find(|entry| entry.normalized_id == normalized_id)
            {
                return Err(AppError::RegistryConfigError {
                    message: format!(
                        "Model identifiers '{}' and '{}' are the same after normalization",
                        existing.model_id.value(),
                        model_id
                    ),
                });
            }
            validated.push(RegistryEntry {
                model_id: DeviceModelId::new(model_id.to_string()),
                url: Self::parse_destination_url(model_id, url)?,
                normalized_id,
            });
        }

        if validated.is_empty() {
            return Err(AppError::RegistryConfigError {
                message: "Model registry should contain at least one entry".to_string(),
            });
        }

        Ok(ModelRegistry { entries: validated })
    }

    fn parse_destination_url(model_id: &str, url: &str) -> AppResult<Url> {
        let parsed = Url::parse(url)?;
        match parsed.scheme() {
            "http" | "https" if parsed.has_host() => Ok(parsed),
            _ => Err(AppError::RegistryConfigError {
                message: format!(
                    "Destination for '{}' should be an absolute http(s) URL: {}",
                    model_id, url
                ),
            }),
        }
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_is_valid() {
        let registry = ModelRegistry::builtin().unwrap();
        assert!(registry.len() >= 1);
        assert_eq!(registry.entries()[0].model_id.value(), "SPD3303X-E");
        assert_eq!(registry.entries()[0].normalized_id(), "SPD3303X-E");
    }

    #[test]
    fn test_keeps_declaration_order() {
        let registry = ModelRegistry::from_entries([
            ("b-2", "https://example.com/b"),
            ("a-1", "https://example.com/a"),
        ])
        .unwrap();
        let ids: Vec<&str> = registry
            .entries()
            .iter()
            .map(|entry| entry.model_id.value().as_str())
            .collect();
        assert_eq!(ids, vec!["b-2", "a-1"]);
    }

    #[test]
    fn test_rejects_invalid_entries() {
        assert!(matches!(
            ModelRegistry::from_entries(Vec::<(&str, &str)>::new()),
            Err(AppError::RegistryConfigError { .. })
        ));
        assert!(matches!(
            ModelRegistry::from_entries([(" \t", "https://example.com")]),
            Err(AppError::RegistryConfigError { .. })
        ));
        assert!(matches!(
            ModelRegistry::from_entries([
                ("spd 3303x", "https://example.com/a"),
                ("SPD3303X", "https://example.com/b"),
            ]),
            Err(AppError::RegistryConfigError { .. })
        ));
        assert!(matches!(
            ModelRegistry::from_entries([("SPD3303X", "/relative/path")]),
            Err(AppError::UrlParseError(_))
        ));
        assert!(matches!(
            ModelRegistry::from_entries([("SPD3303X", "mailto:someone@example.com")]),
            Err(AppError::RegistryConfigError { .. })
        ));
    }
}
