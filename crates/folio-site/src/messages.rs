//! Localized user-facing messages.

use serde::{Deserialize, Serialize};

/// Language for user-facing messages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Spanish.
    Es,
}

/// Text shown when a document cannot be loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundMessage {
    /// Main message.
    pub message: &'static str,
    /// Label of the link back to the documentation index.
    pub index_link_label: &'static str,
}

impl NotFoundMessage {
    /// Message in the given language.
    #[must_use]
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::En => Self {
                message: "Document not found.",
                index_link_label: "Back to documentation",
            },
            Language::Es => Self {
                message: "Documento no encontrado.",
                index_link_label: "Volver a la documentación",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_language_is_english() {
        let message = NotFoundMessage::for_language(Language::default());
        assert_eq!(message.message, "Document not found.");
    }

    #[test]
    fn test_spanish_message() {
        let message = NotFoundMessage::for_language(Language::Es);
        assert_eq!(message.message, "Documento no encontrado.");
        assert_eq!(message.index_link_label, "Volver a la documentación");
    }

    #[test]
    fn test_language_deserializes_lowercase() {
        let language: Language = serde_json::from_str(r#""es""#).unwrap();
        assert_eq!(language, Language::Es);
    }
}
