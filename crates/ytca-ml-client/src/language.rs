//! Source languages with a translate-to-English model.

use ytca_models::DetectedLanguage;

/// Languages with a `translation-<lang>-en` endpoint on the gateway.
pub const SUPPORTED_SOURCE_LANGUAGES: [&str; 8] = ["de", "es", "fr", "it", "ja", "ko", "ru", "zh"];

/// Map detector output codes onto the codes used to name translation endpoints.
pub fn normalize_language(label: &str) -> &str {
    match label {
        "zh_cht" | "zh_chs" => "zh",
        other => other,
    }
}

/// Source language to translate from, if the detection calls for a translation.
///
/// Requires a present label and score, and a normalized label on the allow-list.
/// English and anything unsupported yield `None`.
pub fn translation_source(detected: &DetectedLanguage) -> Option<&'static str> {
    if !detected.is_present() {
        return None;
    }
    let language = normalize_language(&detected.label);
    SUPPORTED_SOURCE_LANGUAGES
        .iter()
        .copied()
        .find(|supported| *supported == language)
}

/// Endpoint name of the model translating `language` to English.
pub fn translation_endpoint(language: &str) -> String {
    format!("translation-{}-en", language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chinese_variants_are_normalized() {
        assert_eq!(normalize_language("zh_cht"), "zh");
        assert_eq!(normalize_language("zh_chs"), "zh");
        assert_eq!(normalize_language("fr"), "fr");
    }

    #[test]
    fn test_translation_source_allow_list() {
        for language in SUPPORTED_SOURCE_LANGUAGES {
            let detected = DetectedLanguage::new(language, 0.8);
            assert_eq!(translation_source(&detected), Some(language));
        }

        assert_eq!(translation_source(&DetectedLanguage::new("zh_cht", 0.7)), Some("zh"));
        assert_eq!(translation_source(&DetectedLanguage::new("en", 0.99)), None);
        assert_eq!(translation_source(&DetectedLanguage::new("pt", 0.95)), None);
    }

    #[test]
    fn test_translation_source_requires_score_and_label() {
        assert_eq!(translation_source(&DetectedLanguage::new("fr", 0.0)), None);
        assert_eq!(translation_source(&DetectedLanguage::new("", 0.9)), None);
    }

    #[test]
    fn test_translation_endpoint_naming() {
        assert_eq!(translation_endpoint("fr"), "translation-fr-en");
        assert_eq!(translation_endpoint("zh"), "translation-zh-en");
    }
}
