//! Keyword pseudo-translation over a small emergency glossary
//!
//! Not a general translator: only glossary keywords change, and the whole
//! text is lower-cased whenever a glossary exists for the target.

/// Source-language placeholder meaning "not specified"
pub const AUTO_DETECT: &str = "auto";

const SPANISH: &[(&str, &str)] = &[
    ("emergency", "emergencia"),
    ("evacuation", "evacuación"),
    ("help", "ayuda"),
    ("danger", "peligro"),
    ("safety", "seguridad"),
    ("shelter", "refugio"),
    ("flood", "inundación"),
    ("fire", "fuego"),
    ("earthquake", "terremoto"),
];

const FRENCH: &[(&str, &str)] = &[
    ("emergency", "urgence"),
    ("evacuation", "évacuation"),
    ("help", "aide"),
    ("danger", "danger"),
    ("safety", "sécurité"),
    ("shelter", "abri"),
    ("flood", "inondation"),
    ("fire", "incendie"),
    ("earthquake", "tremblement de terre"),
];

/// Glossary for a target language code, if one exists
pub fn glossary(target_language: &str) -> Option<&'static [(&'static str, &'static str)]> {
    match target_language {
        "es" => Some(SPANISH),
        "fr" => Some(FRENCH),
        _ => None,
    }
}

/// Target languages with a local glossary
pub fn supported_languages() -> &'static [&'static str] {
    &["es", "fr"]
}

/// Translate glossary keywords into `target_language`
///
/// Unknown targets return `text` unchanged. `source_language` is ignored
/// locally since the glossary is English-keyed.
pub fn translate(text: &str, target_language: &str, _source_language: &str) -> String {
    let Some(entries) = glossary(target_language) else {
        return text.to_string();
    };

    let mut translated = text.to_lowercase();
    for (english, foreign) in entries {
        translated = translated.replace(english, foreign);
    }
    translated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spanish_lowercases_and_substitutes() {
        assert_eq!(translate("Flood danger", "es", AUTO_DETECT), "inundación peligro");
    }

    #[test]
    fn test_unknown_target_is_identity() {
        assert_eq!(translate("hello", "zz", AUTO_DETECT), "hello");
        assert_eq!(translate("Flood DANGER", "en", AUTO_DETECT), "Flood DANGER");
    }

    #[test]
    fn test_words_outside_glossary_are_lowercased() {
        assert_eq!(
            translate("Go To The SHELTER Now", "es", AUTO_DETECT),
            "go to the refugio now"
        );
    }

    #[test]
    fn test_french_glossary() {
        assert_eq!(
            translate("Earthquake evacuation help", "fr", "en"),
            "tremblement de terre évacuation aide"
        );
    }

    #[test]
    fn test_substrings_are_translated() {
        assert_eq!(translate("wildfire", "es", AUTO_DETECT), "wildfuego");
    }

    #[test]
    fn test_target_code_is_exact() {
        assert_eq!(translate("Fire", "ES", AUTO_DETECT), "Fire");
    }

    #[test]
    fn test_supported_languages_have_glossaries() {
        for lang in supported_languages() {
            assert!(glossary(lang).is_some());
        }
    }
}
