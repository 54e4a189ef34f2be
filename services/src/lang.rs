//! Localised plugin strings.

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const DEFAULT_LANG: &str = "en";

type StringTable = HashMap<&'static str, &'static str>;

static STRINGS: Lazy<HashMap<&'static str, StringTable>> = Lazy::new(|| {
    let en: StringTable = [
        ("default", "Enabled by default"),
        (
            "default_help",
            "If set, this feedback method will be enabled by default for all new assignments.",
        ),
        ("enabled", "Feedback WriteUp"),
        (
            "enabled_help",
            "Feedback WriteUp enables language teachers to tag student productions with predefined marks. Enabled only for online text submission type.",
        ),
        ("pluginname", "Feedback WriteUp"),
        ("privacy:commentpath", "Feedback WriteUp"),
        ("privacy:metadata:assignmentid", "Assignment ID"),
        ("privacy:metadata:commentpurpose", "The comment text."),
        (
            "privacy:metadata:gradepurpose",
            "The grade ID associated with the comment.",
        ),
        (
            "privacy:metadata:tablesummary",
            "This stores WriteUp made by the graders as feedback for the student on their submission.",
        ),
        (
            "couldnotconvertgrade",
            "Could not convert assignment grade for user {$a}.",
        ),
    ]
    .into_iter()
    .collect();

    let fr: StringTable = [
        ("default", "Activé par défaut"),
        (
            "default_help",
            "Si coché, cette méthode de feedback sera activée par défaut dans tout nouveau devoir.",
        ),
        ("enabled", "Feedback WriteUp"),
        (
            "enabled_help",
            "Si coché, l'évaluateur pourra remettre un feedback WriteUp pour le devoir.",
        ),
        ("pluginname", "Feedback WriteUp"),
        ("privacy:commentpath", "Feedback WriteUp"),
        ("privacy:metadata:assignmentid", "ID du devoir"),
        ("privacy:metadata:commentpurpose", "Le texte de commentaire"),
        (
            "privacy:metadata:gradepurpose",
            "La note associée au commentaire.",
        ),
        (
            "privacy:metadata:tablesummary",
            "Ce tableau présente les commentaires WriteUp des évaluateurs associés au feedback sur la soumission des étudiants.",
        ),
        (
            "couldnotconvertgrade",
            "Impossible de convertir la note du devoir pour l'utilisateur {$a}.",
        ),
    ]
    .into_iter()
    .collect();

    HashMap::from([("en", en), ("fr", fr)])
});

/// Looks up `key` in `lang`, falling back to English. Unknown keys come back
/// as `[[key]]`.
pub fn get_string(lang: &str, key: &str) -> String {
    STRINGS
        .get(lang)
        .and_then(|table| table.get(key))
        .or_else(|| STRINGS.get(DEFAULT_LANG).and_then(|table| table.get(key)))
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("[[{key}]]"))
}

/// Like [`get_string`], substituting `{$a}` with `a`.
pub fn get_string_with(lang: &str, key: &str, a: impl std::fmt::Display) -> String {
    get_string(lang, key).replace("{$a}", &a.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys() {
        assert_eq!(get_string("en", "pluginname"), "Feedback WriteUp");
        assert_eq!(get_string("fr", "privacy:metadata:assignmentid"), "ID du devoir");
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(get_string("de", "default"), "Enabled by default");
        assert_eq!(get_string("en", "nope"), "[[nope]]");
    }

    #[test]
    fn test_placeholder() {
        assert_eq!(
            get_string_with("en", "couldnotconvertgrade", 42),
            "Could not convert assignment grade for user 42."
        );
    }
}
