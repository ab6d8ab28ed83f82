//! Keyword detection of battery mentions and battery replacements.
//!
//! Each comma-separated keyword list compiles to one case-insensitive,
//! word-bounded alternation. A record is a replacement when the battery
//! pattern and the replacement pattern both match somewhere in its combined
//! narrative; the two terms need not be adjacent or in the same field.
//!
//! There is no stemming and no negation handling: "BATERIA NAO TROCADA" is
//! flagged as a replacement.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const DEFAULT_BATTERY_TERMS: &str = "BATERIA,BATERIAS,BATT";
pub const DEFAULT_REPLACEMENT_TERMS: &str = "TROCA,TROCADA,TROCADAS,TROCADO,TROCAR,SUBSTITUI,SUBSTITUIDA,SUBSTITUIDO,SUBSTITUICAO,INSTALADO";

/// The two keyword lists, as typed by the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    pub battery_terms: String,
    pub replacement_terms: String,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        KeywordConfig {
            battery_terms: DEFAULT_BATTERY_TERMS.to_string(),
            replacement_terms: DEFAULT_REPLACEMENT_TERMS.to_string(),
        }
    }
}

/// Splits a comma-separated list into trimmed, non-empty terms.
pub fn parse_terms(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_uppercase)
        .collect()
}

fn build_pattern(list: &str) -> Result<Option<Regex>> {
    let terms = parse_terms(list);
    if terms.is_empty() {
        return Ok(None);
    }
    let alternation = terms.iter().map(|t| regex::escape(t)).collect::<Vec<_>>().join("|");
    Ok(Some(Regex::new(&format!(r"(?i)\b(?:{})\b", alternation))?))
}

#[derive(Debug, Clone)]
pub struct KeywordDetector {
    battery: Option<Regex>,
    replacement: Option<Regex>,
}

impl KeywordDetector {
    pub fn new(config: &KeywordConfig) -> Result<Self> {
        let detector = KeywordDetector {
            battery: build_pattern(&config.battery_terms)?,
            replacement: build_pattern(&config.replacement_terms)?,
        };
        tracing::debug!(
            battery = ?detector.battery.as_ref().map(Regex::as_str),
            replacement = ?detector.replacement.as_ref().map(Regex::as_str),
            "Built keyword detector"
        );
        Ok(detector)
    }

    pub fn mentions_battery(&self, text: &str) -> bool {
        self.battery.as_ref().is_some_and(|re| re.is_match(text))
    }

    pub fn is_replacement(&self, text: &str) -> bool {
        match (&self.battery, &self.replacement) {
            (Some(battery), Some(replacement)) => battery.is_match(text) && replacement.is_match(text),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_detector() -> KeywordDetector {
        KeywordDetector::new(&KeywordConfig::default()).unwrap()
    }

    #[test]
    fn test_battery_replaced_flags_both() {
        let d = default_detector();
        assert!(d.mentions_battery("BATERIA TROCADA"));
        assert!(d.is_replacement("BATERIA TROCADA"));
    }

    #[test]
    fn test_default_terms_cover_participles() {
        let d = default_detector();
        for text in [
            "BATERIA TROCADA",
            "BATERIAS TROCADAS",
            "BATERIA SUBSTITUIDA",
            "BATT SUBSTITUIDO",
        ] {
            assert!(d.is_replacement(text), "{text}");
        }
    }

    #[test]
    fn test_battery_alone_is_mention_only() {
        let d = default_detector();
        assert!(d.mentions_battery("BATERIA"));
        assert!(!d.is_replacement("BATERIA"));
    }

    #[test]
    fn test_terms_need_not_be_adjacent() {
        let d = default_detector();
        let text = "VERIFICADO SISTEMA ELETRICO. ... CONCLUSAO: BATT SUBSTITUI CONFORME OS";
        assert!(d.is_replacement(text));
        assert!(d.is_replacement("INSTALADO NOVO MODULO BATERIAS"));
    }

    #[test]
    fn test_word_boundaries() {
        let d = default_detector();
        // "BATERIAL" and "TROCAS" are not listed terms
        assert!(!d.mentions_battery("BATERIAL"));
        assert!(!d.is_replacement("BATERIA TROCAS"));
        assert!(d.mentions_battery("(BATERIA)"));
    }

    #[test]
    fn test_case_insensitive() {
        let d = default_detector();
        assert!(d.is_replacement("bateria trocada"));
    }

    #[test]
    fn test_negation_is_not_handled() {
        let d = default_detector();
        assert!(d.is_replacement("BATERIA NAO TROCADA"));
    }

    #[test]
    fn test_empty_lists_disable_detection() {
        let d = KeywordDetector::new(&KeywordConfig {
            battery_terms: " , ".to_string(),
            replacement_terms: DEFAULT_REPLACEMENT_TERMS.to_string(),
        })
        .unwrap();
        assert!(!d.mentions_battery("BATERIA TROCADA"));
        assert!(!d.is_replacement("BATERIA TROCADA"));

        let d = KeywordDetector::new(&KeywordConfig {
            battery_terms: DEFAULT_BATTERY_TERMS.to_string(),
            replacement_terms: String::new(),
        })
        .unwrap();
        assert!(d.mentions_battery("BATERIA TROCADA"));
        assert!(!d.is_replacement("BATERIA TROCADA"));
    }

    #[test]
    fn test_terms_are_escaped() {
        let d = KeywordDetector::new(&KeywordConfig {
            battery_terms: "BAT.12V".to_string(),
            replacement_terms: "TROCA".to_string(),
        })
        .unwrap();
        assert!(d.mentions_battery("BAT.12V"));
        assert!(!d.mentions_battery("BATX12V"));
    }

    #[test]
    fn test_replacement_implies_mention() {
        let configs = [
            KeywordConfig::default(),
            KeywordConfig { battery_terms: "BATT".into(), replacement_terms: "TROCA,NOVA".into() },
            KeywordConfig { battery_terms: "".into(), replacement_terms: "TROCA".into() },
            KeywordConfig { battery_terms: "BATERIA".into(), replacement_terms: "".into() },
        ];
        let texts = [
            "BATERIA TROCADA",
            "TROCA DE PNEU",
            "BATT NOVA",
            "BATERIA",
            "",
            "SUBSTITUICAO DE BATERIAS E FILTRO",
        ];
        for config in &configs {
            let d = KeywordDetector::new(config).unwrap();
            for text in texts {
                if d.is_replacement(text) {
                    assert!(d.mentions_battery(text), "{config:?} / {text}");
                }
            }
        }
    }

    #[test]
    fn test_parse_terms() {
        assert_eq!(parse_terms(" bateria, ,BATT ,"), vec!["BATERIA".to_string(), "BATT".to_string()]);
        assert!(parse_terms("").is_empty());
    }
}
