//! Prompt rendering
//!
//! A [`PromptTemplate`] holds instructional text with two placeholders,
//! `{name}` and `{description}`, that are filled from each article.
//! Substitution is single-pass: text coming from an article is copied
//! verbatim and never scanned for placeholders again.

use std::path::{Path, PathBuf};
use thiserror::Error;

pub const NAME_PLACEHOLDER: &str = "{name}";
pub const DESCRIPTION_PLACEHOLDER: &str = "{description}";

/// Built-in relevance template for the company Orange.
pub const DEFAULT_TEMPLATE: &str = concat!(
    "En lisant/analysant \"{name}\" et \"{description}\", je veux que tu répondes par \"Oui\" ou \"Non\". ",
    "Réponds uniquement par \"Oui\" ou \"Non\" sans commenter. ",
    "La question est la suivante : je suis un site dédié aux données économiques, juridiques, financières et stratégiques des entreprises, ",
    "et je veux savoir si cette information est pertinente pour un public cherchant à comprendre l'évolution de l'entreprise Orange ",
    "dans un contexte économique et stratégique.\n\n",
    "Réponds \"Oui\" si l'information est pertinente, c’est-à-dire si :\n",
    "- Elle concerne directement les activités économiques, financières ou stratégiques d'Orange.\n",
    "- Elle a un impact significatif sur la performance, la réglementation, ou les décisions stratégiques de l'entreprise.\n",
    "- Elle porte sur des partenariats, des investissements, des innovations technologiques, des initiatives de développement ",
    "ou des sanctions réglementaires affectant l’entreprise.\n\n",
    "Exemples d'informations pertinentes pour \"Orange\" :\n",
    "1. \"Orange se retire de Wall Street après 27 ans de cotation\"\n",
    "   Impact financier et stratégique pour l'entreprise.\n",
    "2. \"Orange et Mastercard s'allient pour développer des services financiers en Afrique\"\n",
    "   Partenariat stratégique visant l'expansion internationale et le développement de nouveaux services financiers.\n",
    "3. \"Le Conseil d'État confirme une amende de 26 millions d'euros pour Orange\"\n",
    "   Décision réglementaire ayant des implications économiques pour l'entreprise.\n",
    "4. \"Orange choisit HPE pour construire un supercalculateur IA pour l'armée française\"\n",
    "   Partenariat stratégique renforçant la position d'Orange dans les services de haute technologie.\n\n",
    "Réponds \"Non\" si l'information est non pertinente, c’est-à-dire si :\n",
    "- Elle concerne un homonyme ou un sujet sans lien direct avec Orange en tant qu’entreprise.\n",
    "- Elle porte sur des événements locaux ou des offres commerciales sans impact stratégique, économique ou financier significatif pour l'entreprise.\n\n",
    "Exemples d'informations non pertinentes pour \"Orange\" :\n",
    "1. \"Orange propose deux mois gratuits sur sa fibre pour la rentrée\"\n",
    "   Offre commerciale sans impact direct sur la stratégie d'entreprise.\n",
    "2. \"Concert de Francis Cabrel écourté au Théâtre Antique d'Orange à cause du froid\"\n",
    "   Information locale sans lien avec l'entreprise Orange.\n",
    "3. \"En partenariat avec Orange, Midi Libre organise un atelier pour éviter les arnaques en ligne\"\n",
    "   Partenariat promotionnel sans portée stratégique pour l'entreprise.\n",
    "4. \"Sosh et YouPrice se battent pour offrir les meilleurs forfaits sur le réseau d'Orange\"\n",
    "   Comparaison de forfaits sans impact sur la stratégie ou la performance économique d'Orange.\n",
);

/// Errors raised while loading a custom template
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template is missing the {placeholder} placeholder")]
    MissingPlaceholder { placeholder: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    text: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplate {
    /// Wraps custom template text, requiring both placeholders to be present.
    pub fn new(text: impl Into<String>) -> Result<Self, PromptError> {
        let text = text.into();
        for placeholder in [NAME_PLACEHOLDER, DESCRIPTION_PLACEHOLDER] {
            if !text.contains(placeholder) {
                return Err(PromptError::MissingPlaceholder { placeholder });
            }
        }
        Ok(Self { text })
    }

    pub fn from_file(path: &Path) -> Result<Self, PromptError> {
        let text = std::fs::read_to_string(path).map_err(|source| PromptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(text)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Renders the prompt for one article.
    pub fn render(&self, name: &str, description: &str) -> String {
        let mut out = String::with_capacity(self.text.len() + name.len() + description.len());
        let mut rest = self.text.as_str();

        while let Some(pos) = rest.find('{') {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];
            if let Some(after) = tail.strip_prefix(NAME_PLACEHOLDER) {
                out.push_str(name);
                rest = after;
            } else if let Some(after) = tail.strip_prefix(DESCRIPTION_PLACEHOLDER) {
                out.push_str(description);
                rest = after;
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_substitutes_both_fields() {
        let prompt = PromptTemplate::default().render(
            "Orange lance un partenariat stratégique",
            "Accord avec un opérateur africain",
        );

        assert!(prompt.starts_with(
            "En lisant/analysant \"Orange lance un partenariat stratégique\" et \"Accord avec un opérateur africain\""
        ));
        assert!(!prompt.contains(NAME_PLACEHOLDER));
        assert!(!prompt.contains(DESCRIPTION_PLACEHOLDER));
    }

    #[test]
    fn test_default_template_constrains_answer() {
        let text = PromptTemplate::default();
        assert!(text.as_str().contains("Réponds uniquement par \"Oui\" ou \"Non\""));
        assert!(text.as_str().contains("Exemples d'informations pertinentes"));
        assert!(text.as_str().contains("Exemples d'informations non pertinentes"));
    }

    #[test]
    fn test_empty_fields() {
        let prompt = PromptTemplate::new("[{name}|{description}]").unwrap().render("", "");
        assert_eq!(prompt, "[|]");
    }

    #[test]
    fn test_special_characters_are_kept() {
        let template = PromptTemplate::new("{name} / {description}").unwrap();
        let prompt = template.render("L'\"Orange\" {x}", "100% {} \\n");
        assert_eq!(prompt, "L'\"Orange\" {x} / 100% {} \\n");
    }

    #[test]
    fn test_inserted_text_is_not_rescanned() {
        let template = PromptTemplate::new("{name}:{description}").unwrap();
        let prompt = template.render("{description}", "{name}");
        assert_eq!(prompt, "{description}:{name}");
    }

    #[test]
    fn test_repeated_placeholders() {
        let template = PromptTemplate::new("{name} {name} {description}").unwrap();
        assert_eq!(template.render("a", "b"), "a a b");
    }

    #[test]
    fn test_unknown_braces_pass_through() {
        let template = PromptTemplate::new("{ {name} {other} {description}}").unwrap();
        assert_eq!(template.render("n", "d"), "{ n {other} d}");
    }

    #[test]
    fn test_missing_placeholder_rejected() {
        let err = PromptTemplate::new("only {name}").unwrap_err();
        assert!(matches!(
            err,
            PromptError::MissingPlaceholder {
                placeholder: DESCRIPTION_PLACEHOLDER
            }
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.txt");
        std::fs::write(&path, "Titre: {name}\nRésumé: {description}\n").unwrap();

        let template = PromptTemplate::from_file(&path).unwrap();
        assert_eq!(template.render("A", "B"), "Titre: A\nRésumé: B\n");
    }

    #[test]
    fn test_from_missing_file() {
        let err = PromptTemplate::from_file(Path::new("/nonexistent/template.txt")).unwrap_err();
        assert!(matches!(err, PromptError::Read { .. }));
    }
}
