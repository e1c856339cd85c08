//! Personality mode catalog.
//!
//! A mode is a named response-style profile (tone, pace, approach) the assistant adopts.
//! The catalog is immutable once built and keeps insertion order: recommender tie-breaks
//! and `available_modes` listings both follow it.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use super::builtin::builtin_modes;
use crate::error::{CoreError, CoreResult};

/// Prompt context used when the requested mode is unknown.
pub const FALLBACK_PROMPT_CONTEXT: &str = "Use a balanced, supportive approach.";

// ---------------------------------------------------------------------------
// ModeRole: what a mode is for, independent of its id
// ---------------------------------------------------------------------------

/// Functional role of a mode. Recommender weights and the crisis guardrail refer to roles,
/// so a custom catalog can rename ids without losing scoring behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeRole {
    /// Calm, gentle support. Gains the distress and urgency bonuses.
    Nurturing,
    /// Encouraging, action-oriented. Gains the neutral-sentiment point.
    Motivational,
    /// Lighthearted, optimistic. Gains the positive-sentiment bonus; unsafe in a crisis.
    Playful,
    /// Thoughtful, introspective. Gains the secondary distress bonus.
    Reflective,
    /// Concrete, solution-focused. Gains the low-urgency point.
    Practical,
}

impl ModeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModeRole::Nurturing => "nurturing",
            ModeRole::Motivational => "motivational",
            ModeRole::Playful => "playful",
            ModeRole::Reflective => "reflective",
            ModeRole::Practical => "practical",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "nurturing" => Some(ModeRole::Nurturing),
            "motivational" => Some(ModeRole::Motivational),
            "playful" => Some(ModeRole::Playful),
            "reflective" => Some(ModeRole::Reflective),
            "practical" => Some(ModeRole::Practical),
            _ => None,
        }
    }

    /// Stats category: supportive, energetic, or practical.
    pub fn category(&self) -> &'static str {
        match self {
            ModeRole::Nurturing | ModeRole::Reflective => "supportive",
            ModeRole::Motivational | ModeRole::Playful => "energetic",
            ModeRole::Practical => "practical",
        }
    }
}

// ---------------------------------------------------------------------------
// PersonalityMode
// ---------------------------------------------------------------------------

/// Tone, pace, language, and approach of a mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationStyle {
    pub tone: String,
    pub pace: String,
    pub language: String,
    pub approach: String,
}

/// One response-style profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityMode {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub emoji: String,
    pub role: ModeRole,
    pub communication_style: CommunicationStyle,
    #[serde(default)]
    pub characteristics: Vec<String>,
    pub specialties: Vec<String>,
    #[serde(default)]
    pub sample_responses: Vec<String>,
}

impl PersonalityMode {
    /// Structured block that steers a downstream model's tone. Deterministic for a given record.
    /// List sections with no entries are left out.
    pub fn prompt_context(&self) -> String {
        let style = &self.communication_style;
        let header = if self.emoji.is_empty() {
            format!("PERSONALITY MODE: {}", self.name)
        } else {
            format!("PERSONALITY MODE: {} {}", self.name, self.emoji)
        };
        let mut sections = vec![
            header,
            format!("DESCRIPTION: {}", self.description),
            format!(
                "COMMUNICATION STYLE:\n- Tone: {}\n- Pace: {}\n- Language: {}\n- Approach: {}",
                style.tone, style.pace, style.language, style.approach
            ),
        ];
        let mut push_list = |title: &str, lines: Vec<String>| {
            if !lines.is_empty() {
                sections.push(format!("{}:\n{}", title, lines.join("\n")));
            }
        };
        push_list(
            "KEY CHARACTERISTICS",
            self.characteristics.iter().map(|s| format!("- {}", s)).collect(),
        );
        push_list(
            "SPECIALTIES",
            self.specialties.iter().map(|s| format!("- {}", s)).collect(),
        );
        push_list(
            "EXAMPLE RESPONSES",
            self.sample_responses.iter().map(|s| format!("\"{}\"", s)).collect(),
        );
        sections.push(
            "Embody this personality while maintaining professionalism and mental health best practices."
                .to_string(),
        );
        sections.join("\n\n")
    }
}

// ---------------------------------------------------------------------------
// ModeCatalog
// ---------------------------------------------------------------------------

static BUILTIN: Lazy<Arc<ModeCatalog>> = Lazy::new(|| {
    Arc::new(ModeCatalog {
        modes: builtin_modes()
            .into_iter()
            .map(|m| (m.id.clone(), m))
            .collect(),
    })
});

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    modes: Vec<PersonalityMode>,
}

/// Immutable, insertion-ordered registry of personality modes keyed by id.
#[derive(Debug, Clone, Serialize)]
pub struct ModeCatalog {
    modes: IndexMap<String, PersonalityMode>,
}

impl ModeCatalog {
    /// Process-wide built-in catalog, initialized once on first use.
    pub fn builtin() -> Arc<ModeCatalog> {
        Arc::clone(&BUILTIN)
    }

    /// Build a catalog from records, keeping their order. Rejects empty catalogs, duplicate
    /// or blank ids, and modes without name, description, or specialties.
    pub fn from_modes(modes: Vec<PersonalityMode>) -> CoreResult<Self> {
        if modes.is_empty() {
            return Err(CoreError::InvalidCatalog("catalog has no modes".to_string()));
        }
        let mut seen = HashSet::new();
        for mode in &modes {
            validate_mode(mode)?;
            if !seen.insert(mode.id.clone()) {
                return Err(CoreError::InvalidCatalog(format!("duplicate mode id '{}'", mode.id)));
            }
        }
        Ok(Self {
            modes: modes.into_iter().map(|m| (m.id.clone(), m)).collect(),
        })
    }

    /// Parse a `[[modes]]` TOML document.
    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::from_modes(file.modes)
    }

    pub fn load_from_path(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::info!(
            target: "reflective::modes",
            path = %path.display(),
            modes = catalog.len(),
            "Loaded custom mode catalog"
        );
        Ok(catalog)
    }

    /// Custom catalog at `path` when given, else the shared built-in one.
    pub fn resolve(path: Option<&str>) -> CoreResult<Arc<ModeCatalog>> {
        match path.map(str::trim).filter(|p| !p.is_empty()) {
            Some(p) => Ok(Arc::new(Self::load_from_path(Path::new(p))?)),
            None => Ok(Self::builtin()),
        }
    }

    /// Catalog with no entries. Only reachable in-crate; used to exercise recommender fallbacks.
    #[cfg(test)]
    pub(crate) fn empty_for_tests() -> Self {
        Self {
            modes: IndexMap::new(),
        }
    }

    pub fn modes(&self) -> &IndexMap<String, PersonalityMode> {
        &self.modes
    }

    pub fn get(&self, id: &str) -> Option<&PersonalityMode> {
        self.modes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.modes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Ids in catalog order.
    pub fn ids(&self) -> Vec<String> {
        self.modes.keys().cloned().collect()
    }

    pub fn first(&self) -> Option<&PersonalityMode> {
        self.modes.values().next()
    }

    /// First mode (catalog order) with `role`.
    pub fn first_with_role(&self, role: ModeRole) -> Option<&PersonalityMode> {
        self.modes.values().find(|m| m.role == role)
    }

    /// Ids grouped into supportive / energetic / practical, each in catalog order.
    pub fn categories(&self) -> IndexMap<String, Vec<String>> {
        let mut out: IndexMap<String, Vec<String>> = ["supportive", "energetic", "practical"]
            .iter()
            .map(|c| (c.to_string(), Vec::new()))
            .collect();
        for mode in self.modes.values() {
            out.entry(mode.role.category().to_string())
                .or_default()
                .push(mode.id.clone());
        }
        out
    }
}

fn validate_mode(mode: &PersonalityMode) -> CoreResult<()> {
    if mode.id.trim().is_empty() {
        return Err(CoreError::InvalidCatalog("mode id must not be empty".to_string()));
    }
    if mode.name.trim().is_empty() || mode.description.trim().is_empty() {
        return Err(CoreError::InvalidCatalog(format!(
            "mode '{}' needs a name and description",
            mode.id
        )));
    }
    if mode.specialties.is_empty() {
        return Err(CoreError::InvalidCatalog(format!(
            "mode '{}' lists no specialties",
            mode.id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_keeps_insertion_order() {
        let catalog = ModeCatalog::builtin();
        assert_eq!(
            catalog.ids(),
            vec![
                "calm_coach",
                "assertive_buddy",
                "playful_companion",
                "wise_mentor",
                "practical_helper"
            ]
        );
    }

    #[test]
    fn builtin_catalog_passes_validation() {
        let catalog = ModeCatalog::builtin();
        let rebuilt = ModeCatalog::from_modes(catalog.modes().values().cloned().collect());
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn builtin_records_are_complete() {
        for (id, mode) in ModeCatalog::builtin().modes() {
            assert_eq!(&mode.id, id);
            assert!(!mode.name.is_empty(), "{} name", id);
            assert!(!mode.description.is_empty(), "{} description", id);
            assert!(!mode.specialties.is_empty(), "{} specialties", id);
            assert_eq!(mode.sample_responses.len(), 3, "{} samples", id);
        }
    }

    #[test]
    fn roles_map_to_stat_categories() {
        let cats = ModeCatalog::builtin().categories();
        assert_eq!(cats["supportive"], vec!["calm_coach", "wise_mentor"]);
        assert_eq!(cats["energetic"], vec!["assertive_buddy", "playful_companion"]);
        assert_eq!(cats["practical"], vec!["practical_helper"]);
    }

    #[test]
    fn role_from_str_is_case_insensitive() {
        assert_eq!(ModeRole::from_str(" Playful "), Some(ModeRole::Playful));
        assert_eq!(ModeRole::from_str("clown"), None);
        assert_eq!(ModeRole::Reflective.as_str(), "reflective");
    }

    #[test]
    fn prompt_context_has_every_section() {
        let catalog = ModeCatalog::builtin();
        let calm = catalog.get("calm_coach").unwrap();
        let ctx = calm.prompt_context();
        assert!(ctx.starts_with("PERSONALITY MODE: Calm Coach"));
        assert!(ctx.contains("DESCRIPTION: A gentle, patient"));
        assert!(ctx.contains("- Tone: gentle, soothing, patient"));
        assert!(ctx.contains("- Approach: gradual, non-pressuring"));
        assert!(ctx.contains("KEY CHARACTERISTICS:\n- Patient and understanding"));
        assert!(ctx.contains("SPECIALTIES:\n- Anxiety management"));
        assert!(ctx.contains("EXAMPLE RESPONSES:\n\"Take a deep breath"));
        assert!(ctx.ends_with("mental health best practices."));
        assert_eq!(ctx, calm.prompt_context());
    }

    #[test]
    fn prompt_context_skips_empty_sections() {
        let mode = PersonalityMode {
            id: "night_owl".into(),
            name: "Night Owl".into(),
            description: "Quiet late-night company".into(),
            emoji: String::new(),
            role: ModeRole::Nurturing,
            communication_style: CommunicationStyle {
                tone: "hushed".into(),
                pace: "slow".into(),
                language: "simple".into(),
                approach: "present-focused".into(),
            },
            characteristics: Vec::new(),
            specialties: vec!["Insomnia".into()],
            sample_responses: Vec::new(),
        };
        let ctx = mode.prompt_context();
        assert!(ctx.starts_with("PERSONALITY MODE: Night Owl\n\nDESCRIPTION:"));
        assert!(!ctx.contains("KEY CHARACTERISTICS"));
        assert!(!ctx.contains("EXAMPLE RESPONSES"));
        assert!(ctx.contains("- Approach: present-focused\n\nSPECIALTIES:\n- Insomnia\n\nEmbody"));
        assert!(!ctx.contains("\n\n\n"));
    }

    #[test]
    fn toml_catalog_parses_and_validates() {
        let doc = r#"
[[modes]]
id = "night_owl"
name = "Night Owl"
description = "Quiet late-night company"
role = "nurturing"
specialties = ["Insomnia", "Rumination"]
[modes.communication_style]
tone = "hushed"
pace = "slow"
language = "simple"
approach = "present-focused"
"#;
        let catalog = ModeCatalog::from_toml_str(doc).unwrap();
        assert_eq!(catalog.len(), 1);
        let owl = catalog.get("night_owl").unwrap();
        assert_eq!(owl.role, ModeRole::Nurturing);
        assert!(owl.emoji.is_empty());
        assert!(owl.sample_responses.is_empty());
    }

    #[test]
    fn toml_catalog_rejects_duplicates_and_gaps() {
        let dup = r#"
[[modes]]
id = "a"
name = "A"
description = "first"
role = "practical"
specialties = ["x"]
communication_style = { tone = "t", pace = "p", language = "l", approach = "a" }

[[modes]]
id = "a"
name = "A again"
description = "second"
role = "playful"
specialties = ["y"]
communication_style = { tone = "t", pace = "p", language = "l", approach = "a" }
"#;
        assert!(matches!(
            ModeCatalog::from_toml_str(dup),
            Err(CoreError::InvalidCatalog(msg)) if msg.contains("duplicate")
        ));

        let no_specialties = r#"
[[modes]]
id = "b"
name = "B"
description = "lonely"
role = "practical"
specialties = []
communication_style = { tone = "t", pace = "p", language = "l", approach = "a" }
"#;
        assert!(matches!(
            ModeCatalog::from_toml_str(no_specialties),
            Err(CoreError::InvalidCatalog(_))
        ));
        assert!(matches!(
            ModeCatalog::from_toml_str(""),
            Err(CoreError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn load_from_path_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModeCatalog::load_from_path(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
