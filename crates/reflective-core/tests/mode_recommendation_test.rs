//! Integration test: mode catalog, session state, and recommender working together.
//!
//! ## Scenarios
//! 1. The built-in catalog holds the five modes in their fixed order, all fully described.
//! 2. A sad, negative user worried about work gets the calm coach with confidence 0.5.
//! 3. A positive user with no concerns gets the playful companion (3 vs 1).
//! 4. A TOML catalog with renamed ids keeps role-based scoring.
//! 5. Invalid catalogs are rejected with `InvalidCatalog`.
//! 6. Unknown mode ids never change the session and render the fallback prompt.

use reflective_core::{
    CoreError, ModeCatalog, ModeRecommender, ModeSession, Sentiment, Urgency, UserContext,
    FALLBACK_PROMPT_CONTEXT,
};
use std::io::Write;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn mode_toml(id: &str, name: &str, role: &str, specialty: &str) -> String {
    format!(
        r#"
[[modes]]
id = "{id}"
name = "{name}"
description = "{name} description"
role = "{role}"
specialties = ["{specialty}"]

[modes.communication_style]
tone = "warm"
pace = "steady"
language = "plain"
approach = "direct"
"#
    )
}

fn renamed_catalog() -> String {
    [
        mode_toml("soothe", "Soother", "nurturing", "Panic and worry"),
        mode_toml("spark", "Spark", "playful", "Fun"),
        mode_toml("sage", "Sage", "reflective", "Meaning"),
    ]
    .concat()
}

// ---------------------------------------------------------------------------
// Built-in catalog
// ---------------------------------------------------------------------------

#[test]
fn builtin_catalog_is_complete_and_ordered() {
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
    for mode in catalog.modes().values() {
        assert!(!mode.name.is_empty(), "{} has no name", mode.id);
        assert!(!mode.description.is_empty(), "{} has no description", mode.id);
        assert!(!mode.specialties.is_empty(), "{} has no specialties", mode.id);
    }
    assert!(Arc::ptr_eq(&catalog, &ModeCatalog::builtin()));
}

#[test]
fn sad_user_worried_about_work_gets_calm_coach() {
    let recommender = ModeRecommender::new(ModeCatalog::builtin());
    let ctx = UserContext::new()
        .with_mood("sad")
        .with_sentiment(Sentiment::Negative)
        .with_urgency(Urgency::Low)
        .with_concerns(["anxiety about work"]);

    let rec = recommender.recommend(&ctx);
    assert_eq!(rec.recommended_mode, "calm_coach");
    assert_eq!(rec.all_scores["calm_coach"], 4);
    assert_eq!(rec.all_scores["wise_mentor"], 2);
    assert_eq!(rec.all_scores["assertive_buddy"], 1);
    assert_eq!(rec.all_scores["practical_helper"], 1);
    assert_eq!(rec.all_scores["playful_companion"], 0);
    assert!((rec.confidence - 0.5).abs() < 1e-9);
    assert!(rec.reasoning.starts_with("Recommended Calm Coach because:"));
}

#[test]
fn positive_user_gets_playful_companion() {
    let recommender = ModeRecommender::new(ModeCatalog::builtin());
    let ctx = UserContext::new().with_sentiment(Sentiment::Positive);
    let rec = recommender.recommend(&ctx);
    assert_eq!(rec.recommended_mode, "playful_companion");
    assert_eq!(rec.all_scores["playful_companion"], 3);
    assert_eq!(rec.all_scores["practical_helper"], 1);
    assert!((rec.confidence - 0.75).abs() < 1e-9);

    // Same input, same answer.
    for _ in 0..5 {
        assert_eq!(recommender.recommend(&ctx), rec);
    }
}

// ---------------------------------------------------------------------------
// Custom catalogs
// ---------------------------------------------------------------------------

#[test]
fn custom_catalog_scores_by_role() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("modes.toml");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(renamed_catalog().as_bytes())
        .unwrap();

    let catalog = ModeCatalog::resolve(path.to_str()).unwrap();
    assert_eq!(catalog.ids(), vec!["soothe", "spark", "sage"]);

    let recommender = ModeRecommender::new(Arc::clone(&catalog));
    let crisis = UserContext::new()
        .with_sentiment(Sentiment::Negative)
        .with_urgency(Urgency::Crisis)
        .with_concerns(["panic"]);
    let rec = recommender.recommend(&crisis);
    assert_eq!(rec.recommended_mode, "soothe");
    assert_eq!(rec.all_scores["soothe"], 7);

    let check = recommender.validate_compatibility("spark", &crisis);
    assert!(!check.compatible);
    assert_eq!(check.suggested_alternative.as_deref(), Some("soothe"));

    // A session over a catalog without calm_coach starts in its first mode.
    let session = ModeSession::new(catalog);
    assert_eq!(session.current_mode(), "soothe");
}

#[test]
fn resolve_without_path_uses_builtin() {
    let catalog = ModeCatalog::resolve(None).unwrap();
    assert_eq!(catalog.len(), 5);
    assert_eq!(ModeCatalog::resolve(Some("  ")).unwrap().len(), 5);
    assert!(matches!(
        ModeCatalog::resolve(Some("/definitely/not/here.toml")),
        Err(CoreError::Io(_))
    ));
}

#[test]
fn invalid_catalogs_are_rejected() {
    let duplicate = [
        mode_toml("a", "A", "nurturing", "x"),
        mode_toml("a", "B", "playful", "y"),
    ]
    .concat();
    assert!(matches!(
        ModeCatalog::from_toml_str(&duplicate),
        Err(CoreError::InvalidCatalog(_))
    ));
    assert!(matches!(
        ModeCatalog::from_toml_str(""),
        Err(CoreError::InvalidCatalog(_))
    ));
    assert!(matches!(
        ModeCatalog::from_toml_str(&mode_toml("a", "A", "grumpy", "x")),
        Err(CoreError::TomlDe(_))
    ));
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[test]
fn unknown_modes_leave_session_untouched() {
    let mut session = ModeSession::new(ModeCatalog::builtin());
    assert!(!session.set_mode("nonexistent"));
    assert_eq!(session.current_mode(), "calm_coach");
    assert_eq!(session.render_prompt_context(Some("nonexistent")), FALLBACK_PROMPT_CONTEXT);
    assert!(matches!(
        session.mode_info(Some("nonexistent")),
        Err(CoreError::ModeNotFound(ref id)) if id == "nonexistent"
    ));

    assert!(session.set_mode("wise_mentor"));
    assert_eq!(session.current_mode(), "wise_mentor");
    assert!(session
        .render_prompt_context(None)
        .starts_with("PERSONALITY MODE: Wise Mentor"));
}
