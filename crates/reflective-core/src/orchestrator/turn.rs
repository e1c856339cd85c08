//! One chat turn: message -> sentiment -> context -> recommendation -> guardrail -> prompt.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::{UserConfig, WellnessConfig};
use crate::crisis::crisis_message;
use crate::memory::{ConversationMemory, Speaker, UserFacts, DEFAULT_MAX_MESSAGES};
use crate::modes::{
    CompatibilityCheck, ModeCatalog, ModeRecommendation, ModeRecommender, ModeSession, UserContext,
};
use crate::sentiment::{SentimentAnalyzer, SentimentResult};

const DEFAULT_MAX_CONCERNS: usize = 8;

// ---------------------------------------------------------------------------
// Chat commands
// ---------------------------------------------------------------------------

/// A `#` command typed into the chat box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ChatCommand {
    /// `#mood <value> [note]`
    Mood { value: String, note: String },
    /// `#sos [text]`
    Sos { text: String },
    /// `#mode <id>`
    Mode { id: String },
    /// `#modes`, or `#mode` without an id.
    Modes,
    /// `#reflect <text>`
    Reflect { text: String },
    /// `#todo <title>`
    Todo { title: String },
    /// `#remember <text>`
    Remember { text: String },
    /// `#show`: stored profile, reflections, and memories.
    Show,
    Unknown { name: String },
}

impl ChatCommand {
    /// `None` unless the trimmed message starts with `#`. Command names are case-insensitive.
    pub fn parse(message: &str) -> Option<Self> {
        let rest = message.trim().strip_prefix('#')?;
        let (name, args) = match rest.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (rest, ""),
        };
        let cmd = match name.to_lowercase().as_str() {
            "mood" => {
                let (value, note) = match args.split_once(char::is_whitespace) {
                    Some((value, note)) => (value, note.trim()),
                    None => (args, ""),
                };
                ChatCommand::Mood {
                    value: value.to_string(),
                    note: note.to_string(),
                }
            }
            "sos" => ChatCommand::Sos {
                text: args.to_string(),
            },
            "mode" if !args.is_empty() => ChatCommand::Mode {
                id: args.to_string(),
            },
            "mode" | "modes" => ChatCommand::Modes,
            "reflect" => ChatCommand::Reflect {
                text: args.to_string(),
            },
            "todo" => ChatCommand::Todo {
                title: args.to_string(),
            },
            "remember" => ChatCommand::Remember {
                text: args.to_string(),
            },
            "show" => ChatCommand::Show,
            other => ChatCommand::Unknown {
                name: other.to_string(),
            },
        };
        Some(cmd)
    }
}

// ---------------------------------------------------------------------------
// Turn plan
// ---------------------------------------------------------------------------

/// Everything the reply generator needs for one user message.
#[derive(Debug, Clone, Serialize)]
pub struct TurnPlan {
    pub sentiment: SentimentResult,
    pub context: UserContext,
    pub recommendation: ModeRecommendation,
    /// Mode the session was in before this turn.
    pub previous_mode: String,
    /// Mode the reply should be written in.
    pub active_mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition_message: Option<String>,
    pub prompt_context: String,
    /// Set when the guardrail rejected the mode the session would otherwise use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardrail: Option<CompatibilityCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crisis_resources: Option<String>,
    /// Reply language from the user's config.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Conversation memory, present when the turn was planned with one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<TurnMemory>,
}

/// What the reply generator should know from the user's memory.
#[derive(Debug, Clone, Serialize)]
pub struct TurnMemory {
    /// Recent exchange before this message, `Human: ...` / `AI: ...` lines.
    pub recent_context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// Facts stated in this message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learned: Option<UserFacts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_feedback: Option<String>,
}

impl TurnPlan {
    pub fn mode_changed(&self) -> bool {
        self.previous_mode != self.active_mode
    }
}

/// Plans chat turns against a shared catalog. Sessions are passed in per call.
#[derive(Debug, Clone)]
pub struct TurnCoordinator {
    wellness: WellnessConfig,
    user: UserConfig,
    analyzer: SentimentAnalyzer,
    recommender: ModeRecommender,
    max_concerns: usize,
    max_history: usize,
}

impl TurnCoordinator {
    pub fn new(catalog: Arc<ModeCatalog>, wellness: WellnessConfig, user: UserConfig) -> Self {
        Self {
            wellness,
            user,
            analyzer: SentimentAnalyzer::new(),
            recommender: ModeRecommender::new(catalog),
            max_concerns: DEFAULT_MAX_CONCERNS,
            max_history: DEFAULT_MAX_MESSAGES,
        }
    }

    /// Keep at most `max` concerns per turn (the most recent ones). Zero disables the cap.
    pub fn with_max_concerns(mut self, max: usize) -> Self {
        self.max_concerns = max;
        self
    }

    /// Short-term buffer size for memories made by [`TurnCoordinator::new_memory`].
    pub fn with_max_history(mut self, max: usize) -> Self {
        self.max_history = max;
        self
    }

    pub fn catalog(&self) -> &Arc<ModeCatalog> {
        self.recommender.catalog()
    }

    pub fn wellness(&self) -> &WellnessConfig {
        &self.wellness
    }

    pub fn user(&self) -> &UserConfig {
        &self.user
    }

    pub fn analyzer(&self) -> &SentimentAnalyzer {
        &self.analyzer
    }

    pub fn recommender(&self) -> &ModeRecommender {
        &self.recommender
    }

    /// Fresh session in the configured default mode.
    pub fn new_session(&self) -> ModeSession {
        ModeSession::with_default(Arc::clone(self.catalog()), &self.wellness.default_mode)
    }

    pub fn new_memory(&self) -> ConversationMemory {
        ConversationMemory::with_max_messages(self.max_history)
    }

    /// User context for `sentiment` plus the caller's concerns and the user's preferred style.
    pub fn build_context(&self, sentiment: &SentimentResult, concerns: &[String]) -> UserContext {
        let skip = if self.max_concerns == 0 {
            0
        } else {
            concerns.len().saturating_sub(self.max_concerns)
        };
        let ctx = UserContext::from_sentiment(sentiment).with_concerns(concerns[skip..].iter().cloned());
        match self.user.preferred_style() {
            Some(style) => ctx.with_preferred_style(style),
            None => ctx,
        }
    }

    /// Plan the reply to `message`, switching `session` when the configuration allows it.
    pub fn plan_turn(
        &self,
        session: &mut ModeSession,
        message: &str,
        concerns: &[String],
    ) -> TurnPlan {
        let sentiment = self.analyzer.analyze(message);
        let context = self.build_context(&sentiment, concerns);
        let recommendation = self.recommender.recommend(&context);
        let previous_mode = session.current_mode().to_string();

        if self.wellness.auto_switch && recommendation.recommended_mode != previous_mode {
            let check = self
                .recommender
                .validate_compatibility(&recommendation.recommended_mode, &context);
            if check.compatible {
                session.set_mode(&recommendation.recommended_mode);
            } else {
                tracing::debug!(
                    target: "reflective::turn",
                    mode = %recommendation.recommended_mode,
                    reason = %check.reason,
                    "Recommendation not applied"
                );
            }
        }

        let mut guardrail = None;
        if self.wellness.crisis_guardrail {
            let check = self
                .recommender
                .validate_compatibility(session.current_mode(), &context);
            if !check.compatible {
                let unsafe_mode = session.current_mode().to_string();
                let moved = check
                    .suggested_alternative
                    .as_deref()
                    .is_some_and(|alt| session.set_mode(alt));
                if moved {
                    tracing::warn!(
                        target: "reflective::turn",
                        from = %unsafe_mode,
                        to = session.current_mode(),
                        "Guardrail moved session off unsafe mode"
                    );
                } else {
                    tracing::error!(
                        target: "reflective::turn",
                        mode = %unsafe_mode,
                        "Guardrail found no safe mode in the catalog"
                    );
                }
                guardrail = Some(check);
            }
        }

        let active_mode = session.current_mode().to_string();
        let transition_message = (active_mode != previous_mode)
            .then(|| session.transition_message(&previous_mode, &active_mode));
        let crisis_resources = if self.wellness.crisis_resources_enabled {
            crisis_message(&sentiment)
        } else {
            None
        };

        tracing::info!(
            target: "reflective::turn",
            sentiment = sentiment.overall_sentiment.as_str(),
            urgency = sentiment.urgency_level.as_str(),
            recommended = %recommendation.recommended_mode,
            active = %active_mode,
            crisis = crisis_resources.is_some(),
            "Turn planned"
        );

        TurnPlan {
            prompt_context: session.render_prompt_context(None),
            sentiment,
            context,
            recommendation,
            previous_mode,
            active_mode,
            transition_message,
            guardrail,
            crisis_resources,
            language: self.user.language.clone(),
            memory: None,
        }
    }

    /// [`TurnCoordinator::plan_turn`], also learning facts from `message` and recording it in
    /// `memory`. The plan carries the context from before this message.
    pub fn plan_turn_with_memory(
        &self,
        session: &mut ModeSession,
        memory: &mut ConversationMemory,
        message: &str,
        concerns: &[String],
    ) -> TurnPlan {
        let recent_context = memory.short_term_context();
        let learned = memory.learn_from_message(message);
        memory.add_message(Speaker::Human, message);

        let mut plan = self.plan_turn(session, message, concerns);
        plan.memory = Some(TurnMemory {
            recent_context,
            user_name: memory
                .profile()
                .name
                .clone()
                .or_else(|| self.user.user_name.clone()),
            memory_feedback: learned.feedback(),
            learned: (!learned.is_empty()).then_some(learned),
        });
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinator(wellness: WellnessConfig) -> TurnCoordinator {
        TurnCoordinator::new(ModeCatalog::builtin(), wellness, UserConfig::default())
    }

    #[test]
    fn parses_commands() {
        assert_eq!(ChatCommand::parse("hello"), None);
        assert_eq!(
            ChatCommand::parse("#mood 7 slept well today"),
            Some(ChatCommand::Mood {
                value: "7".into(),
                note: "slept well today".into()
            })
        );
        assert_eq!(
            ChatCommand::parse("  #MOOD good"),
            Some(ChatCommand::Mood {
                value: "good".into(),
                note: String::new()
            })
        );
        assert_eq!(
            ChatCommand::parse("#sos I can't do this"),
            Some(ChatCommand::Sos {
                text: "I can't do this".into()
            })
        );
        assert_eq!(ChatCommand::parse("#sos"), Some(ChatCommand::Sos { text: String::new() }));
        assert_eq!(
            ChatCommand::parse("#mode wise_mentor"),
            Some(ChatCommand::Mode {
                id: "wise_mentor".into()
            })
        );
        assert_eq!(ChatCommand::parse("#mode"), Some(ChatCommand::Modes));
        assert_eq!(ChatCommand::parse("#modes"), Some(ChatCommand::Modes));
        assert_eq!(
            ChatCommand::parse("#todo buy milk"),
            Some(ChatCommand::Todo {
                title: "buy milk".into()
            })
        );
        assert_eq!(
            ChatCommand::parse("#Reflect walks help"),
            Some(ChatCommand::Reflect {
                text: "walks help".into()
            })
        );
        assert_eq!(
            ChatCommand::parse("#remember exam on friday"),
            Some(ChatCommand::Remember {
                text: "exam on friday".into()
            })
        );
        assert_eq!(ChatCommand::parse("#show"), Some(ChatCommand::Show));
        assert_eq!(
            ChatCommand::parse("#dance now"),
            Some(ChatCommand::Unknown { name: "dance".into() })
        );
    }

    #[test]
    fn command_serializes_with_tag() {
        let json = serde_json::to_value(ChatCommand::Mode { id: "x".into() }).unwrap();
        assert_eq!(json["command"], "mode");
        assert_eq!(json["id"], "x");
    }

    #[test]
    fn auto_switch_follows_recommendation() {
        let c = coordinator(WellnessConfig::default());
        let mut session = c.new_session();
        let plan = c.plan_turn(&mut session, "I am so happy and excited today!", &[]);
        assert_eq!(plan.recommendation.recommended_mode, "playful_companion");
        assert_eq!(plan.active_mode, "playful_companion");
        assert_eq!(plan.previous_mode, "calm_coach");
        assert!(plan.mode_changed());
        assert!(plan
            .transition_message
            .as_deref()
            .unwrap()
            .starts_with("Transitioning from Calm Coach"));
        assert!(plan.prompt_context.contains("Playful Companion"));
        assert!(plan.crisis_resources.is_none());
        assert_eq!(session.current_mode(), "playful_companion");
    }

    #[test]
    fn without_auto_switch_session_stays_put() {
        let c = coordinator(WellnessConfig {
            auto_switch: false,
            ..WellnessConfig::default()
        });
        let mut session = c.new_session();
        let plan = c.plan_turn(&mut session, "I am so happy and excited today!", &[]);
        assert_eq!(plan.recommendation.recommended_mode, "playful_companion");
        assert_eq!(plan.active_mode, "calm_coach");
        assert!(plan.transition_message.is_none());
    }

    #[test]
    fn guardrail_moves_off_playful_during_crisis() {
        let c = coordinator(WellnessConfig {
            auto_switch: false,
            ..WellnessConfig::default()
        });
        let mut session = c.new_session();
        assert!(session.set_mode("playful_companion"));
        let plan = c.plan_turn(&mut session, "I want to end it all", &[]);
        assert_eq!(plan.sentiment.urgency_level, crate::sentiment::Urgency::Crisis);
        let check = plan.guardrail.as_ref().unwrap();
        assert!(!check.compatible);
        assert_eq!(plan.active_mode, "calm_coach");
        assert!(plan.transition_message.is_some());
        assert!(plan.crisis_resources.as_deref().unwrap().contains("988"));
    }

    #[test]
    fn guardrail_and_resources_can_be_disabled() {
        let c = coordinator(WellnessConfig {
            auto_switch: false,
            crisis_guardrail: false,
            crisis_resources_enabled: false,
            ..WellnessConfig::default()
        });
        let mut session = c.new_session();
        session.set_mode("playful_companion");
        let plan = c.plan_turn(&mut session, "I want to end it all", &[]);
        assert!(plan.guardrail.is_none());
        assert_eq!(plan.active_mode, "playful_companion");
        assert!(plan.crisis_resources.is_none());
    }

    #[test]
    fn concerns_are_capped_to_most_recent() {
        let c = coordinator(WellnessConfig::default()).with_max_concerns(2);
        let concerns: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let ctx = c.build_context(&SentimentResult::empty(), &concerns);
        assert_eq!(ctx.concerns, vec!["b", "c"]);

        let uncapped = c.with_max_concerns(0).build_context(&SentimentResult::empty(), &concerns);
        assert_eq!(uncapped.concerns.len(), 3);
    }

    #[test]
    fn memory_carries_history_and_learned_facts() {
        let c = coordinator(WellnessConfig::default()).with_max_history(4);
        let mut session = c.new_session();
        let mut memory = c.new_memory();

        let plan = c.plan_turn_with_memory(&mut session, &mut memory, "Hi, my name is Sam", &[]);
        let turn = plan.memory.as_ref().unwrap();
        assert_eq!(turn.recent_context, "");
        assert_eq!(turn.user_name.as_deref(), Some("Sam"));
        assert_eq!(turn.learned.as_ref().unwrap().name.as_deref(), Some("Sam"));
        assert!(turn.memory_feedback.as_deref().unwrap().contains("your name is Sam"));

        memory.add_message(Speaker::Ai, "Nice to meet you, Sam.");
        let plan = c.plan_turn_with_memory(&mut session, &mut memory, "I feel a bit tired", &[]);
        let turn = plan.memory.as_ref().unwrap();
        assert_eq!(turn.recent_context, "Human: Hi, my name is Sam\nAI: Nice to meet you, Sam.");
        assert!(turn.learned.is_none());
        assert!(turn.memory_feedback.is_none());
        assert_eq!(memory.stats().short_term_messages, 3);
        assert_eq!(memory.stats().max_messages, 4);

        assert!(c.plan_turn(&mut session, "ok", &[]).memory.is_none());
    }

    #[test]
    fn preferred_style_comes_from_user_config() {
        let user = UserConfig {
            preferred_style: Some("Wise".into()),
            ..UserConfig::default()
        };
        let c = TurnCoordinator::new(ModeCatalog::builtin(), WellnessConfig::default(), user);
        let ctx = c.build_context(&SentimentResult::empty(), &[]);
        assert_eq!(ctx.preferred_style.as_deref(), Some("Wise"));
    }
}
