//! Reflective chat console.
//!
//! Reads one message per stdin line and prints one JSON object per line on stdout:
//! - plain text and `#` commands go through the `chat_turn` skill;
//! - `/<skill> [json]` dispatches any registered skill directly (e.g. `/mood_analytics {"days":30}`);
//! - `/quit` exits.
//!
//! Logs go to stderr so stdout stays machine-readable.

use reflective_core::{
    CoreConfig, ModeCatalog, TenantContext, TurnCoordinator, UserConfig, WellnessConfig,
};
use reflective_skills::{wellness_registry, SessionStore, SkillRegistry};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_TENANT: &str = "local";

/// One parsed input line.
#[derive(Debug, PartialEq)]
enum Input {
    Chat(String),
    Skill { name: String, payload: Option<Value> },
    Quit,
    Empty,
}

fn parse_line(line: &str) -> Result<Input, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Input::Empty);
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Input::Chat(line.to_string()));
    };
    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };
    if name == "quit" || name == "exit" {
        return Ok(Input::Quit);
    }
    let payload = if args.is_empty() {
        None
    } else {
        Some(serde_json::from_str(args)?)
    };
    Ok(Input::Skill {
        name: name.to_string(),
        payload,
    })
}

fn build_registry() -> Result<SkillRegistry, Box<dyn std::error::Error + Send + Sync>> {
    let core = CoreConfig::load()?;
    let wellness = WellnessConfig::from_env();
    let user = UserConfig::load_from_path(Path::new(&core.user_config_path))?;
    let modes_path = wellness.modes_path.clone().or_else(|| core.modes_path.clone());
    let catalog = ModeCatalog::resolve(modes_path.as_deref())?;

    tracing::info!(
        app = %core.app_name,
        modes = catalog.len(),
        default_mode = %wellness.default_mode,
        auto_switch = wellness.auto_switch,
        "Reflective console started"
    );

    let coordinator = TurnCoordinator::new(catalog, wellness, user)
        .with_max_concerns(core.max_concerns)
        .with_max_history(core.max_history);
    let store = Arc::new(SessionStore::new(Arc::new(coordinator)));
    Ok(wellness_registry(store))
}

async fn handle(registry: &SkillRegistry, ctx: &TenantContext, input: Input) -> Value {
    let result = match input {
        Input::Chat(message) => {
            registry
                .dispatch(ctx, "chat_turn", Some(json!({ "message": message })))
                .await
        }
        Input::Skill { name, payload } => registry.dispatch(ctx, &name, payload).await,
        Input::Quit | Input::Empty => return Value::Null,
    };
    result.unwrap_or_else(|e| json!({ "status": "error", "error": e.to_string() }))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[reflective-cli] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let registry = build_registry()?;
    let tenant = std::env::var("REFLECTIVE_TENANT").unwrap_or_else(|_| DEFAULT_TENANT.to_string());
    let ctx = TenantContext::new(tenant);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = match parse_line(&line) {
                    Ok(Input::Quit) => break,
                    Ok(Input::Empty) => continue,
                    Ok(input) => input,
                    Err(e) => {
                        println!("{}", json!({ "status": "error", "error": format!("invalid JSON payload: {}", e) }));
                        continue;
                    }
                };
                println!("{}", handle(&registry, &ctx, input).await);
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("CTRL-C received; shutting down console");
                break;
            }
        }
    }
    Ok(())
}
