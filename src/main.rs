//! # formguard - command-line driver
//!
//! Fills one registration form from a TOML answers file, reports every
//! field's state, the progress bar and the strength meter, then submits the
//! form to the configured backend.
//!
//! ```text
//! formguard [config.toml] <answers.toml>
//! ```
//!
//! ## Author
//! a13x.h.cc@gmail.com

use formguard::controller::{FormMessage, Tone};
use formguard::remote::HttpRegistrationApi;
use formguard::sync::Marker;
use formguard::{Config, FieldId, FieldValue, FormController};
use std::collections::BTreeMap;
use std::env;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "formguard.toml";

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();
    let (config_path, answers_path) = match args.len() {
        2 => (None, &args[1]),
        3 => (Some(args[1].as_str()), &args[2]),
        _ => {
            eprintln!("Usage: formguard [config.toml] <answers.toml>");
            std::process::exit(2);
        }
    };

    let config = match load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("❌ Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("❌ Configuration validation failed: {}", e);
        std::process::exit(1);
    }

    init_logging(&config.logging.level);

    let answers = match load_answers(answers_path) {
        Ok(answers) => answers,
        Err(e) => {
            eprintln!("❌ Failed to load answers from {}: {}", answers_path, e);
            std::process::exit(1);
        }
    };

    let api = match HttpRegistrationApi::new(
        &config.api.base_url,
        config.check_timeout(),
        config.submit_timeout(),
    ) {
        Ok(api) => Arc::new(api),
        Err(e) => {
            eprintln!("❌ Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let mut form = match FormController::from_config(api, &config) {
        Ok(form) => form,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    println!("🌐 Backend: {}", config.api.base_url);
    for (field, value) in answers {
        form.input(field, value);
    }
    if !form
        .settle_username_check(config.debounce() + config.check_timeout())
        .await
    {
        eprintln!("⚠️  Username availability could not be confirmed");
    }

    print_form(&form);

    println!();
    println!("📨 Submitting...");
    match form.submit_and_wait().await {
        Ok(registered) => println!("✅ Registered: {}", registered.user),
        Err(e) => eprintln!("🚫 {}", e.display_message()),
    }
    if let Some(message) = form.message() {
        print_message(message);
    }
}

fn load_config(path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            println!("🔧 Loading configuration from: {}", path);
            Config::from_file(path)
        }
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            println!("🔧 Loading configuration from: {}", DEFAULT_CONFIG_PATH);
            Config::from_file(DEFAULT_CONFIG_PATH)
        }
        None => {
            println!("🔧 No configuration file, using defaults");
            Ok(Config::default())
        }
    }
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Parse the answers file into inputs, in form order
///
/// Strings fill text fields and booleans tick checkboxes.
fn load_answers(path: &str) -> Result<BTreeMap<FieldId, FieldValue>, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    let table: toml::Table = toml::from_str(&contents)?;

    let mut answers = BTreeMap::new();
    for (name, value) in table {
        let field: FieldId = name.parse()?;
        let value = match value {
            toml::Value::String(text) => FieldValue::Text(text),
            toml::Value::Boolean(checked) => FieldValue::Checked(checked),
            other => {
                return Err(format!(
                    "{}: expected a string or a boolean, got {}",
                    name,
                    other.type_str()
                )
                .into())
            }
        };
        answers.insert(field, value);
    }
    Ok(answers)
}

fn print_form(form: &FormController) {
    println!();
    println!("📋 Form");
    for field in form.state().fields() {
        let icon = match field.view.marker {
            Marker::Neutral => "  ",
            Marker::Valid => "✅",
            Marker::Invalid => "❌",
        };
        let required = if field.spec.required { "*" } else { " " };
        if field.view.error_text.is_empty() {
            println!("   {} {}{}", icon, field.id(), required);
        } else {
            println!("   {} {}{}  {}", icon, field.id(), required, field.view.error_text);
        }
    }

    let strength = form.strength();
    println!();
    println!("📊 Progress: {}%", form.progress_percent());
    println!(
        "🔐 {} ({}%, {})",
        strength,
        strength.meter_percent(),
        strength.color()
    );
    let control = form.submit_control();
    println!(
        "🔘 [{}] {}",
        control.label(),
        if control.enabled { "enabled" } else { "disabled" }
    );
}

fn print_message(message: &FormMessage) {
    let icon = match message.tone {
        Tone::Success => "✅",
        Tone::Error => "❌",
        Tone::Info => "ℹ️ ",
    };
    println!("{} {}", icon, message.text);
}
