use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, InquireError, Text};
use skysense_core::{ChatOutcome, Config, HttpChatBackend, classify, exchange};

const PLACEHOLDER: &str = "e.g. Pune, Mumbai, weather of Delhi";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skysense", version, about = "SkySense AI: ask weather by city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send one message and print the reply with its theme.
    Ask {
        message: String,

        /// Chat endpoint; overrides the configured one.
        #[arg(long, env = "SKYSENSE_ENDPOINT")]
        endpoint: Option<String>,

        /// Print the full outcome as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Interactive prompt; type `exit` or press Esc to leave.
    Chat {
        /// Chat endpoint; overrides the configured one.
        #[arg(long, env = "SKYSENSE_ENDPOINT")]
        endpoint: Option<String>,
    },

    /// Print the theme for a piece of text without contacting the service.
    Classify { text: String },

    /// Set the chat endpoint and request timeout.
    Configure,

    /// Print the location of the config file.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Ask { message, endpoint, json } => ask(&message, endpoint, json).await,
            Command::Chat { endpoint } => chat(endpoint).await,
            Command::Classify { text } => {
                println!("{}", classify(&text));
                Ok(())
            }
            Command::Configure => configure(),
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

fn backend(endpoint: Option<String>) -> anyhow::Result<HttpChatBackend> {
    let cfg = Config::load()?.with_endpoint_override(endpoint);
    HttpChatBackend::from_config(&cfg)
}

async fn ask(message: &str, endpoint: Option<String>, json: bool) -> anyhow::Result<()> {
    if message.trim().is_empty() {
        println!("Nothing to send: message is empty.");
        return Ok(());
    }

    let backend = backend(endpoint)?;

    let Some(outcome) = exchange(&backend, message).await else {
        return Ok(());
    };

    if json {
        let out =
            serde_json::to_string_pretty(&outcome).context("Failed to serialize outcome")?;
        println!("{out}");
    } else {
        println!("{}", render(&outcome));
    }

    Ok(())
}

async fn chat(endpoint: Option<String>) -> anyhow::Result<()> {
    let backend = backend(endpoint)?;
    tracing::info!(endpoint = backend.endpoint(), "starting chat");

    println!("SkySense AI");
    println!("Ask weather by city. Type `exit` to quit.\n");

    loop {
        let prompt = Text::new("You:").with_placeholder(PLACEHOLDER).prompt();

        let input = match chat_action(prompt)? {
            ChatAction::Skip => continue,
            ChatAction::Quit => break,
            ChatAction::Send(input) => input,
        };

        println!("Loading...");
        if let Some(outcome) = exchange(&backend, &input).await {
            println!("{}\n", render(&outcome));
        }
    }

    Ok(())
}

/// What the chat loop does with one prompt result.
#[derive(Debug, PartialEq, Eq)]
enum ChatAction {
    Skip,
    Quit,
    Send(String),
}

fn chat_action(prompt: Result<String, InquireError>) -> anyhow::Result<ChatAction> {
    let input = match prompt {
        Ok(input) => input,
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            return Ok(ChatAction::Quit);
        }
        Err(e) => return Err(e).context("Failed to read input"),
    };

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(ChatAction::Skip);
    }
    if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
        return Ok(ChatAction::Quit);
    }

    Ok(ChatAction::Send(input))
}

fn configure() -> anyhow::Result<()> {
    let current = config_for_edit(Config::load());

    let endpoint = Text::new("Chat endpoint:")
        .with_default(&current.endpoint)
        .prompt()
        .context("Failed to read endpoint")?;

    let timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(current.timeout_secs)
        .with_error_message("Please enter a whole number of seconds")
        .prompt()
        .context("Failed to read timeout")?;

    let cfg = build_config(&endpoint, timeout_secs)?;

    let path = cfg.save()?;
    println!("Saved configuration to {}", path.display());
    println!("Endpoint: {} (timeout {}s)", cfg.endpoint, cfg.timeout_secs);

    Ok(())
}

/// A broken file must not stop the command that rewrites it.
fn config_for_edit(loaded: anyhow::Result<Config>) -> Config {
    loaded.unwrap_or_else(|err| {
        tracing::warn!("ignoring unreadable config, starting from defaults: {err:#}");
        Config::default()
    })
}

fn build_config(endpoint: &str, timeout_secs: u64) -> anyhow::Result<Config> {
    let cfg = Config { endpoint: endpoint.trim().to_string(), timeout_secs };
    cfg.validate()?;
    Ok(cfg)
}

/// One line per reply: theme glyph, label, then the reply text.
fn render(outcome: &ChatOutcome) -> String {
    format!("{} [{}] {}", outcome.theme.glyph(), outcome.theme, outcome.reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use skysense_core::ThemeLabel;

    fn outcome(reply: &str, theme: ThemeLabel) -> ChatOutcome {
        ChatOutcome { reply: reply.to_string(), theme, received_at: Utc::now(), fallback: false }
    }

    #[test]
    fn render_shows_glyph_label_and_reply() {
        let o = outcome("It's 30°C in Pune with clear sky.", ThemeLabel::Clear);
        assert_eq!(render(&o), "☀ [clear] It's 30°C in Pune with clear sky.");
    }

    #[test]
    fn render_fallback_uses_default_theme() {
        let o = outcome(skysense_core::FALLBACK_REPLY, ThemeLabel::Default);
        assert_eq!(render(&o), "· [default] Unable to connect to backend.");
    }

    #[test]
    fn chat_action_skips_blank_input() {
        for input in ["", "   ", "\t\n"] {
            let action = chat_action(Ok(input.to_string())).unwrap();
            assert_eq!(action, ChatAction::Skip, "input: {input:?}");
        }
    }

    #[test]
    fn chat_action_quits_on_exit_words_any_case() {
        for input in ["exit", "QUIT", "  Exit  ", "quit\n"] {
            let action = chat_action(Ok(input.to_string())).unwrap();
            assert_eq!(action, ChatAction::Quit, "input: {input:?}");
        }
    }

    #[test]
    fn chat_action_quits_on_escape_and_ctrl_c() {
        assert_eq!(chat_action(Err(InquireError::OperationCanceled)).unwrap(), ChatAction::Quit);
        assert_eq!(
            chat_action(Err(InquireError::OperationInterrupted)).unwrap(),
            ChatAction::Quit
        );
    }

    #[test]
    fn chat_action_propagates_other_prompt_errors() {
        let err = chat_action(Err(InquireError::NotTTY)).unwrap_err();
        assert!(err.to_string().contains("Failed to read input"));
    }

    #[test]
    fn chat_action_sends_input_untrimmed() {
        let action = chat_action(Ok("  weather of Delhi ".to_string())).unwrap();
        assert_eq!(action, ChatAction::Send("  weather of Delhi ".to_string()));

        let action = chat_action(Ok("exit now".to_string())).unwrap();
        assert_eq!(action, ChatAction::Send("exit now".to_string()));
    }

    #[test]
    fn build_config_trims_endpoint() {
        let cfg = build_config("  https://chat.example.com/api/chat \n", 10).unwrap();
        assert_eq!(cfg.endpoint, "https://chat.example.com/api/chat");
        assert_eq!(cfg.timeout_secs, 10);
    }

    #[test]
    fn build_config_rejects_invalid_values() {
        let err = build_config("ftp://example.com/chat", 10).unwrap_err();
        assert!(err.to_string().contains("Invalid endpoint"));

        let err = build_config("http://127.0.0.1:8000/api/chat", 0).unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn config_for_edit_recovers_from_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "endpoint = [not toml").unwrap();

        let cfg = config_for_edit(Config::load_from(&path));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn config_for_edit_keeps_loaded_values() {
        let saved = Config { endpoint: "https://chat.example.com/api/chat".into(), timeout_secs: 7 };
        assert_eq!(config_for_edit(Ok(saved.clone())), saved);
    }

    #[test]
    fn verbosity_counts_repeated_flags() {
        let cli = Cli::parse_from(["skysense", "-vv", "classify", "snow"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Classify { .. }));
    }
}
