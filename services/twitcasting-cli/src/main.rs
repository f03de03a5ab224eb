//! TwitCasting OAuth CLI
//!
//! Operator tool around `twitcasting-auth`:
//! 1. `authorize-url` prints the consent URL the user should open
//! 2. `exchange CODE` trades the code from the callback for an access token
//!
//! Command output is JSON on stdout; logs are JSON on stderr.

mod config;

use anyhow::{Context, Result, bail};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use twitcasting_auth::{TokenExchangeClient, generate_state};

use crate::config::Config;

const USAGE: &str = "usage: twitcasting-oauth [--config PATH] <authorize-url [--state STATE] | exchange CODE>";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    AuthorizeUrl { state: Option<String> },
    Exchange { code: String },
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    config_path: Option<String>,
    command: Command,
}

/// Parse `args` (without the program name).
fn parse_args(args: &[String]) -> Result<Args> {
    let mut config_path = None;
    let mut rest = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            let path = iter.next().context("--config requires a path")?;
            config_path = Some(path.clone());
        } else {
            rest.push(arg.as_str());
        }
    }

    let command = match rest.as_slice() {
        ["authorize-url"] => Command::AuthorizeUrl { state: None },
        ["authorize-url", "--state", state] => Command::AuthorizeUrl {
            state: Some((*state).to_owned()),
        },
        ["exchange", code] if !code.is_empty() => Command::Exchange {
            code: (*code).to_owned(),
        },
        _ => bail!("{USAGE}"),
    };

    Ok(Args {
        config_path,
        command,
    })
}

fn authorize_url(config: &Config, state: Option<String>) -> Result<serde_json::Value> {
    let grant = config.grant()?;
    let state = state.unwrap_or_else(generate_state);
    let url = grant.authorization_url(&config.app.base_url, &state)?;
    Ok(json!({ "url": url, "state": state }))
}

async fn exchange(config: &Config, code: &str) -> Result<serde_json::Value> {
    let grant = config.grant()?;
    let http = reqwest::Client::builder()
        .timeout(config.timeout())
        .build()
        .context("failed to build HTTP client")?;
    let client = TokenExchangeClient::from_reqwest(http).with_base_url(&config.app.base_url);

    let token = client
        .exchange_code(code, &grant)
        .await
        .context("authorization code exchange failed")?;

    Ok(json!({
        "access_token": token.token(),
        "expires_in": token.expires_in(),
    }))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&args)?;

    let config_path = Config::resolve_path(args.config_path.as_deref());
    info!(path = %config_path.display(), "loading configuration");
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;
    info!(
        client_id = %config.app.client_id,
        base_url = %config.app.base_url,
        "configuration loaded"
    );

    let output = match args.command {
        Command::AuthorizeUrl { state } => authorize_url(&config, state)?,
        Command::Exchange { code } => exchange(&config, &code).await?,
    };
    println!("{output}");
    Ok(())
}
