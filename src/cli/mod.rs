use crate::{tools::AddressValidator, Agent, AgentConfig, YardCodeTool};
use anyhow::Context;
use clap::{Arg, ArgMatches, Command};
use std::time::Duration;
use tracing::info;

const BANNER: &str = "==================================================";

/// A canned demo conversation
struct Scenario {
    title: &'static str,
    blurb: &'static str,
    query: &'static str,
}

const SCENARIOS: [Scenario; 2] = [
    Scenario {
        title: "--- TEST CASE 1: Status Query (Dialogue Only) ---",
        blurb: "= This demonstrates the agent's basic CRM conversation =",
        query: "What is the status of my order 001?",
    },
    Scenario {
        title: "--- TEST CASE 2: Tool Call & Verification ---",
        blurb: "= This demonstrates the required YardCode API integration =",
        query: "I need to dispatch my order 002 now. Can you verify the delivery address and confirm?",
    },
];

fn command() -> Command {
    Command::new("ipatch")
        .version("0.1.0")
        .about("iPatch CRM agent demo: order status via OpenRouter, dispatch checks via YardCode")
        .arg(
            Arg::new("query")
                .help("Run a single query instead of the two demo scenarios")
                .index(1),
        )
        .arg(
            Arg::new("yardcode")
                .long("yardcode")
                .value_name("CODE")
                .help("Only check a YardCode against the validation API"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("The OpenRouter model to use (or set IPATCH_MODEL)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("OpenRouter base URL (or set OPENROUTER_BASE_URL)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .help("Completion request timeout in seconds")
                .default_value("45"),
        )
}

fn resolve_config(matches: &ArgMatches) -> anyhow::Result<AgentConfig> {
    let mut config = AgentConfig::from_env();

    if let Some(model) = matches.get_one::<String>("model") {
        config = config.with_model(model.as_str());
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(base_url.as_str());
    }
    if let Some(timeout) = matches.get_one::<String>("timeout") {
        let seconds: u64 = timeout
            .parse()
            .with_context(|| format!("invalid --timeout value '{timeout}'"))?;
        config = config.with_completion_timeout(Duration::from_secs(seconds));
    }

    Ok(config)
}

/// CLI entry point for the ipatch demo
pub async fn run() -> anyhow::Result<()> {
    // Load OPENROUTER_API_KEY and friends from a local .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let matches = command().get_matches();
    let config = resolve_config(&matches)?;

    if let Some(yard_code) = matches.get_one::<String>("yardcode") {
        let tool = YardCodeTool::from_config(&config)?;
        println!("--- Running YardCode Tool Check (Live Call) ---");
        let outcome = tool.validate(yard_code).await;
        println!("YardCode Input: {}", yard_code);
        println!("Tool Result: {}", outcome);
        return Ok(());
    }

    info!(model = %config.model, base_url = %config.base_url, "Starting agent");
    let agent = Agent::new(&config).context("failed to set up the agent")?;

    if let Some(query) = matches.get_one::<String>("query") {
        let reply = agent.run(query).await;
        println!("\nFinal Agent Response:\n{}", reply);
        return Ok(());
    }

    for scenario in &SCENARIOS {
        println!("\n{}", BANNER);
        println!("{}", scenario.title);
        println!("{}", scenario.blurb);
        println!("{}", BANNER);

        let reply = agent.run(scenario.query).await;
        println!("\nFinal Agent Response:\n{}", reply);
    }

    Ok(())
}
