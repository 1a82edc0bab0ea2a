//! Wiki Lockdown
//!
//! Evaluates lockdown decisions from the command line against a
//! configuration file.

use clap::{Args, Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use wiki_lockdown::{
    access_control::{Decision, GroupSet, LockdownEvaluator},
    config::{LogFormat, LoggingConfig, load_config},
    hooks::LockdownHooks,
    message::{DenialMessage, PlainFormatter, PlainGroupLinker},
    page::{Namespace, Title},
};

/// Wiki Lockdown - group-based access restrictions for wiki pages
#[derive(Parser, Debug)]
#[command(name = "wiki-lockdown")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "WIKI_LOCKDOWN_CONFIG", global = true)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error); overrides logging.level
    #[arg(long, env = "WIKI_LOCKDOWN_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check an action on a page (e.g. "Help:Contents", "Special:Export")
    Check {
        /// Prefixed page name
        #[arg(short, long)]
        title: String,

        /// Action name
        #[arg(short, long, default_value = "read")]
        action: String,

        #[command(flatten)]
        requester: Requester,
    },

    /// Check access to a special page
    Special {
        /// Special page key, optionally with a parameter ("Export/Main_Page")
        page: String,

        #[command(flatten)]
        requester: Requester,
    },

    /// Run the dispatched-action gate
    Action {
        /// Action name
        action: String,

        #[command(flatten)]
        requester: Requester,
    },

    /// Show which namespaces the requester may search
    Search {
        /// Candidate namespaces (ids or names); defaults to all content and talk namespaces
        #[arg(short, long = "namespace")]
        namespaces: Vec<String>,

        /// Prefixed title of a near-match hit to filter
        #[arg(long)]
        near_match: Option<String>,

        #[command(flatten)]
        requester: Requester,
    },
}

/// Who is asking
#[derive(Args, Debug)]
struct Requester {
    /// Explicit group membership (repeatable); "*" and "user" are implied
    #[arg(short, long = "group")]
    groups: Vec<String>,

    /// Treat the requester as an anonymous visitor
    #[arg(long, conflicts_with = "groups")]
    anonymous: bool,
}

impl Requester {
    fn group_set(&self) -> GroupSet {
        if self.anonymous {
            GroupSet::anonymous()
        } else {
            GroupSet::logged_in(self.groups.iter().cloned())
        }
    }
}

fn init_logging(logging: &LoggingConfig, override_level: Option<&str>) {
    let level = override_level.unwrap_or(logging.level.as_str());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match logging.format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init(),
    }
}

fn print_decision(decision: &Decision, json: bool) -> anyhow::Result<ExitCode> {
    if json {
        println!("{}", serde_json::to_string_pretty(decision)?);
    } else {
        match decision.denial() {
            None => println!("allow"),
            Some(message) => println!("deny: {}", render(&message)),
        }
    }
    Ok(if decision.is_allowed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn render(message: &DenialMessage) -> String {
    message.render(&PlainFormatter, &PlainGroupLinker)
}

fn default_search_namespaces() -> Vec<Namespace> {
    Namespace::builtin()
        .iter()
        .map(|(ns, _)| *ns)
        .filter(|ns| ns.id() >= 0)
        .collect()
}

fn main() -> anyhow::Result<ExitCode> {
    // A missing .env file is not an error
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    init_logging(&config.logging, cli.log_level.as_deref());

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Loaded lockdown configuration"
    );

    let evaluator = Arc::new(
        LockdownEvaluator::new(&config.lockdown)
            .inspect_err(|e| error!(error = %e, "Failed to build lockdown tables"))?,
    );
    let hooks = LockdownHooks::new(evaluator.clone());
    let names = evaluator.names();

    match cli.command {
        Command::Check {
            title,
            action,
            requester,
        } => {
            let page = Title::parse(&title, names);
            let decision = evaluator.resolve(&page, &action, &requester.group_set());
            print_decision(&decision, cli.json)
        }
        Command::Special { page, requester } => {
            let decision = evaluator.resolve_special_page(&page, &requester.group_set());
            print_decision(&decision, cli.json)
        }
        Command::Action { action, requester } => {
            match hooks.perform_action(&action, &requester.group_set()) {
                Ok(()) => print_decision(&Decision::Allow, cli.json),
                Err(e) => {
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&e.message)?);
                    } else {
                        eprintln!("{}", e);
                        println!("deny: {}", render(&e.message));
                    }
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Search {
            namespaces,
            near_match,
            requester,
        } => {
            let groups = requester.group_set();
            let mut candidates = if namespaces.is_empty() {
                default_search_namespaces()
            } else {
                namespaces
                    .iter()
                    .map(|n| {
                        names
                            .parse(n)
                            .ok_or_else(|| anyhow::anyhow!("Unknown namespace: {}", n))
                    })
                    .collect::<anyhow::Result<Vec<_>>>()?
            };
            hooks.searchable_namespaces(&mut candidates, &groups);

            let mut near = near_match.map(|t| Title::parse(&t, names));
            hooks.search_get_near_match_complete(&mut near, &groups);

            if cli.json {
                let output = serde_json::json!({
                    "namespaces": candidates,
                    "near_match": near.as_ref().map(|t| t.prefixed_text(names)),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                for ns in &candidates {
                    match names.name(*ns) {
                        Some("") => println!("{}\t(main)", ns),
                        Some(name) => println!("{}\t{}", ns, name),
                        None => println!("{}", ns),
                    }
                }
                if let Some(title) = &near {
                    println!("near match: {}", title.prefixed_text(names));
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
