//! rb-admin - inspect access policy and session state
//!
//! Answers the same questions the dashboard asks before rendering navigation
//! or enabling an action, for a given department and role.

#![allow(missing_docs)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use rb_admin_core::auth::rbac::AccessDecision;
use rb_admin_core::utils::logging::init_logging;
use rb_admin_core::{AccessPolicy, ApiClient, Config, Department, HttpMethod, Role, Session};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "rb-admin", version, about = "Inspect admin dashboard access policy")]
struct Cli {
    /// YAML configuration file; environment variables are used when absent
    #[arg(short, long, env = "RB_ADMIN_CONFIG")]
    config: Option<PathBuf>,

    /// Policy file overriding the configured one
    #[arg(long)]
    policy: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check whether a navigation path is visible
    Access {
        path: String,
        #[arg(short, long)]
        department: Option<Department>,
        #[arg(short, long)]
        role: Option<Role>,
    },
    /// Check whether a method may be used on a feature
    Method {
        feature: String,
        method: HttpMethod,
        #[arg(short, long)]
        department: Option<Department>,
        #[arg(short, long)]
        role: Option<Role>,
    },
    /// List visible paths and permitted methods
    Features {
        #[arg(short, long)]
        department: Option<Department>,
        #[arg(short, long)]
        role: Option<Role>,
    },
    /// Show the current user
    Whoami {
        /// Access token to fetch a fresh profile with
        #[arg(long, env = "RB_ADMIN_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns `false` when the checked access is denied
async fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path).await?,
        None => Config::from_env()?,
    };
    if let Some(policy) = cli.policy {
        config.policy_file = Some(policy);
    }
    config.validate()?;

    init_logging(&config.logging)?;

    let policy = rb_admin_core::load_policy(&config)
        .await
        .context("Failed to load access policy")?;

    match cli.command {
        Command::Access {
            path,
            department,
            role,
        } => {
            let decision = policy.check_feature_detailed(&path, department, role);
            Ok(report(&format!("{} visible", path), &decision))
        }
        Command::Method {
            feature,
            method,
            department,
            role,
        } => {
            let decision = policy.check_method_detailed(&feature, method, department, role);
            Ok(report(&format!("{} {}", method, feature), &decision))
        }
        Command::Features { department, role } => {
            print_features(&policy, department, role);
            Ok(true)
        }
        Command::Whoami { token } => whoami(config, policy, token).await,
    }
}

fn report(subject: &str, decision: &AccessDecision) -> bool {
    match &decision.denial_reason {
        None if decision.granted => println!("{}: allowed", subject),
        Some(reason) => println!("{}: denied ({})", subject, reason),
        None => println!("{}: denied", subject),
    }
    decision.granted
}

fn print_features(policy: &AccessPolicy, department: Option<Department>, role: Option<Role>) {
    println!("Visible paths:");
    for path in policy.visible_paths(department, role) {
        println!("  {}", path);
    }

    println!("Feature methods:");
    for feature in policy.list_features() {
        let methods = policy.allowed_methods(feature, department, role);
        if methods.is_empty() {
            continue;
        }
        let methods: Vec<&str> = methods.iter().map(|m| m.as_str()).collect();
        println!("  {}: {}", feature, methods.join(", "));
    }
}

async fn whoami(
    config: Config,
    policy: AccessPolicy,
    token: Option<String>,
) -> anyhow::Result<bool> {
    let client = ApiClient::new(config.api, &config.session)?;
    let session = Session::from_config(client, Arc::new(policy), &config.session);

    let profile = match token {
        Some(token) => {
            session.client().store_tokens(Some(&token), None);
            Some(session.fetch_profile().await?)
        }
        None => session.restore().await?,
    };

    let Some(profile) = profile else {
        println!("Not logged in");
        return Ok(false);
    };

    println!("email:      {}", profile.email.as_deref().unwrap_or("-"));
    println!("name:       {}", profile.name.as_deref().unwrap_or("-"));
    println!(
        "department: {}",
        profile.department.map_or("-", |d| d.as_str())
    );
    println!("role:       {}", profile.role.map_or("-", |r| r.as_str()));
    println!(
        "visible:    {}",
        session
            .policy()
            .visible_paths(profile.department, profile.role)
            .join(" ")
    );
    Ok(true)
}
