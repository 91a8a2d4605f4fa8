// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Evaluates one authorization decision against the configured database.

use clap::{Args, Parser, Subcommand};
use conduit_server_permissions::{
	Authorizer, Caller, GroupId, PermissionLevel, PermissionRegistry, RouteVars, UserId,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(
	name = "conduit-authz",
	about = "Evaluate a Conduit authorization decision",
	version
)]
struct Cli {
	/// Config file (defaults to /etc/conduit/server.toml)
	#[arg(long, global = true, env = "CONDUIT_SERVER_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Check whether a caller may access a route
	Check(CheckArgs),
	/// Show version information
	Version,
}

#[derive(Args, Debug)]
struct CheckArgs {
	/// Caller user ID
	#[arg(long)]
	user: Uuid,

	/// Group the caller belongs to (repeatable)
	#[arg(long = "group")]
	groups: Vec<i64>,

	/// Treat the caller as a platform administrator
	#[arg(long)]
	system_admin: bool,

	/// Required permission level (none, read, execute, write, admin)
	#[arg(long)]
	level: PermissionLevel,

	/// Route variable as name=value (repeatable)
	#[arg(long = "var", value_parser = parse_route_var)]
	vars: Vec<(String, String)>,
}

fn parse_route_var(raw: &str) -> Result<(String, String), String> {
	let (name, value) = raw
		.split_once('=')
		.ok_or_else(|| format!("expected name=value, got {raw:?}"))?;
	if name.is_empty() {
		return Err(format!("route variable name is empty in {raw:?}"));
	}
	Ok((name.to_string(), value.to_string()))
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
	let cli = Cli::parse();

	let args = match cli.command {
		Command::Version => {
			println!("conduit-authz {}", env!("CARGO_PKG_VERSION"));
			return Ok(ExitCode::SUCCESS);
		}
		Command::Check(args) => args,
	};

	let config = match cli.config {
		Some(path) => conduit_server_config::load_config_with_file(path)?,
		None => conduit_server_config::load_config()?,
	};

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();

	let pool = conduit_server_db::create_pool(&config.database.url).await?;
	let registry = PermissionRegistry::standard(conduit_server_db::permission_stores(pool));
	let authorizer = Authorizer::new(Arc::new(registry));

	let route: RouteVars = args.vars.into_iter().collect();
	let caller = Caller::new(
		UserId::new(args.user),
		args.groups.into_iter().map(GroupId::new),
	)
	.with_system_admin(args.system_admin);

	tracing::debug!(route_vars = route.len(), "evaluating authorization");

	match authorizer.authorize(&route, args.level, &caller).await {
		Ok(()) => {
			println!("authorized");
			Ok(ExitCode::SUCCESS)
		}
		Err(err) => {
			println!("{} ({}): {err}", err.error_code(), err.status_code());
			Ok(ExitCode::FAILURE)
		}
	}
}
