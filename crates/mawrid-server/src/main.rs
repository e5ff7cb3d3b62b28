// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Mawrid supplier server binary.

use clap::{Parser, Subcommand};
use mawrid_server::{api::cors_layer, create_app_state, create_router};
use mawrid_server_config::LogFormat;
use std::path::PathBuf;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Mawrid server - HTTP server for supplier records.
#[derive(Parser, Debug)]
#[command(name = "mawrid-server", about = "Mawrid supplier server", version)]
struct Args {
	/// Config file to use instead of /etc/mawrid/server.toml
	#[arg(long, env = "MAWRID_SERVER_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
}

fn format_version_info() -> String {
	format!(
		"mawrid-server version: {}\n\
		 Platform:              {}-{}",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH,
	)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("{}", format_version_info());
		return Ok(());
	}

	dotenvy::dotenv().ok();

	let config = match &args.config {
		Some(path) => mawrid_server_config::load_config_with_file(path)?,
		None => mawrid_server_config::load_config()?,
	};

	let (text_layer, json_layer) = match config.logging.format {
		LogFormat::Text => (Some(tracing_subscriber::fmt::layer()), None),
		LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
	};
	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(text_layer)
		.with(json_layer)
		.init();

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		providers = %config.providers.mode,
		"starting mawrid-server"
	);

	let state = create_app_state(&config).await?;
	let app = create_router(state)
		.layer(TraceLayer::new_for_http())
		.layer(cors_layer(&config.cors)?);

	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	tracing::info!("Server shutdown complete");
	Ok(())
}
