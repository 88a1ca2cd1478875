//! MCP stdio server entrypoint.
//!
//! Reads credentials from the environment (`APP_KEY`, `APP_SECRET`), builds
//! the directory service, and serves the MCP protocol on stdin/stdout until
//! EOF. Stdout carries only JSON-RPC frames; logging and human-facing
//! output go to stderr.

use std::process::ExitCode;
use std::sync::Arc;

use log::error;

use dingtalk_mcp_server::client::HttpDirectoryClient;
use dingtalk_mcp_server::config::AppConfig;
use dingtalk_mcp_server::directory::DirectoryService;
use dingtalk_mcp_server::mcp::DirectoryMcpServer;

#[tokio::main]
async fn main() -> ExitCode {
    // A .env file is optional; deployments usually set the variables directly
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let client = match HttpDirectoryClient::new(config.base_url) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            error!("failed to build HTTP client: {err}");
            return ExitCode::FAILURE;
        }
    };

    let service =
        DirectoryService::new(client, config.credentials).with_search_options(config.search);
    let mcp_server = DirectoryMcpServer::new(service);

    eprintln!(
        "dingtalk-mcp-server {} ready",
        env!("CARGO_PKG_VERSION")
    );
    eprintln!("Listening for JSON-RPC messages on stdin (EOF stops the server)");

    if let Err(err) = mcp_server.run_stdio().await {
        error!("server terminated with error: {err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
