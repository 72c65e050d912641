//! Serve command implementation for the ragsim CLI.

use ragsim_server::ServerConfig;

use crate::colors;

/// Start the HTTP API server.
pub async fn execute(host: &str, port: u16) -> anyhow::Result<()> {
    let config = ServerConfig {
        host: host.to_string(),
        port,
    };

    println!(
        "\n{}ragsim{} - Resource Allocation Graph Simulator",
        colors::BOLD,
        colors::RESET
    );
    println!("{}", "─".repeat(50));
    println!(
        "{}  ◆ API:{} http://{}:{}",
        colors::CYAN,
        colors::RESET,
        config.host,
        config.port
    );
    println!(
        "{}  ◆ Graph:{} http://{}:{}/graph",
        colors::CYAN,
        colors::RESET,
        config.host,
        config.port
    );
    println!("{}", "─".repeat(50));
    println!("{}Press Ctrl+C to stop{}", colors::GREEN, colors::RESET);
    println!();

    ragsim_server::serve(config).await?;

    Ok(())
}
