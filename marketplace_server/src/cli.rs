//! The server takes no command line arguments. Passing any argument prints the help text together with the
//! configuration the server would start with, and the server exits without binding.
use std::env;

use crate::config::ServerConfig;

const HELP: &str = include_str!("./cli-help.txt");

/// Returns true if help was printed and the process should exit.
pub fn handle_command_line_args() -> bool {
    if env::args_os().len() <= 1 {
        return false;
    }
    let config = ServerConfig::from_env_or_default();
    let log_filter = env::var("RUST_LOG").ok();
    println!("{}", help_text(&config, log_filter.as_deref()));
    true
}

fn help_text(config: &ServerConfig, log_filter: Option<&str>) -> String {
    let migrations = if config.run_migrations { "on start-up" } else { "never" };
    format!(
        "\n{HELP}\nEffective configuration:\n  listen on          {}:{}\n  database          {} ({} connections)\n  \
         migrations        {migrations}\n  log filter        {}\n",
        config.host,
        config.port,
        config.database_url,
        config.max_connections,
        log_filter.unwrap_or("not set"),
    )
}
