//! Server startup utilities.

use std::net::SocketAddr;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(
        r#"
    __  __                           __
   / / / /___  _________  ___  ____/ /___ _
  / /_/ / __ \/ ___/ __ \/ _ \/ __  / __ `/
 / __  / /_/ (__  ) /_/ /  __/ /_/ / /_/ /
/_/ /_/\____/____/ .___/\___/\__,_/\__,_/
                /_/
    "#
    );
}

/// Lines announcing where the server can be reached.
pub fn startup_lines(addr: SocketAddr) -> Vec<String> {
    vec![
        format!("REST API:  http://{addr}/api/v1"),
        format!("Health:    http://{addr}/health"),
        format!("Readiness: http://{addr}/ready"),
        format!("API Docs:  http://{addr}/swagger-ui"),
    ]
}

/// Prints server startup information.
pub fn print_startup_info(addr: SocketAddr) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    for line in startup_lines(addr) {
        info!("{}", line);
    }
    info!("{}", separator);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_lines_point_at_bound_address() {
        let addr: SocketAddr = "127.0.0.1:3000".parse().unwrap();
        let lines = startup_lines(addr);
        assert_eq!(lines[0], "REST API:  http://127.0.0.1:3000/api/v1");
        assert!(lines.iter().any(|l| l.ends_with("/swagger-ui")));
    }

    #[test]
    fn test_print_banner_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_banner();
        print_startup_info("0.0.0.0:8080".parse().unwrap());
    }
}
