//! Logger module
//!
//! Provides logging utilities for the mock server including:
//! - Server lifecycle logging
//! - Route table listing
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use crate::routing::RouteTable;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config, routes: &RouteTable) {
    write_info("\nMock started.");
    write_info(&format!("\nListening on http://{addr}"));
    if addr.ip().is_unspecified() {
        write_info(&format!("          or http://localhost:{}", addr.port()));
        for ip in lan_ipv4(interface_addrs()) {
            write_info(&format!("          or http://{ip}:{}", addr.port()));
        }
    }
    write_info(&format!(
        "Mock root: {} ({} endpoints)",
        routes.root().display(),
        routes.len()
    ));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    if config.mocks.fatal_fixture_errors {
        write_info("Fixture errors at request time will stop the server");
    }
}

fn interface_addrs() -> Vec<IpAddr> {
    match if_addrs::get_if_addrs() {
        Ok(ifaces) => ifaces.iter().map(if_addrs::Interface::ip).collect(),
        Err(e) => {
            log_warning(&format!("Could not list network interfaces: {e}"));
            Vec::new()
        }
    }
}

/// Non-loopback IPv4 addresses, first occurrence kept
fn lan_ipv4(addrs: impl IntoIterator<Item = IpAddr>) -> Vec<Ipv4Addr> {
    let mut out = Vec::new();
    for addr in addrs {
        if let IpAddr::V4(v4) = addr {
            if !v4.is_loopback() && !v4.is_unspecified() && !out.contains(&v4) {
                out.push(v4);
            }
        }
    }
    out
}

/// Print the route table as aligned `path  [METHODS]  file` rows
pub fn log_route_table(routes: &RouteTable) {
    write_info("\nEndpoints:");
    for line in format_route_table(routes) {
        write_info(&line);
    }
    write_info("");
}

fn format_route_table(routes: &RouteTable) -> Vec<String> {
    let path_width = routes
        .routes()
        .iter()
        .map(|r| r.url_path.len())
        .max()
        .unwrap_or(0);
    let methods: Vec<String> = routes.routes().iter().map(|r| r.methods_label()).collect();
    let methods_width = methods.iter().map(String::len).max().unwrap_or(0);

    routes
        .routes()
        .iter()
        .zip(&methods)
        .map(|(route, label)| {
            format!(
                "{:<path_width$}        {:<methods_width$}        {}",
                route.url_path,
                label,
                route.source_file.display()
            )
        })
        .collect()
}

pub fn log_shutdown() {
    write_info("\rMock is down.");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}
