use axum::{body::Body, http::Uri, response::Response};
use colored::Colorize;
use local_ip_address::local_ip;
use safari::{FormatElapsedTimeOptions, format_elapsed_time};
use std::{
    io,
    net::{IpAddr, SocketAddr},
    time::Duration,
};
use tokio::net::TcpSocket;
use tower_http::trace::OnResponse;
use tracing::{Span, debug, info};

pub fn log_server_start(elapsed: Duration, host: bool, addr: SocketAddr, server_type: &str) {
    info!(name: "SKIP_FORMAT", "");
    let elapsed_time = format_elapsed_time(elapsed, &FormatElapsedTimeOptions::default());
    info!(name: "SKIP_FORMAT", "{} {}", "Safari Match 🦁".bold().bright_yellow(), format!("{} server started in {}", server_type, elapsed_time));
    info!(name: "SKIP_FORMAT", "");

    let port = addr.port();
    let url = format!("\x1b]8;;http://localhost:{port}\x1b\\http://localhost:{port}\x1b]8;;\x1b\\")
        .bold()
        .underline()
        .bright_blue();
    let network_url = match (host, local_ip()) {
        (true, Ok(local_ip)) => format!(
            "\x1b]8;;http://{local_ip}:{port}\x1b\\http://{local_ip}:{port}\x1b]8;;\x1b\\"
        )
        .bold()
        .underline()
        .bright_magenta(),
        (true, Err(_)) => "Could not determine the local network address".dimmed(),
        (false, _) => "Use --host to expose the server to your network".dimmed(),
    };
    info!(name: "SKIP_FORMAT", "🮔  {}    {}", "Local".bold(), url);
    info!(name: "SKIP_FORMAT", "🮔  {}  {}", "Network".bold(), network_url);
    info!(name: "SKIP_FORMAT", "");

    info!(name: "server", "{}", "waiting for requests...".dimmed());
}

#[derive(Clone, Debug)]
pub struct CustomOnResponse;

impl OnResponse<Body> for CustomOnResponse {
    fn on_response(self, response: &Response<Body>, latency: Duration, _span: &Span) {
        let status = response.status();

        if status.is_informational() {
            return;
        }

        let status = if status.is_server_error() {
            status.to_string().red()
        } else if status.is_client_error() {
            status.to_string().yellow()
        } else {
            status.to_string().green()
        };

        let uri = response
            .extensions()
            .get::<Uri>()
            .map(Uri::to_string)
            .unwrap_or_default()
            .bold();

        let latency = format_elapsed_time(latency, &FormatElapsedTimeOptions::default());

        info!(name: "server", "{} {} {}", status, uri, latency);
    }
}

/// Finds the first port from `starting_port` on that can be bound on `address`.
pub async fn find_open_port(address: &IpAddr, starting_port: u16) -> io::Result<u16> {
    let mut port = starting_port;

    loop {
        let socket = TcpSocket::new_v4()?;
        let socket_addr = SocketAddr::new(*address, port);
        match socket.bind(socket_addr) {
            Ok(_) => {
                debug!(name: "server", "Found open port: {}", port);
                return Ok(port);
            }
            Err(_) if port < u16::MAX => {
                debug!(
                    name: "server",
                    "Port {} is already in use or failed to bind, trying next one",
                    port
                );
                port += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
