// Copyright © 2025 rustarchiver.dev
// Licensed under RustArchiver License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::error::code::ErrorCode;
use crate::modules::utils::tls::establish_tls_stream;
use crate::modules::{error::RustArchiverResult, imap::session::SessionStream};
use crate::raise_error;
use std::net::SocketAddr;
use std::pin::Pin;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_io_timeout::TimeoutStream;
use tracing::error;

pub(crate) const TIMEOUT: Duration = Duration::from_secs(60);

pub(crate) async fn establish_tcp_connection_with_timeout(
    address: SocketAddr,
) -> RustArchiverResult<Pin<Box<TimeoutStream<TcpStream>>>> {
    let tcp_stream = timeout(TIMEOUT, TcpStream::connect(address))
        .await
        .map_err(|_| {
            error!(
                "TCP connection to {} timed out after {}s",
                address,
                TIMEOUT.as_secs()
            );
            raise_error!(
                format!(
                    "TCP connection to {} timed out after {}s",
                    address,
                    TIMEOUT.as_secs()
                ),
                ErrorCode::ConnectionTimeout
            )
        })?
        .map_err(|e| raise_error!(e.to_string(), ErrorCode::NetworkError))?;

    // Disable Nagle's algorithm for more efficient network communication
    tcp_stream
        .set_nodelay(true)
        .map_err(|e| raise_error!(e.to_string(), ErrorCode::NetworkError))?;

    // Wrap the TCP stream in a TimeoutStream for timeout management
    let mut timeout_stream = TimeoutStream::new(tcp_stream);
    timeout_stream.set_write_timeout(Some(TIMEOUT));
    timeout_stream.set_read_timeout(Some(TIMEOUT));

    Ok(Box::pin(timeout_stream))
}

pub(crate) async fn establish_tls_connection(
    address: SocketAddr,
    server_hostname: &str,
    alpn_protocols: &[&str],
) -> RustArchiverResult<impl SessionStream> {
    let tcp_stream = establish_tcp_connection_with_timeout(address).await?;
    let tls_stream = establish_tls_stream(server_hostname, alpn_protocols, tcp_stream).await?;
    Ok(tls_stream)
}
