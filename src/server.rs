use std::net::SocketAddr;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use tracing::info;

use crate::backend::BackendClient;
use crate::config::ProxyConfig;
use crate::handlers::{self, AppState};

/// Binds the proxy and returns the server future with its bound address.
///
/// Port `0` picks a free port, which is what the integration tests rely on.
pub fn bind(config: ProxyConfig) -> std::io::Result<(Server, SocketAddr)> {
    let backend = BackendClient::new(config.clone()).map_err(std::io::Error::other)?;
    let state = web::Data::new(AppState::new(backend));

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(handlers::configure)
    })
    .bind((config.host.as_str(), config.port))?;

    let addr = server.addrs().first().copied().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::AddrNotAvailable, "no address bound")
    })?;

    info!(
        %addr,
        backend = %config.backend_url,
        timeout_secs = config.backend_timeout.as_secs_f64(),
        "classification proxy listening"
    );
    Ok((server.run(), addr))
}
