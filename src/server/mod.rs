pub mod api;

use std::error::Error;
use std::net::SocketAddr;
use std::time::Duration;

use axum_server::{ tls_rustls::RustlsConfig, Handle };
use log::{ error, info };
use tokio::net::TcpListener;

use crate::cli::Args;
use crate::relay::AppState;

pub struct Server {
    addr: String,
    state: AppState,
    args: Args,
}

impl Server {
    pub fn new(addr: String, state: AppState, args: Args) -> Self {
        Self { addr, state, args }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let addr = self.addr.parse::<SocketAddr>()?;
        let app = api::build_router(self.state.clone(), &self.args.route, self.args.max_body_bytes);

        if !self.args.enable_tls {
            info!("TLS not enabled. Serving plain HTTP.");
            let listener = TcpListener::bind(addr).await.map_err(|e|
                format!("Failed to bind HTTP server to {}: {}", addr, e)
            )?;
            info!("Chat relay listening on: http://{}{}", addr, self.args.route);
            axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
            return Ok(());
        }

        let (cert_path, key_path) = match (&self.args.tls_cert_path, &self.args.tls_key_path) {
            (Some(cert_path), Some(key_path)) => (cert_path, key_path),
            (Some(_), None) | (None, Some(_)) => {
                error!("Both --tls-cert-path and --tls-key-path must be provided to enable TLS.");
                return Err("Missing TLS certificate or key path".into());
            }
            (None, None) => {
                error!("--enable-tls was set but no certificate/key paths provided.");
                return Err("TLS enabled without cert/key".into());
            }
        };

        info!("TLS enabled. Loading certificate from '{}' and key from '{}'", cert_path, key_path);
        let tls_config = RustlsConfig::from_pem_file(cert_path, key_path).await?;

        let handle = Handle::new();
        let shutdown_handle = handle.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            shutdown_handle.graceful_shutdown(Some(Duration::from_secs(10)));
        });

        info!("Chat relay listening on: https://{}{}", addr, self.args.route);
        axum_server::bind_rustls(addr, tls_config)
            .handle(handle)
            .serve(app.into_make_service())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}
