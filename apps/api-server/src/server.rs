//! Server lifecycle - bind, run in the background, stop.

use std::io;
use std::net::SocketAddr;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use crate::config::AppConfig;
use crate::observability::RequestIdMiddleware;
use crate::state::AppState;

/// A server running on the current actix runtime.
pub struct RunningServer {
    addr: SocketAddr,
    handle: ServerHandle,
    task: actix_rt::task::JoinHandle<io::Result<()>>,
}

impl RunningServer {
    /// Address the server is listening on (resolves port 0).
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Gracefully stop the server and wait for it to finish.
    pub async fn stop(self) -> io::Result<()> {
        tracing::info!("Stopping server on {}", self.addr);
        self.handle.stop(true).await;
        self.wait().await
    }

    /// Wait until the server exits (e.g. on SIGINT/SIGTERM).
    pub async fn wait(self) -> io::Result<()> {
        self.task.await.map_err(io::Error::other)?
    }
}

/// Connect the configured store and start serving.
pub async fn start(config: &AppConfig) -> io::Result<RunningServer> {
    let state = AppState::new(config.database.as_ref()).await?;
    start_with_state(config, state)
}

/// Start serving with an already built state.
///
/// Must be called from within an actix system (`#[actix_web::main]`,
/// `#[actix_web::test]`).
pub fn start_with_state(config: &AppConfig, state: AppState) -> io::Result<RunningServer> {
    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(crate::configure_app)
    })
    .bind((config.host.as_str(), config.port))?;

    let addr = server.addrs().first().copied().ok_or_else(|| {
        io::Error::new(io::ErrorKind::AddrNotAvailable, "server bound no address")
    })?;

    let server = server.run();
    let handle = server.handle();
    let task = actix_rt::spawn(server);

    tracing::info!("Listening on {}", addr);

    Ok(RunningServer { addr, handle, task })
}
