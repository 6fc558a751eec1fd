//! WebDAV server implementation using hyper.
//!
//! This module hosts a [`ResourceDavFs`] behind `dav-server`'s handler so
//! clients can browse the tree over HTTP.

use super::ResourceDavFs;
use dav_server::{fakels::FakeLs, DavHandler};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use log::{debug, error, info};
use objdav_log::ScopedLogger;
use std::convert::Infallible;
use std::io;
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

/// Handle to a server started with [`serve_background`].
pub struct ObjdavServer {
    /// Server address.
    addr: SocketAddr,
    /// Shutdown signal sender.
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ObjdavServer {
    /// Get the server's listen address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get the URL to mount this server.
    pub fn mount_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Shutdown the server.
    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn build_handler(fs: ResourceDavFs) -> DavHandler {
    DavHandler::builder()
        .filesystem(Box::new(fs))
        .locksystem(FakeLs::new()) // Fake locks for macOS/Windows compatibility
        .build_handler()
}

fn spawn_connection(
    dav_server: DavHandler,
    stream: TcpStream,
    remote_addr: SocketAddr,
    logger: ScopedLogger,
) {
    debug!("Connection from {}", remote_addr);
    let io = TokioIo::new(stream);

    tokio::spawn(async move {
        if let Err(err) = http1::Builder::new()
            .serve_connection(
                io,
                service_fn(move |req| {
                    let dav_server = dav_server.clone();
                    async move { Ok::<_, Infallible>(dav_server.handle(req).await) }
                }),
            )
            .await
        {
            error!("Connection error: {:?}", err);
            let line = format!("connection {} failed", remote_addr);
            if let Err(sink_err) = logger.log_error(&line, &err) {
                error!("gateway log write failed: {}", sink_err);
            }
        }
    });
}

/// Start a WebDAV server on `127.0.0.1:port` and block until the listener fails.
pub async fn serve(fs: ResourceDavFs, logger: &ScopedLogger, port: u16) -> io::Result<()> {
    let addr: SocketAddr = ([127, 0, 0, 1], port).into();
    let dav_server = build_handler(fs);
    let http_logger = logger.get_logger(".http");

    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    info!("WebDAV server listening on http://{}", local_addr);
    info!("Press Ctrl+C to stop the server");
    http_logger
        .log(&format!("[{}] listening on {}", ScopedLogger::timestamp(), local_addr))
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    loop {
        let (stream, remote_addr) = listener.accept().await?;
        spawn_connection(dav_server.clone(), stream, remote_addr, http_logger.clone());
    }
}

/// Start a WebDAV server in the background.
///
/// Returns a handle that can be used to get the server address and shut it down.
pub async fn serve_background(
    fs: ResourceDavFs,
    logger: &ScopedLogger,
    port: u16,
) -> io::Result<ObjdavServer> {
    let addr: SocketAddr = ([127, 0, 0, 1], port).into();
    let dav_server = build_handler(fs);
    let http_logger = logger.get_logger(".http");

    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

    info!("WebDAV server started on http://{}", local_addr);

    tokio::spawn(async move {
        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, remote_addr)) => {
                            let logger = http_logger.clone();
                            spawn_connection(dav_server.clone(), stream, remote_addr, logger);
                        }
                        Err(e) => {
                            error!("Accept error: {:?}", e);
                        }
                    }
                }
                _ = &mut shutdown_rx => {
                    info!("WebDAV server shutting down");
                    break;
                }
            }
        }
    });

    Ok(ObjdavServer {
        addr: local_addr,
        shutdown_tx: Some(shutdown_tx),
    })
}
