//! ostia is a small HTTP server for previewing local static sites (games,
//! generated docs, WASM builds) without tripping over the browser's
//! same-origin policy.
//!
//! This crate provides a [`Server`] that serves files from a single base
//! directory and unconditionally attaches permissive CORS headers to every
//! response, success or error:
//!
//! * `Access-Control-Allow-Origin: *`
//! * `Access-Control-Allow-Methods: GET, POST, OPTIONS`
//! * `Access-Control-Allow-Headers: *`
//!
//! `OPTIONS` requests are answered with an empty `200 OK` so browser
//! pre-flights succeed. The server can also open the user's default browser
//! at its root URL, which is how the bundled binary uses it.
//!
//! # Example
//!
//! ```no_run
//! use std::net::SocketAddr;
//! use ostia::{Config, Server};
//!
//! # tokio_test::block_on(async {
//! let addr = "127.0.0.1:8000".parse::<SocketAddr>()?;
//! let server = Server::bind(Config::new(addr, ".")).await?;
//!
//! server.open_browser()?;
//! #   Ok::<_, Box<dyn std::error::Error>>(())
//! # });
//! ```
//!
//! # Why the name?
//! Ostia was the harbor city of ancient Rome. This crate exists to open a
//! port.

#![warn(missing_debug_implementations)]
#![warn(missing_docs)]

use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::{extract::Extension, routing::get, Router};
use tokio::process::Command;
use tokio::sync::oneshot;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::log::*;

mod service;

/// The port the bundled binary listens on.
pub const DEFAULT_PORT: u16 = 8000;

/// Immutable server configuration, constructed once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// The address to bind the listener to.
    pub addr: SocketAddr,

    /// The base directory that all request paths are resolved against.
    /// Requests cannot escape it.
    pub root: PathBuf,
}

impl Config {
    /// Creates a configuration serving `root` on `addr`.
    pub fn new(addr: SocketAddr, root: impl Into<PathBuf>) -> Self {
        Config {
            addr,
            root: root.into(),
        }
    }
}

/// Static file server with permissive CORS.
///
/// Listens for HTTP connections and serves files from the configured base
/// directory. Directory paths resolve to their `index.html` if one exists.
/// The three CORS headers are attached by header layers wrapped around the
/// whole router, so error responses carry them too.
///
/// The listening socket is held until the `Server` is dropped, at which
/// point the serve task shuts down gracefully and releases the port.
///
/// The server is asynchronous, and assumes that a `tokio` runtime is in use.
pub struct Server {
    addr: SocketAddr,
    config: Arc<Config>,
    _shutdown_tx: oneshot::Sender<()>,
}

impl Server {
    /// Binds the server to the address in `config` and starts serving.
    ///
    /// Binding to port 0 will request a port assignment from the OS. Use
    /// [`addr()`][Self::addr] to determine what port was assigned.
    ///
    /// Returns an error instead of panicking when the address is already in
    /// use, so callers can report the conflict and exit.
    ///
    /// The server must be bound using a Tokio runtime.
    pub async fn bind(config: Config) -> io::Result<Server> {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let config = Arc::new(config);

        let app = Router::new()
            .fallback(get(service::serve_file).options(service::preflight))
            .layer(Extension(Arc::clone(&config)))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("GET, POST, OPTIONS"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("*"),
            ))
            .layer(TraceLayer::new_for_http());

        let http_server = axum::Server::try_bind(&config.addr)
            .map_err(|e| io::Error::new(io::ErrorKind::AddrInUse, e))?
            .serve(app.into_make_service());

        let addr = http_server.local_addr();
        info!("listening on {:?}", addr);

        let http_server = http_server.with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        });

        tokio::spawn(http_server);

        Ok(Server {
            addr,
            config,
            _shutdown_tx: shutdown_tx,
        })
    }

    /// Returns the socket address that the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the URL of the server root, using `localhost` rather than
    /// the bound interface so it is always browsable.
    pub fn root_url(&self) -> String {
        format!("http://localhost:{}", self.addr.port())
    }

    /// Opens the user's default browser at the server's root URL in the
    /// background.
    ///
    /// This function uses platform-specific utilities to determine the browser. The following
    /// platforms are supported:
    ///
    /// | Platform | Program    |
    /// | -------- | ---------- |
    /// | Linux    | `xdg-open` |
    /// | OS X     | `open -g`  |
    /// | Windows  | `explorer` |
    pub fn open_browser(&self) -> io::Result<()> {
        let command = if cfg!(target_os = "macos") {
            let mut command = Command::new("open");
            command.arg("-g");
            command
        } else if cfg!(target_os = "windows") {
            Command::new("explorer")
        } else {
            Command::new("xdg-open")
        };

        self.open_specific_browser(command)
    }

    /// Opens a browser with a specified command. The root URL of the server
    /// will be appended to the command as an argument.
    pub fn open_specific_browser(&self, mut command: Command) -> io::Result<()> {
        command.arg(self.root_url());

        command.stdout(Stdio::null()).stderr(Stdio::null());

        info!("spawning browser: {:?}", command);
        command.spawn()?;
        Ok(())
    }
}

impl fmt::Debug for Server {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Server")
            .field("addr", &self.addr)
            .field("config", &self.config)
            .field("_shutdown_tx", &self._shutdown_tx)
            .finish()
    }
}
