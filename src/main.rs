use std::env;
use std::net::SocketAddr;

use anyhow::Context;

use ostia::{Config, Server, DEFAULT_PORT};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Serve the directory containing the executable, regardless of where
    // the caller invoked us from.
    let exe = env::current_exe().context("could not determine executable path")?;
    let root = exe
        .parent()
        .context("executable has no parent directory")?
        .to_path_buf();
    env::set_current_dir(&root)
        .with_context(|| format!("could not change directory to {}", root.display()))?;

    let addr = SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT));
    let server = Server::bind(Config::new(addr, &root))
        .await
        .with_context(|| format!("could not bind port {}", DEFAULT_PORT))?;

    println!("ostia static file server");
    println!("Serving files from: {}", root.display());
    println!("Server running at: {}", server.root_url());
    println!("Press Ctrl+C to stop the server");

    match server.open_browser() {
        Ok(()) => println!("Browser should open automatically"),
        Err(e) => {
            tracing::warn!("could not launch browser: {}", e);
            println!("Open {} in your browser manually", server.root_url());
        }
    }

    tokio::signal::ctrl_c()
        .await
        .context("could not listen for the interrupt signal")?;

    println!("\nServer stopped");

    Ok(())
}
