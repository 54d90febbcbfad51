use anyhow::Context;
use blueprint_core::config::Config;
use blueprint_core::error::BlueprintError;
use std::path::Path;

pub fn run(root: &Path, port: Option<u16>, no_open: bool) -> anyhow::Result<()> {
    let port = match port {
        Some(p) => p,
        None => match Config::load(root) {
            Ok(cfg) => cfg.server.port,
            Err(BlueprintError::NotInitialized) => Config::default().server.port,
            Err(e) => return Err(e).context("failed to read config.yaml"),
        },
    };

    let rt = tokio::runtime::Runtime::new()?;
    let root_buf = root.to_path_buf();

    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
            .await
            .with_context(|| format!("failed to bind port {port}"))?;
        let actual_port = listener.local_addr()?.port();
        println!("blueprint API → http://localhost:{actual_port}/api");

        tokio::select! {
            res = blueprint_server::serve_on(root_buf, listener, !no_open) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}
