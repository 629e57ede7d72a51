//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_auth: bool,
    static_dir: Option<&Path>,
) -> Result<()> {
    println!("🚀 Starting Tally web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }

    // API keys as comma-separated user=key pairs
    let api_keys =
        tally_server::parse_api_keys(&std::env::var("TALLY_API_KEYS").unwrap_or_default());

    // Cross-origin UIs (e.g. a dev server on another port)
    let allowed_origins =
        tally_server::parse_origins(&std::env::var("TALLY_ALLOWED_ORIGINS").unwrap_or_default());

    if no_auth {
        println!();
        println!(
            "   ⚠️  Authentication DISABLED - every request acts as {}, do not expose to network!",
            tally_server::LOCAL_DEV_USER
        );
    } else {
        println!("   🔒 Authentication: identity proxy header");
        if !api_keys.is_empty() {
            println!(
                "   🔑 API keys: {} configured (TALLY_API_KEYS)",
                api_keys.len()
            );
        }
    }
    if !allowed_origins.is_empty() {
        println!(
            "   🌐 Allowed origins: {} (TALLY_ALLOWED_ORIGINS)",
            allowed_origins.join(", ")
        );
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path)?;

    let config = tally_server::ServerConfig {
        require_auth: !no_auth,
        allowed_origins,
        api_keys,
    };

    let static_dir_str = static_dir
        .map(|p| {
            p.to_str()
                .with_context(|| format!("Static dir is not valid UTF-8: {}", p.display()))
        })
        .transpose()?;
    tally_server::serve_with_config(db, host, port, static_dir_str, config).await?;

    Ok(())
}
