use std::path::PathBuf;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use demo_rest::config::AppConfig;
use demo_rest::{handlers, middleware, security};
use demo_rest_security::http::security::{PasswordEncoder, SecurityHeaders};
use log::info;

/// Usage:
///
/// - `demo-rest [config.toml]` starts the server
/// - `demo-rest encode-password <raw>` prints a `{bcrypt}` hash for the config file
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let first = args.next();

    if first.as_deref() == Some("encode-password") {
        let raw = args
            .next()
            .ok_or_else(|| anyhow::anyhow!("usage: demo-rest encode-password <raw>"))?;
        println!("{}", security::password_encoder().encode(&raw)?);
        return Ok(());
    }

    let config = AppConfig::load(first.map(PathBuf::from))?;

    env_logger::init_from_env(env_logger::Env::default().default_filter_or(&config.logging.level));

    let filter_chain = security::filter_chain(&config.security);
    let cors = config.security.cors.clone();
    let bind_address = config.server.bind_address();

    info!("starting demo-rest on http://{}", bind_address);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(filter_chain.clone())
            .wrap(SecurityHeaders::default())
            .wrap(middleware::build_cors(&cors))
            .wrap(Logger::default())
            .configure(handlers::configure)
    });
    if let Some(workers) = config.server.workers {
        server = server.workers(workers);
    }

    server.bind(bind_address)?.run().await?;
    Ok(())
}
