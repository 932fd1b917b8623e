pub mod routes;
pub mod store;
pub mod telemetry;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use std::net::TcpListener;
use std::sync::Arc;

use crate::store::Store;

/// Build the server, but not await it.
///
/// Returns the port that the server has bound to by modifying the config.
pub fn build(config: &mut Config, store: Arc<Store>) -> std::io::Result<Server> {
    let store = web::Data::from(store);
    let allowed_origins = config.allowed_origins.clone();

    // OS assigns the port if binding to 0
    let listener = TcpListener::bind(format!("{}:{}", config.ip, config.port))?;
    config.port = listener.local_addr()?.port();
    let server = HttpServer::new(move || {
        let cors = if allowed_origins.iter().any(|o| o == "*") {
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .supports_credentials()
        } else {
            allowed_origins.iter().fold(
                Cors::default()
                    .allow_any_method()
                    .allow_any_header()
                    .supports_credentials(),
                |cors, origin| cors.allowed_origin(origin),
            )
        };

        App::new()
            .wrap(cors)
            .service(routes::api_services())
            .app_data(store.clone())
            .app_data(web::JsonConfig::default().limit(4 * 1024 * 1024))
    })
    .listen(listener)?
    .run();
    Ok(server)
}

pub struct Config {
    /// set to "0.0.0.0" for public access, "127.0.0.1" for local dev
    pub ip: String,
    /// set to 0 to get an os-assigned port
    pub port: u16,
    /// Allowed CORS origins. "*" allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn local(port: u16) -> Self {
        Self {
            ip: "127.0.0.1".into(),
            port,
            allowed_origins: vec!["*".into()],
        }
    }
}
