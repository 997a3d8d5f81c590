use actix_web::{web, App, HttpServer};
use todo_backend::{
    build_state, cors_middleware, routes, security_config_from_env, DbProfile, RequestTrace,
    StructuredLogger, TraceSpan,
};
use tracing::info;

mod telemetry;

fn exit_with(message: impl std::fmt::Display) -> ! {
    eprintln!("❌ {message}");
    std::process::exit(1);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Configuration comes from the process environment only
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| exit_with("BACKEND_PORT must be a valid port number"));

    let security_config =
        security_config_from_env().unwrap_or_else(|e| exit_with(format!("Invalid auth config: {e}")));

    let app_state = match build_state()
        .with_db(DbProfile::Prod)
        .with_security(security_config)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => exit_with(format!("Failed to build application state: {e}")),
    };

    info!(%host, port, "Starting todo backend");
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
