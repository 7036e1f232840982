use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use microfinance_backend::{
    config::Config,
    database::{Store, run_migrations, seed_admin},
    handlers,
    middlewares::SessionGate,
    services::*,
    utils::JwtService,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?;

    // Resolves the file location and creates its directory
    let store = Store::from_config(&config.database)?;
    log::info!("Using database {}", store.url());

    // Schema and seed are applied on every start; both are idempotent
    run_migrations(&store).await?;
    seed_admin(&store, &config.seed).await?;

    let jwt_service = JwtService::new(&config.session.secret, config.session.expires_in);

    let auth_service = AuthService::new(store.clone(), jwt_service.clone());
    let customer_service = CustomerService::new(store.clone());
    let loan_service = LoanService::new(store.clone());
    let report_service = ReportService::new(store.clone());

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(SessionGate::new(jwt_service.clone()))
            .wrap(Logger::default())
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(customer_service.clone()))
            .app_data(web::Data::new(loan_service.clone()))
            .app_data(web::Data::new(report_service.clone()))
            .configure(handlers::configure)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await?;

    Ok(())
}
