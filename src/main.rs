use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use tracker_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    handlers,
    middlewares::create_cors,
    services::*,
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
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

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration file");

    // 创建数据库连接池
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    // 运行数据库迁移
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // 创建服务
    let event_service = EventService::new(pool.clone());
    let donor_service = DonorService::new(pool.clone());
    let bid_service = BidService::new(pool.clone());
    let donation_service = DonationService::new(pool.clone());
    let prize_service = PrizeService::new(pool.clone());
    let draw_service = DrawService::new(pool.clone(), config.draw.max_attempts);
    let feed_service = FeedService::new(pool.clone());

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::new(event_service.clone()))
            .app_data(web::Data::new(donor_service.clone()))
            .app_data(web::Data::new(bid_service.clone()))
            .app_data(web::Data::new(donation_service.clone()))
            .app_data(web::Data::new(prize_service.clone()))
            .app_data(web::Data::new(draw_service.clone()))
            .app_data(web::Data::new(feed_service.clone()))
            .configure(swagger_config)
            .configure(handlers::feed_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::event_config)
                    .configure(handlers::donor_config)
                    .configure(handlers::bid_config)
                    .configure(handlers::donation_config)
                    .configure(handlers::prize_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
