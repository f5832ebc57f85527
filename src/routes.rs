use crate::{
    api::{calendar, dashboard, lectures, login, scan},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let scan_limiter = Arc::new(build_limiter(config.rate_scan_per_min));
    let read_limiter = Arc::new(build_limiter(config.rate_read_per_min));

    cfg.service(
        web::resource("/login")
            .wrap(login_limiter)
            .route(web::post().to(login::login)),
    )
    // RFID scan ingestion (ESP32 readers post here)
    .service(
        web::resource("/data")
            .wrap(scan_limiter)
            .route(web::post().to(scan::ingest_scan)),
    )
    .service(
        web::resource("/dashboard")
            .wrap(read_limiter.clone())
            .route(web::get().to(dashboard::dashboard_stats)),
    )
    .service(
        web::resource("/calendar")
            .wrap(read_limiter.clone())
            .route(web::get().to(calendar::calendar_events)),
    )
    .service(
        web::resource("/lectures")
            .wrap(read_limiter)
            .route(web::get().to(lectures::lecture_analytics)),
    );
}
