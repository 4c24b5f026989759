use crate::{
    api::{attendance, recap},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

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

    let submit_limiter = build_limiter(config.rate_submit_per_min);
    let recap_limiter = build_limiter(config.rate_recap_per_min);

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::resource("/attendance")
                    .wrap(submit_limiter)
                    .route(web::post().to(attendance::submit)),
            )
            .service(
                web::scope("/recap")
                    .wrap(recap_limiter)
                    .service(web::resource("").route(web::get().to(recap::recap_list)))
                    .service(web::resource("/export").route(web::get().to(recap::recap_export))),
            ),
    );
}

// SUBMIT
//  ├─ photo  → Drive folder (one object per submission)
//  └─ row    → Sheet tab    (one append per submission)

// RECAP
//  └─ re-reads the sheet on every request, filters, optionally exports CSV
