use crate::{
    api::{application, report},
    auth::handlers,
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build a per-IP limiter config
    fn build_limiter(requests_per_min: u32) -> GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap()
    }

    let login_limiter = build_limiter(config.rate_login_per_min);
    let submit_limiter = build_limiter(config.rate_submit_per_min);
    let protected_limiter = build_limiter(config.rate_protected_per_min);

    // Auth routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(Governor::new(&login_limiter))
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/credentials").route(web::put().to(handlers::change_credentials)),
            ),
    );

    // Application routes; submission is public, everything else checks the
    // session token in its handler
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(Governor::new(&protected_limiter))
            .service(
                web::scope("/applications")
                    // /applications
                    .service(
                        web::resource("")
                            .wrap(Governor::new(&submit_limiter))
                            .route(web::post().to(application::submit_application))
                            .route(web::get().to(application::list_applications)),
                    )
                    // /applications/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(application::get_application)),
                    )
                    // /applications/{id}/status
                    .service(
                        web::resource("/{id}/status")
                            .route(web::put().to(application::update_status)),
                    )
                    // /applications/{id}/document
                    .service(
                        web::resource("/{id}/document")
                            .route(web::post().to(application::regenerate_document)),
                    ),
            )
            .service(web::resource("/report").route(web::get().to(report::download_report))),
    );
}
