use crate::{
    api::{administration, calendar, history, leave_request, leave_type},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let per_ms = (60_000 / u64::from(requests_per_min)).max(1);
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap_or_default();
        Governor::new(&cfg)
    }

    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public routes
    cfg.service(
        web::scope("/auth").service(
            web::resource("/login")
                .wrap(login_limiter)
                .route(web::post().to(handlers::login)),
        ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(protected_limiter) // rate limiting
            .service(web::resource("/me").route(web::get().to(handlers::me)))
            .service(web::resource("/settings").route(web::get().to(handlers::settings)))
            .service(
                web::resource("/leave-types").route(web::get().to(leave_type::list_leave_types)),
            )
            .service(
                web::resource("/balance/{leave_type_id}")
                    .route(web::get().to(leave_type::my_balance)),
            )
            .service(
                web::scope("/leave")
                    // /leave
                    .service(
                        web::resource("")
                            .route(web::get().to(administration::leave_list))
                            .route(web::post().to(leave_request::create_leave)),
                    )
                    // fixed segments go before /leave/{id}
                    .service(
                        web::resource("/statistics")
                            .route(web::get().to(administration::leave_statistics)),
                    )
                    .service(
                        web::resource("/export").route(web::get().to(administration::leave_export)),
                    )
                    .service(
                        web::resource("/bulk").route(web::post().to(administration::bulk_decide)),
                    )
                    .service(
                        web::resource("/users").route(web::get().to(administration::leave_users)),
                    )
                    .service(web::resource("/mine").route(web::get().to(history::my_leave)))
                    .service(
                        web::resource("/mine/statistics")
                            .route(web::get().to(history::my_statistics)),
                    )
                    .service(
                        web::resource("/mine/export").route(web::get().to(history::my_export)),
                    )
                    // /leave/{id}
                    .service(web::resource("/{id}").route(web::get().to(leave_request::get_leave)))
                    // /leave/{id}/approve
                    .service(
                        web::resource("/{id}/approve")
                            .route(web::put().to(leave_request::approve_leave)),
                    )
                    // /leave/{id}/reject
                    .service(
                        web::resource("/{id}/reject")
                            .route(web::put().to(leave_request::reject_leave)),
                    ),
            )
            .service(
                web::scope("/calendar")
                    .service(web::resource("").route(web::get().to(calendar::calendar_events)))
                    .service(
                        web::resource("/export").route(web::get().to(calendar::calendar_export)),
                    )
                    .service(
                        web::resource("/coverage")
                            .route(web::get().to(calendar::calendar_coverage)),
                    ),
            ),
    );
}

// LOGIN
//  └─ access_token (ACCESS_TOKEN_TTL seconds)

// API REQUEST
//  └─ Authorization: Bearer access_token
