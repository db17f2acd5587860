pub mod domain;
pub mod handlers;
pub mod shared;
pub mod system;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::http::{header, Method};
    use axum::middleware;
    use axum::{
        routing::{delete, get, patch, post},
        Router,
    };
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};

    system::tracing::initialize()?;

    let config = shared::config::load_config()?;
    let port = config.server.port;
    let db_path = shared::config::get_database_path(&config)?;
    shared::config::init_config(config);

    shared::data::db::initialize_database(db_path.to_str())
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    system::initialization::seed_settings().await?;
    system::initialization::ensure_admin_user_exists().await?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        .route(
            "/api/system/auth/refresh",
            post(system::handlers::auth::refresh),
        )
        .route(
            "/api/system/auth/logout",
            post(system::handlers::auth::logout),
        )
        // System auth routes (protected)
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // System users management (admin only)
        .route(
            "/api/system/users",
            get(system::handlers::users::list)
                .post(system::handlers::users::create)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/system/users/:id",
            get(system::handlers::users::get_by_id)
                .put(system::handlers::users::update)
                .delete(system::handlers::users::delete)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/system/users/:id/change-password",
            post(system::handlers::users::change_password)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // ========================================
        // CARS CATALOG
        // ========================================
        .route(
            "/api/cars",
            get(handlers::a001_car::list)
                .post(handlers::a001_car::create)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/cars/:id",
            get(handlers::a001_car::get_by_id)
                .put(handlers::a001_car::update)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/cars/:id/active",
            post(handlers::a001_car::set_active).layer(middleware::from_fn(
                system::auth::middleware::require_manager,
            )),
        )
        // ========================================
        // APPLICATIONS
        // ========================================
        .route(
            "/api/applications",
            get(handlers::a002_application::list)
                .post(handlers::a002_application::create)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/applications/manual",
            post(handlers::a002_application::create_manual).layer(middleware::from_fn(
                system::auth::middleware::require_staff,
            )),
        )
        .route(
            "/api/applications/:id",
            get(handlers::a002_application::get_detail)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/applications/:id/status",
            patch(handlers::a002_application::update_status).layer(middleware::from_fn(
                system::auth::middleware::require_staff,
            )),
        )
        .route(
            "/api/applications/:id/contact-status",
            patch(handlers::a002_application::update_contact_status).layer(middleware::from_fn(
                system::auth::middleware::require_staff,
            )),
        )
        .route(
            "/api/applications/:id/checklist",
            patch(handlers::a002_application::update_checklist).layer(middleware::from_fn(
                system::auth::middleware::require_staff,
            )),
        )
        .route(
            "/api/applications/:id/assign-operator",
            post(handlers::a002_application::assign_operator).layer(middleware::from_fn(
                system::auth::middleware::require_manager,
            )),
        )
        .route(
            "/api/applications/:id/assign-manager",
            post(handlers::a002_application::assign_manager).layer(middleware::from_fn(
                system::auth::middleware::require_manager,
            )),
        )
        .route(
            "/api/applications/:id/comments",
            get(handlers::a002_application::list_comments)
                .post(handlers::a002_application::add_comment)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // ========================================
        // PAYMENTS
        // ========================================
        .route(
            "/api/applications/:id/payments",
            get(handlers::a003_payment::list_for_application)
                .post(handlers::a003_payment::create_invoice)
                .layer(middleware::from_fn(
                    system::auth::middleware::require_staff,
                )),
        )
        .route(
            "/api/payments/:id/confirm",
            post(handlers::a003_payment::confirm).layer(middleware::from_fn(
                system::auth::middleware::require_manager,
            )),
        )
        .route(
            "/api/payments/:id/reject",
            post(handlers::a003_payment::reject).layer(middleware::from_fn(
                system::auth::middleware::require_manager,
            )),
        )
        .route(
            "/api/payments/:id/receipt",
            post(handlers::a003_payment::attach_receipt).layer(middleware::from_fn(
                system::auth::middleware::require_staff,
            )),
        )
        .route(
            "/api/payments/stats",
            get(handlers::a003_payment::stats).layer(middleware::from_fn(
                system::auth::middleware::require_manager,
            )),
        )
        // ========================================
        // BLACKLIST
        // ========================================
        .route(
            "/api/blacklist",
            get(handlers::a004_blacklist::list)
                .post(handlers::a004_blacklist::add)
                .layer(middleware::from_fn(
                    system::auth::middleware::require_manager,
                )),
        )
        .route(
            "/api/blacklist/:id",
            delete(handlers::a004_blacklist::remove).layer(middleware::from_fn(
                system::auth::middleware::require_admin,
            )),
        )
        .route(
            "/api/blacklist/by-phone/:phone",
            delete(handlers::a004_blacklist::remove_by_phone).layer(middleware::from_fn(
                system::auth::middleware::require_admin,
            )),
        )
        .route(
            "/api/blacklist/check/:phone",
            get(handlers::a004_blacklist::check).layer(middleware::from_fn(
                system::auth::middleware::require_staff,
            )),
        )
        // ========================================
        // DOCUMENTS
        // ========================================
        .route(
            "/api/applications/:id/documents",
            get(handlers::a005_document::list_for_application)
                .post(handlers::a005_document::upload)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/documents/:id/download",
            get(handlers::a005_document::download)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // ========================================
        // AUDIT AND SETTINGS
        // ========================================
        .route(
            "/api/audit",
            get(handlers::audit::list).layer(middleware::from_fn(
                system::auth::middleware::require_admin,
            )),
        )
        .route(
            "/api/settings/markup",
            get(handlers::settings::get_markup)
                .put(handlers::settings::set_markup)
                .layer(middleware::from_fn(
                    system::auth::middleware::require_staff,
                )),
        )
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors);

    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", port, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
