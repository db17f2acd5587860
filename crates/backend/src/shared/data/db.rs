use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/dealership.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

async fn table_exists(conn: &DatabaseConnection, name: &str) -> anyhow::Result<bool> {
    let check = format!(
        "SELECT name FROM sqlite_master WHERE type='table' AND name='{}';",
        name
    );
    let rows = conn
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, check))
        .await?;
    Ok(!rows.is_empty())
}

async fn ensure_table(
    conn: &DatabaseConnection,
    name: &str,
    create_sql: &str,
) -> anyhow::Result<()> {
    if !table_exists(conn, name).await? {
        tracing::info!("Creating {} table", name);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_sql.to_string(),
        ))
        .await?;
    }
    Ok(())
}

async fn column_exists(
    conn: &DatabaseConnection,
    table: &str,
    column: &str,
) -> anyhow::Result<bool> {
    let pragma = format!("PRAGMA table_info('{}');", table);
    let cols = conn
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, pragma))
        .await?;
    for row in cols {
        let name: String = row.try_get("", "name").unwrap_or_default();
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Minimal schema bootstrap: all tables are created on first start,
/// existing databases only get additive column fixes.
async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    ensure_table(
        conn,
        "a001_cars_catalog",
        r#"
        CREATE TABLE a001_cars_catalog (
            id TEXT PRIMARY KEY NOT NULL,
            brand TEXT NOT NULL,
            model TEXT NOT NULL,
            year INTEGER NOT NULL,
            trim TEXT,
            body_type TEXT,
            mileage INTEGER,
            exterior_color TEXT,
            transmission TEXT,
            fuel_type TEXT,
            engine TEXT,
            vin TEXT,
            source_price_usd TEXT NOT NULL,
            dealer TEXT,
            location_city TEXT,
            image_url TEXT,
            photos TEXT NOT NULL DEFAULT '[]',
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "a002_applications",
        r#"
        CREATE TABLE a002_applications (
            id TEXT PRIMARY KEY NOT NULL,
            client_id TEXT NOT NULL,
            car_id TEXT NOT NULL,
            operator_id TEXT,
            manager_id TEXT,
            source_price_snapshot TEXT NOT NULL,
            markup_percent TEXT NOT NULL,
            final_price TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'new',
            contact_status TEXT NOT NULL DEFAULT 'not_touched',
            checklist TEXT NOT NULL DEFAULT '{}',
            rejection_reason TEXT,
            rejection_note TEXT,
            operator_comment TEXT,
            internal_note TEXT,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;

    // Оптимистическая блокировка появилась позже первой схемы:
    // старым базам добавляем колонку на месте.
    if !column_exists(conn, "a002_applications", "version").await? {
        tracing::info!("Adding version column to a002_applications");
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            "ALTER TABLE a002_applications ADD COLUMN version INTEGER NOT NULL DEFAULT 0;"
                .to_string(),
        ))
        .await?;
    }

    ensure_table(
        conn,
        "a002_status_history",
        r#"
        CREATE TABLE a002_status_history (
            id TEXT PRIMARY KEY NOT NULL,
            application_id TEXT NOT NULL,
            old_status TEXT,
            new_status TEXT NOT NULL,
            changed_by TEXT NOT NULL,
            reason TEXT,
            created_at TEXT NOT NULL
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "a002_application_comments",
        r#"
        CREATE TABLE a002_application_comments (
            id TEXT PRIMARY KEY NOT NULL,
            application_id TEXT NOT NULL,
            user_id TEXT NOT NULL,
            text TEXT NOT NULL,
            is_internal INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "a003_payments",
        r#"
        CREATE TABLE a003_payments (
            id TEXT PRIMARY KEY NOT NULL,
            application_id TEXT NOT NULL,
            invoice_number TEXT,
            amount TEXT NOT NULL,
            method TEXT NOT NULL,
            receipt_file_path TEXT,
            status TEXT NOT NULL DEFAULT 'pending',
            confirmed_by TEXT,
            confirmed_at TEXT,
            rejection_reason TEXT,
            created_by TEXT NOT NULL,
            created_at TEXT,
            updated_at TEXT
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "a004_blacklist",
        r#"
        CREATE TABLE a004_blacklist (
            id TEXT PRIMARY KEY NOT NULL,
            phone TEXT NOT NULL UNIQUE,
            reason TEXT NOT NULL,
            reason_note TEXT,
            strike_count INTEGER NOT NULL DEFAULT 1,
            block_type TEXT,
            blocked_until TEXT,
            added_by TEXT,
            created_at TEXT,
            updated_at TEXT
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "a005_documents",
        r#"
        CREATE TABLE a005_documents (
            id TEXT PRIMARY KEY NOT NULL,
            application_id TEXT NOT NULL,
            doc_type TEXT NOT NULL,
            file_path TEXT NOT NULL,
            original_filename TEXT NOT NULL,
            mime_type TEXT,
            file_hash TEXT NOT NULL,
            uploaded_by TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "sys_users",
        r#"
        CREATE TABLE sys_users (
            id TEXT PRIMARY KEY NOT NULL,
            username TEXT NOT NULL UNIQUE,
            phone TEXT,
            password_hash TEXT NOT NULL,
            full_name TEXT,
            role TEXT NOT NULL DEFAULT 'client',
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT,
            updated_at TEXT,
            last_login_at TEXT,
            created_by TEXT
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "sys_refresh_tokens",
        r#"
        CREATE TABLE sys_refresh_tokens (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL,
            token_hash TEXT NOT NULL,
            expires_at TEXT NOT NULL,
            created_at TEXT NOT NULL,
            revoked_at TEXT
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "sys_settings",
        r#"
        CREATE TABLE sys_settings (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            description TEXT,
            version INTEGER NOT NULL DEFAULT 0,
            updated_by TEXT,
            updated_at TEXT
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "sys_audit_log",
        r#"
        CREATE TABLE sys_audit_log (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT,
            action TEXT NOT NULL,
            entity_type TEXT NOT NULL,
            entity_id TEXT,
            old_value TEXT,
            new_value TEXT,
            reason TEXT,
            created_at TEXT NOT NULL
        );
    "#,
    )
    .await?;

    Ok(())
}
