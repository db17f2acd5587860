use chrono::Utc;
use contracts::domain::a002_application::{
    Application, ApplicationComment, ApplicationCreateDto, ApplicationDetail,
    ApplicationListParams, ApplicationListResponse, ChecklistUpdateDto, CommentCreateDto,
    ContactStatusUpdateDto, ManualApplicationCreateDto, StatusUpdateDto,
};
use contracts::domain::a003_payment::Payment;
use contracts::enums::{ApplicationStatus, ContactStatus, Role};
use sea_orm::{ConnectionTrait, TransactionTrait};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{a001_car, a003_payment, a004_blacklist, a005_document};
use crate::shared::audit::{self, AuditEvent};
use crate::shared::data::db::get_connection;
use crate::shared::error::AppError;
use crate::shared::notify::telegram;
use crate::shared::pricing;
use crate::system::users;

use super::{comments, history, repository, workflow};

/// Авто-назначение: первое действие персонала занимает свободный слот
/// оператора либо менеджера. Занятый слот никогда не перезаписывается.
fn ensure_assigned(app: &mut Application, actor: Uuid, role: Role) -> Option<&'static str> {
    match role {
        Role::Operator if app.operator_id.is_none() => {
            app.operator_id = Some(actor);
            Some("operator")
        }
        Role::Manager | Role::Admin if app.manager_id.is_none() => {
            app.manager_id = Some(actor);
            Some("manager")
        }
        _ => None,
    }
}

/// Механика смены статуса: versioned-апдейт заявки, строка истории и
/// запись аудита — одним куском, внутри переданной транзакции.
///
/// Статус и причина уже выставлены вызывающей стороной; здесь только
/// персист и журналы. Ноль затронутых строк означает параллельное
/// изменение — вся транзакция откатывается с Conflict.
pub(crate) async fn persist_status_change_txn<C: ConnectionTrait>(
    conn: &C,
    app: &mut Application,
    old_status: ApplicationStatus,
    actor: Uuid,
    reason: Option<String>,
) -> Result<(), AppError> {
    app.metadata.touch();
    let expected_version = app.metadata.version;
    let rows = repository::update_versioned_txn(conn, app, expected_version).await?;
    if rows == 0 {
        return Err(AppError::conflict(
            "application was modified concurrently, retry with fresh state",
        ));
    }
    app.metadata.version = expected_version + 1;

    history::insert_txn(
        conn,
        app.id.value(),
        Some(old_status),
        app.status,
        actor,
        reason.clone(),
    )
    .await?;

    audit::service::record(
        conn,
        AuditEvent::new("application_status_changed", "application")
            .entity(app.id.value())
            .user(actor)
            .old(json!({ "status": old_status.code() }))
            .new_state(json!({ "status": app.status.code(), "reason": reason })),
    )
    .await?;

    Ok(())
}

async fn persist_plain_update_txn<C: ConnectionTrait>(
    conn: &C,
    app: &mut Application,
) -> Result<(), AppError> {
    app.metadata.touch();
    let expected_version = app.metadata.version;
    let rows = repository::update_versioned_txn(conn, app, expected_version).await?;
    if rows == 0 {
        return Err(AppError::conflict(
            "application was modified concurrently, retry with fresh state",
        ));
    }
    app.metadata.version = expected_version + 1;
    Ok(())
}

async fn record_auto_assignment_txn<C: ConnectionTrait>(
    conn: &C,
    app: &Application,
    slot: &'static str,
    actor: Uuid,
) -> Result<(), AppError> {
    audit::service::record(
        conn,
        AuditEvent::new("application_auto_assigned", "application")
            .entity(app.id.value())
            .user(actor)
            .new_state(json!({ "slot": slot, "userId": actor.to_string() })),
    )
    .await
}

/// Создание заявки клиентом (самообслуживание).
///
/// Черный список, активность машины и ценовой снапшот проверяются и
/// фиксируются здесь; заявка, начальная строка истории и аудит пишутся
/// одной транзакцией.
pub async fn create(client_id: Uuid, dto: ApplicationCreateDto) -> Result<Application, AppError> {
    let client = users::repository::get_by_id(&client_id.to_string())
        .await?
        .ok_or_else(|| AppError::not_found("user"))?;

    if let Some(ref phone) = client.phone {
        a004_blacklist::service::ensure_not_blocked(phone).await?;
    }

    let car = a001_car::repository::get_by_id(dto.car_id)
        .await?
        .ok_or_else(|| AppError::not_found("car"))?;
    if !car.is_active {
        return Err(AppError::precondition(
            "car_active",
            "car is no longer available",
        ));
    }

    let (final_price, markup) = pricing::get_final_price(car.source_price_usd).await?;
    let app = Application::new_for_insert(
        client_id,
        dto.car_id,
        car.source_price_usd,
        markup,
        final_price,
    );

    let conn = get_connection();
    let txn = conn.begin().await.map_err(AppError::from)?;

    repository::insert_txn(&txn, &app).await?;
    history::insert_txn(&txn, app.id.value(), None, app.status, client_id, None).await?;
    audit::service::record(
        &txn,
        AuditEvent::new("application_created", "application")
            .entity(app.id.value())
            .user(client_id)
            .new_state(json!({
                "carId": dto.car_id.to_string(),
                "sourcePriceSnapshot": app.source_price_snapshot.to_string(),
                "markupPercent": app.markup_percent.to_string(),
                "finalPrice": app.final_price.to_string(),
            })),
    )
    .await?;

    txn.commit().await.map_err(AppError::from)?;

    telegram::notify(telegram::new_application_message(
        app.id.value(),
        &format!("{} {} {}", car.brand, car.model, car.year),
        &app.final_price.to_string(),
    ));

    tracing::info!(
        "application {} created for car {} at {}",
        app.id.value(),
        dto.car_id,
        app.final_price
    );
    Ok(app)
}

/// Ручное создание заявки персоналом: телефонный лид или офлайн-продажа.
///
/// Черный список здесь не проверяется (персонал действует осознанно),
/// неактивная машина допустима. Клиент либо указан по id, либо
/// находится/заводится по телефону.
pub async fn create_manual(
    dto: ManualApplicationCreateDto,
    actor: Uuid,
    role: Role,
) -> Result<Application, AppError> {
    if !role.is_staff() {
        return Err(AppError::forbidden("staff rank required"));
    }

    let client_id = match (dto.client_id, dto.client_phone.as_deref()) {
        (Some(id), _) => {
            users::repository::get_by_id(&id.to_string())
                .await?
                .ok_or_else(|| AppError::not_found("user"))?;
            id
        }
        (None, Some(phone)) => {
            let client =
                users::service::ensure_client_by_phone(phone, dto.client_name.as_deref(), actor)
                    .await?;
            Uuid::parse_str(&client.id)
                .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?
        }
        (None, None) => {
            return Err(AppError::precondition(
                "client",
                "either clientId or clientPhone is required",
            ));
        }
    };

    let car = a001_car::repository::get_by_id(dto.car_id)
        .await?
        .ok_or_else(|| AppError::not_found("car"))?;

    let (final_price, markup) = pricing::get_final_price(car.source_price_usd).await?;
    let mut app = Application::new_for_insert(
        client_id,
        dto.car_id,
        car.source_price_usd,
        markup,
        final_price,
    );
    // Лид уже прозвонен: персонал заводит заявку после разговора.
    app.contact_status = ContactStatus::Contacted;
    app.checklist.confirmed_interest = true;
    if let Some(ref source) = dto.source {
        app.internal_note = Some(format!("source: {}", source));
    }
    let assigned = ensure_assigned(&mut app, actor, role);

    let conn = get_connection();
    let txn = conn.begin().await.map_err(AppError::from)?;

    repository::insert_txn(&txn, &app).await?;
    history::insert_txn(&txn, app.id.value(), None, app.status, actor, dto.source.clone())
        .await?;
    audit::service::record(
        &txn,
        AuditEvent::new("admin_application_created", "application")
            .entity(app.id.value())
            .user(actor)
            .new_state(json!({
                "carId": dto.car_id.to_string(),
                "clientId": client_id.to_string(),
                "manual": true,
                "source": dto.source,
                "finalPrice": app.final_price.to_string(),
            })),
    )
    .await?;
    if let Some(slot) = assigned {
        record_auto_assignment_txn(&txn, &app, slot, actor).await?;
    }

    txn.commit().await.map_err(AppError::from)?;
    Ok(app)
}

/// Переход статуса — центральная операция воркфлоу.
///
/// Предусловия проверяются по свежему состоянию внутри транзакции;
/// мутация, история, аудит и побочные эффекты (авто-платеж на PAID)
/// коммитятся как одно целое.
pub async fn transition(
    id: Uuid,
    dto: StatusUpdateDto,
    actor: Uuid,
    role: Role,
) -> Result<Application, AppError> {
    let conn = get_connection();
    let txn = conn.begin().await.map_err(AppError::from)?;

    let mut app = repository::get_by_id_txn(&txn, id)
        .await?
        .ok_or_else(|| AppError::not_found("application"))?;

    let has_contract = if dto.status == ApplicationStatus::ContractSigned {
        a005_document::repository::has_contract_txn(&txn, id).await?
    } else {
        false
    };

    workflow::check_transition(&app, dto.status, role, has_contract)?;

    let old_status = app.status;
    app.status = dto.status;
    if dto.status == ApplicationStatus::Cancelled {
        app.rejection_reason = dto.rejection_reason;
        app.rejection_note = dto.rejection_note.clone();
    }
    let assigned = ensure_assigned(&mut app, actor, role);

    persist_status_change_txn(&txn, &mut app, old_status, actor, dto.reason.clone()).await?;

    if let Some(slot) = assigned {
        record_auto_assignment_txn(&txn, &app, slot, actor).await?;
    }

    // PAID: если подтвержденного платежа еще нет, фиксируем оплату
    // наличными на полную цену заявки от имени того же менеджера.
    if dto.status == ApplicationStatus::Paid
        && !a003_payment::repository::has_confirmed_txn(&txn, id).await?
    {
        let payment = Payment::new_auto_confirmed(id, app.final_price, actor);
        a003_payment::repository::insert_txn(&txn, &payment).await?;
        audit::service::record(
            &txn,
            AuditEvent::new("payment_auto_created", "payment")
                .entity(payment.id.value())
                .user(actor)
                .new_state(json!({
                    "applicationId": id.to_string(),
                    "amount": payment.amount.to_string(),
                    "method": payment.method.code(),
                })),
        )
        .await?;
    }

    txn.commit().await.map_err(AppError::from)?;

    tracing::info!(
        "application {} moved {} -> {} by {}",
        id,
        old_status.code(),
        app.status.code(),
        actor
    );
    Ok(app)
}

/// Статус прозвона. Не аудируется: журналируются только смены статуса
/// и назначения.
pub async fn update_contact_status(
    id: Uuid,
    dto: ContactStatusUpdateDto,
    actor: Uuid,
    role: Role,
) -> Result<Application, AppError> {
    if !role.is_staff() {
        return Err(AppError::forbidden("staff rank required"));
    }

    let conn = get_connection();
    let txn = conn.begin().await.map_err(AppError::from)?;

    let mut app = repository::get_by_id_txn(&txn, id)
        .await?
        .ok_or_else(|| AppError::not_found("application"))?;

    app.contact_status = dto.contact_status;
    if let Some(ref note) = dto.note {
        app.append_operator_comment(Utc::now(), note);
    }
    let assigned = ensure_assigned(&mut app, actor, role);

    persist_plain_update_txn(&txn, &mut app).await?;
    if let Some(slot) = assigned {
        record_auto_assignment_txn(&txn, &app, slot, actor).await?;
    }

    txn.commit().await.map_err(AppError::from)?;
    Ok(app)
}

pub async fn update_checklist(
    id: Uuid,
    dto: ChecklistUpdateDto,
    actor: Uuid,
    role: Role,
) -> Result<Application, AppError> {
    if !role.is_staff() {
        return Err(AppError::forbidden("staff rank required"));
    }

    let conn = get_connection();
    let txn = conn.begin().await.map_err(AppError::from)?;

    let mut app = repository::get_by_id_txn(&txn, id)
        .await?
        .ok_or_else(|| AppError::not_found("application"))?;

    app.checklist = dto.checklist;
    let assigned = ensure_assigned(&mut app, actor, role);

    persist_plain_update_txn(&txn, &mut app).await?;
    if let Some(slot) = assigned {
        record_auto_assignment_txn(&txn, &app, slot, actor).await?;
    }

    txn.commit().await.map_err(AppError::from)?;
    Ok(app)
}

/// Явное назначение оператора или менеджера (менеджер и выше).
/// В отличие от авто-назначения, занятый слот перезаписывается.
pub async fn assign(
    id: Uuid,
    slot_role: Role,
    user_id: Uuid,
    actor: Uuid,
    role: Role,
) -> Result<Application, AppError> {
    if role < Role::Manager {
        return Err(AppError::forbidden("manager rank required"));
    }

    let assignee = users::repository::get_by_id(&user_id.to_string())
        .await?
        .ok_or_else(|| AppError::not_found("user"))?;
    if assignee.role < slot_role {
        return Err(AppError::precondition(
            "assignee_rank",
            "user rank is below the requested slot",
        ));
    }

    let conn = get_connection();
    let txn = conn.begin().await.map_err(AppError::from)?;

    let mut app = repository::get_by_id_txn(&txn, id)
        .await?
        .ok_or_else(|| AppError::not_found("application"))?;

    let slot = match slot_role {
        Role::Operator => {
            app.operator_id = Some(user_id);
            "operator"
        }
        _ => {
            app.manager_id = Some(user_id);
            "manager"
        }
    };

    persist_plain_update_txn(&txn, &mut app).await?;
    audit::service::record(
        &txn,
        AuditEvent::new("application_assigned", "application")
            .entity(id)
            .user(actor)
            .new_state(json!({ "slot": slot, "userId": user_id.to_string() })),
    )
    .await?;

    txn.commit().await.map_err(AppError::from)?;
    Ok(app)
}

pub async fn list(
    mut params: ApplicationListParams,
    actor: Uuid,
    role: Role,
) -> Result<ApplicationListResponse, AppError> {
    // Клиент видит только собственные заявки, фильтры персонала ему не даны.
    if !role.is_staff() {
        params.client_id = Some(actor);
        params.my_only = None;
        params.unassigned = None;
        params.operator_id = None;
    }

    let page = params.page.unwrap_or(1).max(1);
    let per_page = params.per_page.unwrap_or(20).clamp(1, 100);
    let (mut items, total) = repository::list(&params, actor).await?;
    for app in &mut items {
        redact(app, role);
    }

    let pages = if total == 0 { 0 } else { (total + per_page - 1) / per_page };
    Ok(ApplicationListResponse {
        items,
        total,
        page,
        per_page,
        pages,
    })
}

fn redact(app: &mut Application, role: Role) {
    if role < Role::Admin {
        app.internal_note = None;
    }
    if !role.is_staff() {
        app.operator_comment = None;
    }
}

pub async fn get_detail(id: Uuid, actor: Uuid, role: Role) -> Result<ApplicationDetail, AppError> {
    let mut app = repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("application"))?;

    if !role.is_staff() && app.client_id != actor {
        return Err(AppError::forbidden("not your application"));
    }
    redact(&mut app, role);

    let status_history = history::list_for_application(id).await?;

    // Живая витринная цена машины — для сравнения со снапшотом заявки.
    let car_live_price = match a001_car::repository::get_by_id(app.car_id).await? {
        Some(car) => {
            let markup = pricing::get_markup_percent().await?;
            Some(pricing::calculate_final_price(car.source_price_usd, markup))
        }
        None => None,
    };

    Ok(ApplicationDetail {
        application: app,
        status_history,
        car_live_price,
    })
}

pub async fn add_comment(
    id: Uuid,
    dto: CommentCreateDto,
    actor: Uuid,
    role: Role,
) -> Result<ApplicationComment, AppError> {
    let app = repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("application"))?;

    if !role.is_staff() && app.client_id != actor {
        return Err(AppError::forbidden("not your application"));
    }

    let comment = ApplicationComment {
        id: Uuid::new_v4(),
        application_id: id,
        user_id: actor,
        text: dto.text,
        // Клиент не может оставить скрытый от себя комментарий.
        is_internal: dto.is_internal && role.is_staff(),
        created_at: Utc::now(),
    };
    comments::insert(&comment).await?;
    Ok(comment)
}

pub async fn list_comments(
    id: Uuid,
    actor: Uuid,
    role: Role,
) -> Result<Vec<ApplicationComment>, AppError> {
    let app = repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("application"))?;

    if !role.is_staff() && app.client_id != actor {
        return Err(AppError::forbidden("not your application"));
    }

    let items = comments::list_for_application(id, role.is_staff()).await?;
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_car::Car;
    use contracts::domain::a002_application::Checklist;
    use contracts::domain::a004_blacklist::BlacklistCreateDto;
    use contracts::enums::{BlacklistReason, BlockType, ContactStatus, DocumentType};
    use contracts::system::users::CreateUserDto;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    use crate::shared::config::{
        Config, DatabaseConfig, PricingConfig, ServerConfig, TelegramConfig, UploadsConfig,
    };

    async fn seed_user(username: &str, phone: Option<&str>, role: Role) -> Uuid {
        let id = users::service::create(
            CreateUserDto {
                username: username.to_string(),
                password: "secret".to_string(),
                phone: phone.map(|p| p.to_string()),
                full_name: Some(username.to_string()),
                role,
            },
            None,
        )
        .await
        .unwrap();
        Uuid::parse_str(&id).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn status_dto(status: ApplicationStatus) -> StatusUpdateDto {
        StatusUpdateDto {
            status,
            reason: None,
            rejection_reason: None,
            rejection_note: None,
        }
    }

    // Один сквозной сценарий на процесс: соединение с базой глобально,
    // поэтому все проверки воронки живут в одном последовательном тесте.
    #[tokio::test]
    async fn test_full_application_pipeline() {
        let db_path = format!("target/test_db/pipeline_{}.db", Uuid::new_v4());
        crate::shared::config::init_config(Config {
            database: DatabaseConfig {
                path: db_path.clone(),
            },
            server: ServerConfig::default(),
            pricing: PricingConfig::default(),
            uploads: UploadsConfig {
                dir: format!("target/test_uploads/{}", Uuid::new_v4()),
            },
            telegram: TelegramConfig::default(),
        });
        crate::shared::data::db::initialize_database(Some(&db_path))
            .await
            .unwrap();
        crate::system::initialization::seed_settings().await.unwrap();

        let operator = seed_user("operator", Some("+971500000010"), Role::Operator).await;
        let manager = seed_user("manager", Some("+971500000011"), Role::Manager).await;
        let client = seed_user("client", Some("+971500000012"), Role::Client).await;
        let blocked = seed_user("blocked", Some("+971500000013"), Role::Client).await;

        let car = Car::new_for_insert(
            "Toyota".to_string(),
            "Camry".to_string(),
            2022,
            dec("28000.00"),
        );
        let car_id = car.id.value();
        crate::domain::a001_car::repository::insert(&car).await.unwrap();

        // Снапшот цены: 28000 * 1.12.
        let mut app = create(client, ApplicationCreateDto { car_id }).await.unwrap();
        assert_eq!(app.status, ApplicationStatus::New);
        assert_eq!(app.final_price, dec("31360.00"));
        assert_eq!(app.markup_percent, dec("12.0"));
        let created_version = app.metadata.version;
        let app_id = app.id.value();

        // Первое действие оператора занимает свободный слот.
        app = transition(app_id, status_dto(ApplicationStatus::InCallcenter), operator, Role::Operator)
            .await
            .unwrap();
        assert_eq!(app.operator_id, Some(operator));
        assert!(app.metadata.version > created_version);

        // CONFIRMED закрыт, пока не согласован визит.
        let err = transition(app_id, status_dto(ApplicationStatus::Confirmed), operator, Role::Operator)
            .await
            .unwrap_err();
        match err {
            AppError::PreconditionFailed { gate, .. } => assert_eq!(gate, "agreed_visit"),
            other => panic!("unexpected error: {other}"),
        }

        app = update_checklist(
            app_id,
            ChecklistUpdateDto {
                checklist: Checklist {
                    agreed_visit: true,
                    ..Checklist::default()
                },
            },
            operator,
            Role::Operator,
        )
        .await
        .unwrap();
        assert!(app.checklist.agreed_visit);
        // Слот оператора занят, второе действие его не трогает.
        assert_eq!(app.operator_id, Some(operator));

        transition(app_id, status_dto(ApplicationStatus::Confirmed), operator, Role::Operator)
            .await
            .unwrap();
        app = transition(app_id, status_dto(ApplicationStatus::WaitingPayment), manager, Role::Manager)
            .await
            .unwrap();
        assert_eq!(app.manager_id, Some(manager));

        // PAID закрыт для оператора.
        let err = transition(app_id, status_dto(ApplicationStatus::Paid), operator, Role::Operator)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "forbidden");

        // PAID менеджером: авто-платеж наличными на полную цену.
        transition(app_id, status_dto(ApplicationStatus::Paid), manager, Role::Manager)
            .await
            .unwrap();
        let payments = a003_payment::repository::list_for_application(app_id).await.unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].amount, dec("31360.00"));

        // CONTRACT_SIGNED без договора — гейт.
        let err = transition(app_id, status_dto(ApplicationStatus::ContractSigned), manager, Role::Manager)
            .await
            .unwrap_err();
        match err {
            AppError::PreconditionFailed { gate, .. } => assert_eq!(gate, "contract_document"),
            other => panic!("unexpected error: {other}"),
        }

        a005_document::service::upload(
            app_id,
            DocumentType::Contract,
            "contract.pdf".to_string(),
            Some("application/pdf".to_string()),
            b"signed contract".to_vec(),
            manager,
            Role::Manager,
        )
        .await
        .unwrap();
        app = transition(app_id, status_dto(ApplicationStatus::ContractSigned), manager, Role::Manager)
            .await
            .unwrap();

        // Устаревшая версия не перезаписывает заявку.
        let stale = app.clone();
        let conn = get_connection();
        let rows = repository::update_versioned_txn(conn, &stale, stale.metadata.version - 1)
            .await
            .unwrap();
        assert_eq!(rows, 0);

        // Отмена из активного статуса и заморозка терминального.
        transition(app_id, status_dto(ApplicationStatus::Cancelled), manager, Role::Manager)
            .await
            .unwrap();
        let err = transition(app_id, status_dto(ApplicationStatus::New), manager, Role::Manager)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "conflict");

        // История: начальная запись + по строке на каждый переход.
        let hist = history::list_for_application(app_id).await.unwrap();
        assert_eq!(hist.len(), 7);
        assert_eq!(hist[0].old_status, None);
        assert_eq!(hist[6].new_status, ApplicationStatus::Cancelled);

        // Черный список закрывает самообслуживание.
        a004_blacklist::service::add(
            BlacklistCreateDto {
                phone: "+971500000013".to_string(),
                reason: BlacklistReason::NoShow,
                reason_note: None,
                block_type: BlockType::Days30,
            },
            manager,
            Role::Manager,
        )
        .await
        .unwrap();
        let err = create(blocked, ApplicationCreateDto { car_id }).await.unwrap_err();
        assert_eq!(err.kind(), "forbidden");

        // Ручная заявка по телефону: клиент заводится, оператор назначается.
        let manual = create_manual(
            ManualApplicationCreateDto {
                car_id,
                client_id: None,
                client_phone: Some("+971500000099".to_string()),
                client_name: Some("Walk-in".to_string()),
                source: Some("phone".to_string()),
            },
            operator,
            Role::Operator,
        )
        .await
        .unwrap();
        assert_eq!(manual.operator_id, Some(operator));

        // Клиент в списке видит только свое и без служебных полей.
        let listed = list(ApplicationListParams::default(), client, Role::Client)
            .await
            .unwrap();
        assert_eq!(listed.total, 1);
        assert_eq!(listed.items[0].client_id, client);

        // Статус прозвона дописывает комментарий оператора.
        let manual_id = manual.id.value();
        let touched = update_contact_status(
            manual_id,
            ContactStatusUpdateDto {
                contact_status: ContactStatus::Contacted,
                note: Some("подтвердил интерес".to_string()),
            },
            operator,
            Role::Operator,
        )
        .await
        .unwrap();
        assert_eq!(touched.contact_status, ContactStatus::Contacted);
        assert!(touched
            .operator_comment
            .as_deref()
            .unwrap_or("")
            .contains("подтвердил интерес"));
    }
}
