use contracts::domain::a001_car::{Car, CarListParams, CarListResponse, CarView};
use contracts::enums::Role;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::shared::audit::{self, AuditEvent};
use crate::shared::data::db::get_connection;
use crate::shared::error::AppError;
use crate::shared::pricing;

use super::repository;

/// Живая витринная цена: наценка применяется на лету при каждой выдаче.
/// Снапшот в заявках от этого не зависит.
fn to_view(car: Car, markup: Decimal) -> CarView {
    let final_price_usd = pricing::calculate_final_price(car.source_price_usd, markup);
    CarView {
        car,
        final_price_usd,
        markup_percent: markup,
    }
}

/// VIN выдается только персоналу.
fn redact_for(car: &mut Car, role: Role) {
    if !role.is_staff() {
        car.vin = None;
    }
}

pub async fn list(mut params: CarListParams, role: Role) -> Result<CarListResponse, AppError> {
    // Клиент видит только активные машины, флаг only_active ему не дан.
    if !role.is_staff() {
        params.only_active = Some(true);
    }

    let markup = pricing::get_markup_percent().await?;

    // Клиентские границы цены заданы в витринных ценах; храним source,
    // поэтому переводим границы обратно: формула монотонна.
    let divisor = Decimal::ONE + markup / Decimal::from(100);
    if divisor > Decimal::ZERO {
        if let Some(from) = params.price_from {
            params.price_from = Some(from / divisor);
        }
        if let Some(to) = params.price_to {
            params.price_to = Some(to / divisor);
        }
    }

    let page = params.page.unwrap_or(1).max(1);
    let per_page = params.per_page.unwrap_or(20).clamp(1, 100);

    let (cars, total) = repository::list(&params).await?;
    let items = cars
        .into_iter()
        .map(|mut car| {
            redact_for(&mut car, role);
            to_view(car, markup)
        })
        .collect();

    let pages = if total == 0 { 0 } else { (total + per_page - 1) / per_page };
    Ok(CarListResponse {
        items,
        total,
        page,
        per_page,
        pages,
    })
}

pub async fn get(id: Uuid, role: Role) -> Result<CarView, AppError> {
    let mut car = repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("car"))?;

    if !car.is_active && !role.is_staff() {
        return Err(AppError::not_found("car"));
    }

    redact_for(&mut car, role);
    let markup = pricing::get_markup_percent().await?;
    Ok(to_view(car, markup))
}

/// Добавление машины в каталог (менеджер и выше).
pub async fn create(car: Car, actor: Uuid) -> Result<CarView, AppError> {
    repository::insert(&car).await?;

    let conn = get_connection();
    audit::service::record(
        conn,
        AuditEvent::new("car_created", "car")
            .entity(car.id.value())
            .user(actor)
            .new_state(serde_json::json!({
                "brand": car.brand,
                "model": car.model,
                "sourcePriceUsd": car.source_price_usd.to_string(),
            })),
    )
    .await?;

    let markup = pricing::get_markup_percent().await?;
    Ok(to_view(car, markup))
}

pub async fn update(mut car: Car) -> Result<CarView, AppError> {
    let existing = repository::get_by_id(car.id.value())
        .await?
        .ok_or_else(|| AppError::not_found("car"))?;

    car.metadata.created_at = existing.metadata.created_at;
    car.metadata.touch();
    repository::update(&car).await?;

    let markup = pricing::get_markup_percent().await?;
    Ok(to_view(car, markup))
}

/// Снятие с витрины вместо удаления: на машину могут ссылаться заявки.
pub async fn set_active(id: Uuid, is_active: bool, actor: Uuid) -> Result<(), AppError> {
    let mut car = repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("car"))?;

    if car.is_active == is_active {
        return Ok(());
    }

    car.is_active = is_active;
    car.metadata.touch();
    repository::update(&car).await?;

    let conn = get_connection();
    audit::service::record(
        conn,
        AuditEvent::new("car_active_changed", "car")
            .entity(id)
            .user(actor)
            .new_state(serde_json::json!({ "isActive": is_active })),
    )
    .await?;

    Ok(())
}
