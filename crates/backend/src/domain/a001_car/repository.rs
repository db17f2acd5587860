use chrono::Utc;
use contracts::domain::a001_car::{Car, CarId, CarListParams};
use contracts::domain::common::EntityMetadata;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_cars_catalog")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub trim: Option<String>,
    pub body_type: Option<String>,
    pub mileage: Option<i32>,
    pub exterior_color: Option<String>,
    pub transmission: Option<String>,
    pub fuel_type: Option<String>,
    pub engine: Option<String>,
    pub vin: Option<String>,
    /// Деньги хранятся текстом: sqlite не умеет DECIMAL без потерь.
    pub source_price_usd: String,
    pub dealer: Option<String>,
    pub location_city: Option<String>,
    pub image_url: Option<String>,
    pub photos: String,
    pub is_active: i32,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Car {
    fn from(m: Model) -> Self {
        let now = Utc::now();
        Car {
            id: CarId::new(Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4())),
            brand: m.brand,
            model: m.model,
            year: m.year,
            trim: m.trim,
            body_type: m.body_type,
            mileage: m.mileage,
            exterior_color: m.exterior_color,
            transmission: m.transmission,
            fuel_type: m.fuel_type,
            engine: m.engine,
            vin: m.vin,
            source_price_usd: Decimal::from_str(&m.source_price_usd).unwrap_or_default(),
            dealer: m.dealer,
            location_city: m.location_city,
            image_url: m.image_url,
            photos: serde_json::from_str(&m.photos).unwrap_or_default(),
            is_active: m.is_active != 0,
            metadata: EntityMetadata {
                created_at: m
                    .created_at
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(now),
                updated_at: m
                    .updated_at
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(now),
                version: m.version,
            },
        }
    }
}

fn to_active_model(car: &Car) -> ActiveModel {
    ActiveModel {
        id: Set(car.id.value().to_string()),
        brand: Set(car.brand.clone()),
        model: Set(car.model.clone()),
        year: Set(car.year),
        trim: Set(car.trim.clone()),
        body_type: Set(car.body_type.clone()),
        mileage: Set(car.mileage),
        exterior_color: Set(car.exterior_color.clone()),
        transmission: Set(car.transmission.clone()),
        fuel_type: Set(car.fuel_type.clone()),
        engine: Set(car.engine.clone()),
        vin: Set(car.vin.clone()),
        source_price_usd: Set(car.source_price_usd.to_string()),
        dealer: Set(car.dealer.clone()),
        location_city: Set(car.location_city.clone()),
        image_url: Set(car.image_url.clone()),
        photos: Set(serde_json::to_string(&car.photos).unwrap_or_else(|_| "[]".to_string())),
        is_active: Set(if car.is_active { 1 } else { 0 }),
        created_at: Set(Some(car.metadata.created_at.to_rfc3339())),
        updated_at: Set(Some(car.metadata.updated_at.to_rfc3339())),
        version: Set(car.metadata.version),
    }
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Car>, DbErr> {
    let conn = get_connection();
    let found = Entity::find_by_id(id.to_string()).one(conn).await?;
    Ok(found.map(Into::into))
}

pub async fn insert(car: &Car) -> Result<(), DbErr> {
    let conn = get_connection();
    to_active_model(car).insert(conn).await?;
    Ok(())
}

pub async fn update(car: &Car) -> Result<(), DbErr> {
    let conn = get_connection();
    to_active_model(car).update(conn).await?;
    Ok(())
}

/// Каталог с фильтрами. Фильтр по цене идет по source_price_usd:
/// наценка одинакова для всех машин и порядок не меняет.
pub async fn list(params: &CarListParams) -> Result<(Vec<Car>, u64), DbErr> {
    let conn = get_connection();

    let mut query = Entity::find()
        .order_by_asc(Column::Brand)
        .order_by_asc(Column::Model);

    if params.only_active.unwrap_or(true) {
        query = query.filter(Column::IsActive.eq(1));
    }
    if let Some(ref brand) = params.brand {
        query = query.filter(Column::Brand.eq(brand.clone()));
    }
    if let Some(ref model) = params.model {
        query = query.filter(Column::Model.eq(model.clone()));
    }
    if let Some(year_from) = params.year_from {
        query = query.filter(Column::Year.gte(year_from));
    }
    if let Some(year_to) = params.year_to {
        query = query.filter(Column::Year.lte(year_to));
    }
    // Границы цены приходят уже пересчитанными к source-цене (см. service).
    if let Some(price_from) = params.price_from {
        query = query.filter(Expr::cust_with_values(
            "CAST(source_price_usd AS REAL) >= ?",
            [price_from.to_f64().unwrap_or(0.0)],
        ));
    }
    if let Some(price_to) = params.price_to {
        query = query.filter(Expr::cust_with_values(
            "CAST(source_price_usd AS REAL) <= ?",
            [price_to.to_f64().unwrap_or(f64::MAX)],
        ));
    }

    let page = params.page.unwrap_or(1).max(1);
    let per_page = params.per_page.unwrap_or(20).clamp(1, 100);

    let paginator = query.paginate(conn, per_page);
    let total = paginator.num_items().await?;
    let cars: Vec<Car> = paginator
        .fetch_page(page - 1)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((cars, total))
}
