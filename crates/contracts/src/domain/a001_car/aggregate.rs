use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::EntityMetadata;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CarId(pub Uuid);

impl CarId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Автомобиль из каталога. `source_price_usd` — живая цена источника,
/// используется только в момент создания заявки для снапшота.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub id: CarId,
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
    /// VIN скрыт от клиентов, выдается только персоналу.
    pub vin: Option<String>,
    #[serde(rename = "sourcePriceUsd")]
    pub source_price_usd: Decimal,
    pub dealer: Option<String>,
    pub location_city: Option<String>,
    pub image_url: Option<String>,
    pub photos: Vec<String>,
    pub is_active: bool,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

/// Представление для выдачи наружу: живая цена с наценкой считается
/// на лету и никогда не персистится.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarView {
    #[serde(flatten)]
    pub car: Car,
    #[serde(rename = "finalPriceUsd")]
    pub final_price_usd: Decimal,
    #[serde(rename = "markupPercent")]
    pub markup_percent: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarListParams {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub price_from: Option<Decimal>,
    pub price_to: Option<Decimal>,
    pub only_active: Option<bool>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarListResponse {
    pub items: Vec<CarView>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub pages: u64,
}

impl Car {
    pub fn new_for_insert(brand: String, model: String, year: i32, source_price_usd: Decimal) -> Self {
        Self {
            id: CarId::new_v4(),
            brand,
            model,
            year,
            trim: None,
            body_type: None,
            mileage: None,
            exterior_color: None,
            transmission: None,
            fuel_type: None,
            engine: None,
            vin: None,
            source_price_usd,
            dealer: None,
            location_city: None,
            image_url: None,
            photos: Vec::new(),
            is_active: true,
            metadata: EntityMetadata::new(),
        }
    }
}
