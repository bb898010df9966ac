//! Shop product domain entity and related types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::validate::validate_non_negative_amount;

/// Product sold in the rewards shop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub stock: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Product {
    pub fn new(data: CreateProduct) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: data.name,
            description: data.description,
            price: data.price,
            category: data.category,
            stock: data.stock,
            image_url: data.image_url,
        }
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    pub fn apply(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(image_url) = update.image_url {
            self.image_url = Some(image_url);
        }
    }
}

/// Product creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(custom(
        function = "validate_non_negative_amount",
        message = "Price cannot be negative"
    ))]
    pub price: Decimal,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Product update data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProduct {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(custom(
        function = "validate_non_negative_amount",
        message = "Price cannot be negative"
    ))]
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub stock: Option<u32>,
    pub image_url: Option<String>,
}
