//! API DTOs (Data Transfer Objects)
//!
//! Money travels as JSON numbers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entity::{
    order::{LineItem, Order},
    product::{Product, ProductFacets},
};
use crate::domain::value_object::shipping_address::ShippingAddress;

// ============================================================================
// Orders
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddressRequest {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemRequest {
    /// Product id
    pub product: String,
    pub quantity: i64,
}

/// Create order request. Any `user` field is ignored: the owner comes
/// from the bearer token.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub products: Vec<OrderItemRequest>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_amount: Option<Decimal>,
    pub shipping_address: Option<ShippingAddressRequest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderItemResponse {
    pub product: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl From<&LineItem> for OrderItemResponse {
    fn from(item: &LineItem) -> Self {
        Self {
            product: item.product_id.to_string(),
            quantity: item.quantity,
            price: item.unit_price,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    /// Owner id, `null` for guest orders
    pub user: Option<String>,
    pub products: Vec<OrderItemResponse>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub status: String,
    pub shipping_address: ShippingAddress,
    pub payment_status: String,
    pub invoice_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.order_id.to_string(),
            user: order.user_id.map(|id| id.to_string()),
            products: order.items.iter().map(OrderItemResponse::from).collect(),
            total_amount: order.total_amount,
            status: order.status.code().to_string(),
            shipping_address: order.shipping_address.clone(),
            payment_status: order.payment_status.code().to_string(),
            invoice_number: order.invoice_number.as_str().to_string(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentStatusRequest {
    #[serde(default)]
    pub payment_status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersQuery {
    pub user_id: Option<String>,
}

// ============================================================================
// Products
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacetsDto {
    #[serde(default)]
    pub style: Vec<String>,
    #[serde(default)]
    pub fabric: Vec<String>,
    #[serde(default)]
    pub occasion: Vec<String>,
    #[serde(default, rename = "type")]
    pub kind: Vec<String>,
}

impl From<FacetsDto> for ProductFacets {
    fn from(dto: FacetsDto) -> Self {
        Self {
            style: dto.style,
            fabric: dto.fabric,
            occasion: dto.occasion,
            kind: dto.kind,
        }
    }
}

impl From<&ProductFacets> for FacetsDto {
    fn from(facets: &ProductFacets) -> Self {
        Self {
            style: facets.style.clone(),
            fabric: facets.fabric.clone(),
            occasion: facets.occasion.clone(),
            kind: facets.kind.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub categories: FacetsDto,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i32,
    pub category: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub image: Option<String>,
    pub categories: FacetsDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.product_id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            stock: product.stock,
            category: product.category.code().to_string(),
            sizes: product.sizes.clone(),
            colors: product.colors.clone(),
            image: product.image.clone(),
            categories: FacetsDto::from(&product.facets),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
