//! Admin panel entities
//!
//! Concrete records shown by the panel's list screens. Each one projects its
//! columns through [`Listable::field`] using the same camelCase keys it is
//! serialized with, so filter/sort keys coming from the frontend line up with
//! the JSON the frontend already receives.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::domain::field_value::FieldValue;
use crate::domain::value_objects::WebsiteUrl;

/// The list screens backed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum EntityKind {
    Product,
    Seller,
    User,
    Website,
    Customer,
}

impl EntityKind {
    pub const ALL: [Self; 5] = [
        Self::Product,
        Self::Seller,
        Self::User,
        Self::Website,
        Self::Customer,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Seller => "seller",
            Self::User => "user",
            Self::Website => "website",
            Self::Customer => "customer",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record the list engine can search, filter and sort.
pub trait Listable {
    fn id(&self) -> &str;

    /// Value of the named column, `None` when the column is unknown or unset.
    fn field(&self, key: &str) -> Option<FieldValue>;
}

/// Listable records that belong to one of the panel's list screens.
pub trait KindedEntity: Listable {
    const KIND: EntityKind;
}

// ============================================================================
// Product
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ProductStatus {
    Active,
    Draft,
    Archived,
}

impl ProductStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Draft => "draft",
            Self::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub sku: String,
    pub category: String,
    pub seller_id: String,
    pub brand: Option<String>,
    pub price: f64,
    pub stock: u32,
    pub status: ProductStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Listable for Product {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(self.id.as_str().into()),
            "title" => Some(self.title.as_str().into()),
            "sku" => Some(self.sku.as_str().into()),
            "category" => Some(self.category.as_str().into()),
            "sellerId" => Some(self.seller_id.as_str().into()),
            "brand" => self.brand.as_deref().map(Into::into),
            "price" => Some(self.price.into()),
            "stock" => Some(self.stock.into()),
            "status" => Some(self.status.as_str().into()),
            "tags" => Some(self.tags.clone().into()),
            "createdAt" => Some(self.created_at.into()),
            _ => None,
        }
    }
}

impl KindedEntity for Product {
    const KIND: EntityKind = EntityKind::Product;
}

// ============================================================================
// Seller
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Seller {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    /// Average review score, unset until the first review.
    pub rating: Option<f64>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl Listable for Seller {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(self.id.as_str().into()),
            "name" => Some(self.name.as_str().into()),
            "email" => Some(self.email.as_str().into()),
            "phone" => self.phone.as_deref().map(Into::into),
            "city" => self.city.as_deref().map(Into::into),
            "rating" => self.rating.map(Into::into),
            "verified" => Some(self.verified.into()),
            "createdAt" => Some(self.created_at.into()),
            _ => None,
        }
    }
}

impl KindedEntity for Seller {
    const KIND: EntityKind = EntityKind::Seller;
}

// ============================================================================
// User
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum UserRole {
    Admin,
    Editor,
    Support,
    Viewer,
}

impl UserRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Support => "support",
            Self::Viewer => "viewer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Listable for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(self.id.as_str().into()),
            "fullName" => Some(self.full_name.as_str().into()),
            "email" => Some(self.email.as_str().into()),
            "phone" => self.phone.as_deref().map(Into::into),
            "role" => Some(self.role.as_str().into()),
            "active" => Some(self.active.into()),
            "createdAt" => Some(self.created_at.into()),
            "lastLoginAt" => self.last_login_at.map(Into::into),
            _ => None,
        }
    }
}

impl KindedEntity for User {
    const KIND: EntityKind = EntityKind::User;
}

// ============================================================================
// Website
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum WebsiteStatus {
    Online,
    Maintenance,
    Offline,
}

impl WebsiteStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Maintenance => "maintenance",
            Self::Offline => "offline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Website {
    pub id: String,
    pub title: String,
    #[ts(type = "string")]
    pub url: WebsiteUrl,
    pub owner_email: String,
    pub category: Option<String>,
    pub status: WebsiteStatus,
    pub created_at: DateTime<Utc>,
}

impl Listable for Website {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(self.id.as_str().into()),
            "title" => Some(self.title.as_str().into()),
            "url" => Some(self.url.as_str().into()),
            "domain" => Some(self.url.domain().into()),
            "ownerEmail" => Some(self.owner_email.as_str().into()),
            "category" => self.category.as_deref().map(Into::into),
            "status" => Some(self.status.as_str().into()),
            "createdAt" => Some(self.created_at.into()),
            _ => None,
        }
    }
}

impl KindedEntity for Website {
    const KIND: EntityKind = EntityKind::Website;
}

// ============================================================================
// Customer
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Customer {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub orders_count: u32,
    pub total_spent: f64,
    pub created_at: DateTime<Utc>,
}

impl Listable for Customer {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(self.id.as_str().into()),
            "fullName" => Some(self.full_name.as_str().into()),
            "email" => Some(self.email.as_str().into()),
            "phone" => self.phone.as_deref().map(Into::into),
            "city" => self.city.as_deref().map(Into::into),
            "ordersCount" => Some(self.orders_count.into()),
            "totalSpent" => Some(self.total_spent.into()),
            "createdAt" => Some(self.created_at.into()),
            _ => None,
        }
    }
}

impl KindedEntity for Customer {
    const KIND: EntityKind = EntityKind::Customer;
}
