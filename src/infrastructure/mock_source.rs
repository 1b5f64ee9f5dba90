//! In-memory entity source backed by a generated mock catalog
//!
//! Stands in for the panel's REST endpoints: every `fetch_all` returns a copy
//! of the stored collection. Collections can be swapped at runtime to model
//! a data refresh.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{
    Customer, EntitySource, Product, ProductStatus, Seller, User, UserRole, Website,
    WebsiteStatus, WebsiteUrl,
};
use crate::infrastructure::config::MockDataConfig;

/// 2025-01-01T00:00:00Z; generated timestamps count back from here.
const CATALOG_EPOCH_SECS: i64 = 1_735_689_600;

const CATEGORIES: [&str; 6] = ["electronics", "books", "home", "toys", "fashion", "sports"];
const BRANDS: [&str; 5] = ["Acme", "Globex", "Initech", "Umbrella", "Hooli"];
const TAGS: [&str; 6] = ["new", "sale", "featured", "eco", "limited", "bundle"];
const FIRST_NAMES: [&str; 8] = ["Sara", "Ali", "Mina", "Reza", "Nora", "Omid", "Lena", "Kian"];
const LAST_NAMES: [&str; 6] = ["Ahmadi", "Karimi", "Berg", "Novak", "Rossi", "Tanaka"];
const CITIES: [&str; 5] = ["Tehran", "Berlin", "Lisbon", "Osaka", "Toronto"];

/// The five collections behind the admin list screens
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockCatalog {
    pub products: Vec<Product>,
    pub sellers: Vec<Seller>,
    pub users: Vec<User>,
    pub websites: Vec<Website>,
    pub customers: Vec<Customer>,
}

impl MockCatalog {
    /// Deterministic catalog: the same config always yields the same records.
    pub fn generate(config: &MockDataConfig) -> Result<Self> {
        let mut generator = CatalogGenerator::new(config.seed);

        let sellers: Vec<Seller> = (1..=config.sellers).map(|i| generator.seller(i)).collect();
        let products = (1..=config.products)
            .map(|i| generator.product(i, config.sellers))
            .collect();
        let users = (1..=config.users).map(|i| generator.user(i)).collect();
        let websites = (1..=config.websites)
            .map(|i| generator.website(i))
            .collect::<Result<_>>()?;
        let customers = (1..=config.customers).map(|i| generator.customer(i)).collect();

        let catalog = Self {
            products,
            sellers,
            users,
            websites,
            customers,
        };
        debug!(
            seed = config.seed,
            products = catalog.products.len(),
            sellers = catalog.sellers.len(),
            users = catalog.users.len(),
            websites = catalog.websites.len(),
            customers = catalog.customers.len(),
            "mock catalog generated"
        );
        Ok(catalog)
    }
}

struct CatalogGenerator {
    rng: fastrand::Rng,
}

impl CatalogGenerator {
    fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    fn pick<'a>(&mut self, pool: &[&'a str]) -> &'a str {
        pool[self.rng.usize(..pool.len())]
    }

    /// `Some(value)` with the given probability.
    fn maybe<V>(&mut self, probability: f64, value: impl FnOnce(&mut Self) -> V) -> Option<V> {
        if self.rng.f64() < probability {
            Some(value(self))
        } else {
            None
        }
    }

    fn days_ago(&mut self, max_days: i64) -> DateTime<Utc> {
        let seconds = self.rng.i64(0..max_days * 86_400);
        DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::seconds(CATALOG_EPOCH_SECS - seconds)
    }

    fn person(&mut self) -> (String, String) {
        let first = self.pick(&FIRST_NAMES);
        let last = self.pick(&LAST_NAMES);
        let email = format!(
            "{}.{}{}@example.com",
            first.to_lowercase(),
            last.to_lowercase(),
            self.rng.u16(1..1000)
        );
        (format!("{first} {last}"), email)
    }

    fn phone(&mut self) -> String {
        format!("+98 912 {:03} {:04}", self.rng.u16(0..1000), self.rng.u16(0..10_000))
    }

    fn product(&mut self, index: usize, seller_count: usize) -> Product {
        let category = self.pick(&CATEGORIES);
        let tag_count = self.rng.usize(0..3);
        let mut tags: Vec<String> = (0..tag_count).map(|_| self.pick(&TAGS).to_string()).collect();
        tags.sort();
        tags.dedup();

        Product {
            id: format!("prd-{index:04}"),
            title: format!("{} {} #{index}", self.pick(&BRANDS), category),
            sku: format!("SKU-{:06}", self.rng.u32(0..1_000_000)),
            category: category.to_string(),
            seller_id: format!("sel-{:03}", self.rng.usize(1..=seller_count.max(1))),
            brand: self.maybe(0.8, |g| g.pick(&BRANDS).to_string()),
            price: f64::from(self.rng.u32(100..100_000)) / 100.0,
            stock: self.rng.u32(0..500),
            status: match self.rng.u8(0..10) {
                0 => ProductStatus::Archived,
                1 | 2 => ProductStatus::Draft,
                _ => ProductStatus::Active,
            },
            tags,
            created_at: self.days_ago(365),
        }
    }

    fn seller(&mut self, index: usize) -> Seller {
        let (name, email) = self.person();
        Seller {
            id: format!("sel-{index:03}"),
            name,
            email,
            phone: self.maybe(0.7, Self::phone),
            city: self.maybe(0.8, |g| g.pick(&CITIES).to_string()),
            rating: self.maybe(0.75, |g| f64::from(g.rng.u8(10..=50)) / 10.0),
            verified: self.rng.bool(),
            created_at: self.days_ago(730),
        }
    }

    fn user(&mut self, index: usize) -> User {
        let (full_name, email) = self.person();
        User {
            id: format!("usr-{index:03}"),
            full_name,
            email,
            phone: self.maybe(0.5, Self::phone),
            role: match self.rng.u8(0..10) {
                0 => UserRole::Admin,
                1..=3 => UserRole::Editor,
                4..=5 => UserRole::Support,
                _ => UserRole::Viewer,
            },
            active: self.rng.u8(0..10) > 1,
            created_at: self.days_ago(730),
            last_login_at: self.maybe(0.7, |g| g.days_ago(30)),
        }
    }

    fn website(&mut self, index: usize) -> Result<Website> {
        let (_, owner_email) = self.person();
        let scheme = if self.rng.u8(0..5) == 0 { "http" } else { "https" };
        let category = self.pick(&CATEGORIES);
        Ok(Website {
            id: format!("web-{index:03}"),
            title: format!("{} Store {index}", self.pick(&BRANDS)),
            url: WebsiteUrl::new(format!("{scheme}://{category}-{index}.example.com"))?,
            owner_email,
            category: self.maybe(0.8, |_| category.to_string()),
            status: match self.rng.u8(0..6) {
                0 => WebsiteStatus::Offline,
                1 => WebsiteStatus::Maintenance,
                _ => WebsiteStatus::Online,
            },
            created_at: self.days_ago(1_000),
        })
    }

    fn customer(&mut self, index: usize) -> Customer {
        let (full_name, email) = self.person();
        let orders_count = self.rng.u32(0..60);
        Customer {
            id: format!("cus-{index:04}"),
            full_name,
            email,
            phone: self.maybe(0.6, Self::phone),
            city: self.maybe(0.8, |g| g.pick(&CITIES).to_string()),
            orders_count,
            total_spent: f64::from(orders_count * self.rng.u32(500..20_000)) / 100.0,
            created_at: self.days_ago(1_000),
        }
    }
}

/// Entity source serving the five collections from memory
#[derive(Debug, Default)]
pub struct InMemoryEntitySource {
    products: RwLock<Vec<Product>>,
    sellers: RwLock<Vec<Seller>>,
    users: RwLock<Vec<User>>,
    websites: RwLock<Vec<Website>>,
    customers: RwLock<Vec<Customer>>,
    latency: Option<Duration>,
}

impl InMemoryEntitySource {
    pub fn new(catalog: MockCatalog) -> Self {
        Self {
            products: RwLock::new(catalog.products),
            sellers: RwLock::new(catalog.sellers),
            users: RwLock::new(catalog.users),
            websites: RwLock::new(catalog.websites),
            customers: RwLock::new(catalog.customers),
            latency: None,
        }
    }

    /// Delay every fetch, mimicking a network round trip
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub async fn replace_products(&self, products: Vec<Product>) {
        *self.products.write().await = products;
    }

    pub async fn replace_sellers(&self, sellers: Vec<Seller>) {
        *self.sellers.write().await = sellers;
    }

    pub async fn replace_users(&self, users: Vec<User>) {
        *self.users.write().await = users;
    }

    pub async fn replace_websites(&self, websites: Vec<Website>) {
        *self.websites.write().await = websites;
    }

    pub async fn replace_customers(&self, customers: Vec<Customer>) {
        *self.customers.write().await = customers;
    }

    async fn read<T: Clone>(&self, rows: &RwLock<Vec<T>>) -> Vec<T> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        rows.read().await.clone()
    }
}

#[async_trait]
impl EntitySource<Product> for InMemoryEntitySource {
    async fn fetch_all(&self) -> Result<Vec<Product>> {
        Ok(self.read(&self.products).await)
    }
}

#[async_trait]
impl EntitySource<Seller> for InMemoryEntitySource {
    async fn fetch_all(&self) -> Result<Vec<Seller>> {
        Ok(self.read(&self.sellers).await)
    }
}

#[async_trait]
impl EntitySource<User> for InMemoryEntitySource {
    async fn fetch_all(&self) -> Result<Vec<User>> {
        Ok(self.read(&self.users).await)
    }
}

#[async_trait]
impl EntitySource<Website> for InMemoryEntitySource {
    async fn fetch_all(&self) -> Result<Vec<Website>> {
        Ok(self.read(&self.websites).await)
    }
}

#[async_trait]
impl EntitySource<Customer> for InMemoryEntitySource {
    async fn fetch_all(&self) -> Result<Vec<Customer>> {
        Ok(self.read(&self.customers).await)
    }
}
