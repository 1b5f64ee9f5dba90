//! Writes the TypeScript declarations consumed by the panel frontend
//!
//! Output lands in `bindings/` unless `TS_RS_EXPORT_DIR` says otherwise.

use anyhow::{Context, Result};
use tracing::{error, info};
use ts_rs::TS;

use storefront_admin::domain::{
    Customer, EntityKind, FieldValue, FilterValue, ListQuery, PageLabel, PageWindow, Product,
    ProductStatus, Seller, SortOrder, SortSpec, User, UserRole, Website, WebsiteStatus,
};
use storefront_admin::infrastructure::{AppConfig, init_logging_with_config};

fn export<T: TS + 'static>(failures: &mut usize) {
    match T::export() {
        Ok(()) => info!("exported {}", T::name()),
        Err(e) => {
            error!("{} export error: {e}", T::name());
            *failures += 1;
        }
    }
}

fn main() -> Result<()> {
    let config = AppConfig::load(None).context("Failed to load configuration")?;
    init_logging_with_config(&config.logging)?;

    let mut failures = 0;
    export::<EntityKind>(&mut failures);
    export::<FieldValue>(&mut failures);
    export::<FilterValue>(&mut failures);
    export::<SortOrder>(&mut failures);
    export::<SortSpec>(&mut failures);
    export::<ListQuery>(&mut failures);
    export::<PageLabel>(&mut failures);
    export::<PageWindow>(&mut failures);
    export::<Product>(&mut failures);
    export::<ProductStatus>(&mut failures);
    export::<Seller>(&mut failures);
    export::<User>(&mut failures);
    export::<UserRole>(&mut failures);
    export::<Website>(&mut failures);
    export::<WebsiteStatus>(&mut failures);
    export::<Customer>(&mut failures);

    if failures > 0 {
        anyhow::bail!("{failures} type(s) failed to export");
    }
    info!("✅ TypeScript bindings generated");
    Ok(())
}
