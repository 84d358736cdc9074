//! Business profile commands.

use clap::Args;

use catalog_store::{BusinessInfo, CatalogStore};

use super::{CommandError, emit};

/// Fields for `business set`. Omitted fields keep their current value.
#[derive(Debug, Args)]
pub struct BusinessArgs {
    /// Shop name
    #[arg(long)]
    pub name: Option<String>,

    /// Owner name
    #[arg(long)]
    pub owner: Option<String>,

    /// Street address
    #[arg(long)]
    pub address: Option<String>,

    /// Latitude
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude
    #[arg(long, allow_negative_numbers = true)]
    pub lng: Option<f64>,
}

impl BusinessArgs {
    fn merge_into(self, info: &mut BusinessInfo) {
        if let Some(name) = self.name {
            info.name = name;
        }
        if let Some(owner) = self.owner {
            info.owner = owner;
        }
        if let Some(address) = self.address {
            info.address = address;
        }
        if let Some(lat) = self.lat {
            info.coords.lat = lat;
        }
        if let Some(lng) = self.lng {
            info.coords.lng = lng;
        }
    }
}

/// Print the business profile.
pub async fn show(store: &CatalogStore) -> Result<(), CommandError> {
    emit(&store.business_info().await?)
}

/// Write the business profile.
pub async fn set(store: &CatalogStore, args: BusinessArgs) -> Result<(), CommandError> {
    let mut info = store.business_info().await?.unwrap_or_default();
    args.merge_into(&mut info);

    store.set_business_info(&info).await?;
    tracing::info!(name = %info.name, "Business info saved");
    emit(&info)
}
