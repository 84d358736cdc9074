//! Business profile operations.

use super::CatalogStore;
use crate::db::settings::{BUSINESS_KEY, get_setting, set_setting};
use crate::error::Result;
use crate::models::BusinessInfo;

impl CatalogStore {
    /// Replace the business profile.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the write fails.
    pub async fn set_business_info(&self, info: &BusinessInfo) -> Result<()> {
        set_setting(&self.pool, BUSINESS_KEY, &serde_json::to_value(info)?).await?;
        tracing::debug!(name = %info.name, "Business info updated");
        Ok(())
    }

    /// The current business profile, if one is stored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query fails.
    /// Returns `StoreError::Serialization` if the stored document has the wrong shape.
    pub async fn business_info(&self) -> Result<Option<BusinessInfo>> {
        get_setting(&self.pool, BUSINESS_KEY)
            .await?
            .map(serde_json::from_value)
            .transpose()
            .map_err(Into::into)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::tests::open_in;
    use super::*;
    use crate::models::Coords;

    #[tokio::test]
    async fn test_default_is_seeded() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_in(&dir).await;
        assert_eq!(
            store.business_info().await.unwrap(),
            Some(BusinessInfo::default())
        );
    }

    #[tokio::test]
    async fn test_set_overwrites_and_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let info = BusinessInfo {
            name: "Ink & Quill".to_owned(),
            owner: "R. Tanaka".to_owned(),
            address: "1 Paper Lane".to_owned(),
            coords: Coords {
                lat: 35.68,
                lng: 139.76,
            },
        };

        let store = open_in(&dir).await;
        store.set_business_info(&info).await.unwrap();
        store.close().await;

        let reopened = open_in(&dir).await;
        assert_eq!(reopened.business_info().await.unwrap(), Some(info));
    }
}
