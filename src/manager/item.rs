//! Item lifecycle over an [`ItemStore`]

use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{VersioningError, VersioningResult};
use crate::session::SessionContext;
use crate::storage::ItemStore;
use crate::types::{Item, ItemStatus};

pub struct ItemManager {
    store: Arc<dyn ItemStore>,
}

impl ItemManager {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// Every item of the caller's tenant accepted by `predicate`
    pub async fn list<P>(&self, ctx: &SessionContext, predicate: P) -> VersioningResult<Vec<Item>>
    where
        P: Fn(&Item) -> bool + Send,
    {
        let items = self.store.list(ctx).await?;
        Ok(items.into_iter().filter(|item| predicate(item)).collect())
    }

    pub async fn get(&self, ctx: &SessionContext, item_id: &str) -> VersioningResult<Item> {
        debug!("Loading item {}", item_id);
        self.store
            .get(ctx, item_id)
            .await?
            .ok_or_else(|| VersioningError::not_found(format!("item {item_id}")))
    }

    /// Store a new item built from the caller-settable fields of `item`
    pub async fn create(&self, ctx: &SessionContext, item: &Item) -> VersioningResult<Item> {
        let mut new_item = Item::default();
        new_item.populate_external_fields(item);
        let created = self.store.create(ctx, new_item).await?;
        info!("Created item {} ({})", created.id, created.name);
        Ok(created)
    }

    pub async fn update(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        item: &Item,
    ) -> VersioningResult<Item> {
        let mut stored = self.get(ctx, item_id).await?;
        stored.populate_external_fields(item);
        self.store.update(ctx, &stored).await?;
        info!("Updated item {}", item_id);
        self.get(ctx, item_id).await
    }

    pub async fn delete(&self, ctx: &SessionContext, item_id: &str) -> VersioningResult<()> {
        self.get(ctx, item_id).await?;
        self.store.delete(ctx, item_id).await?;
        info!("Deleted item {}", item_id);
        Ok(())
    }

    pub async fn update_status(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        status: ItemStatus,
    ) -> VersioningResult<Item> {
        let mut item = self.get(ctx, item_id).await?;
        if item.status == status {
            return Err(VersioningError::validation(format!(
                "Item {item_id} is already in status {status}"
            )));
        }
        let previous = item.status;
        item.status = status;
        self.store.update(ctx, &item).await?;
        info!("Item {} status {} -> {}", item_id, previous, status);
        Ok(item)
    }
}
