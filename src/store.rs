//! Persistence for QR code records.
//!
//! Every operation is scoped by shop domain; a record belonging to another
//! shop behaves exactly like a missing one.

use std::collections::HashMap;
use std::future::Future;

use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::dto::qr_codes::{CreateQrCodeRequest, QrCodePatch};
use crate::error::AppResult;
use crate::models::QrCode;

pub trait QrCodeStore: Send + Sync {
    fn create(
        &self,
        shop: &str,
        req: &CreateQrCodeRequest,
    ) -> impl Future<Output = AppResult<QrCode>> + Send;

    fn get(&self, shop: &str, id: Uuid) -> impl Future<Output = AppResult<Option<QrCode>>> + Send;

    fn update(
        &self,
        shop: &str,
        id: Uuid,
        patch: &QrCodePatch,
    ) -> impl Future<Output = AppResult<Option<QrCode>>> + Send;

    fn delete(&self, shop: &str, id: Uuid) -> impl Future<Output = AppResult<bool>> + Send;
}

#[derive(Clone)]
pub struct PgQrCodeStore {
    pool: PgPool,
}

impl PgQrCodeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl QrCodeStore for PgQrCodeStore {
    async fn create(&self, shop: &str, req: &CreateQrCodeRequest) -> AppResult<QrCode> {
        let record = sqlx::query_as::<_, QrCode>(
            r#"
            INSERT INTO qr_codes
                (id, shop_domain, title, product_id, variant_id, handle,
                 discount_id, discount_code, destination, scans, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 0, now(), now())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(shop)
        .bind(&req.title)
        .bind(&req.product_id)
        .bind(&req.variant_id)
        .bind(&req.handle)
        .bind(&req.discount_id)
        .bind(&req.discount_code)
        .bind(&req.destination)
        .fetch_one(&self.pool)
        .await?;
        Ok(record)
    }

    async fn get(&self, shop: &str, id: Uuid) -> AppResult<Option<QrCode>> {
        let record = sqlx::query_as::<_, QrCode>(
            "SELECT * FROM qr_codes WHERE shop_domain = $1 AND id = $2",
        )
        .bind(shop)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn update(&self, shop: &str, id: Uuid, patch: &QrCodePatch) -> AppResult<Option<QrCode>> {
        let record = sqlx::query_as::<_, QrCode>(
            r#"
            UPDATE qr_codes SET
                title = COALESCE($3, title),
                product_id = COALESCE($4, product_id),
                variant_id = COALESCE($5, variant_id),
                handle = COALESCE($6, handle),
                discount_id = COALESCE($7, discount_id),
                discount_code = COALESCE($8, discount_code),
                destination = COALESCE($9, destination),
                updated_at = now()
            WHERE shop_domain = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(shop)
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.product_id)
        .bind(&patch.variant_id)
        .bind(&patch.handle)
        .bind(&patch.discount_id)
        .bind(&patch.discount_code)
        .bind(&patch.destination)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn delete(&self, shop: &str, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM qr_codes WHERE shop_domain = $1 AND id = $2")
            .bind(shop)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// In-memory store used by tests.
#[derive(Default)]
pub struct MemoryQrCodeStore {
    records: RwLock<HashMap<Uuid, QrCode>>,
}

impl MemoryQrCodeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QrCodeStore for MemoryQrCodeStore {
    async fn create(&self, shop: &str, req: &CreateQrCodeRequest) -> AppResult<QrCode> {
        let now = Utc::now();
        let record = QrCode {
            id: Uuid::new_v4(),
            shop_domain: shop.to_string(),
            title: req.title.clone(),
            product_id: req.product_id.clone(),
            variant_id: req.variant_id.clone(),
            handle: req.handle.clone(),
            discount_id: req.discount_id.clone(),
            discount_code: req.discount_code.clone(),
            destination: req.destination.clone(),
            scans: 0,
            created_at: now,
            updated_at: now,
        };
        self.records.write().await.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get(&self, shop: &str, id: Uuid) -> AppResult<Option<QrCode>> {
        Ok(self
            .records
            .read()
            .await
            .get(&id)
            .filter(|r| r.shop_domain == shop)
            .cloned())
    }

    async fn update(&self, shop: &str, id: Uuid, patch: &QrCodePatch) -> AppResult<Option<QrCode>> {
        let mut records = self.records.write().await;
        let Some(record) = records.get_mut(&id).filter(|r| r.shop_domain == shop) else {
            return Ok(None);
        };
        if let Some(title) = &patch.title {
            record.title = title.clone();
        }
        if let Some(product_id) = &patch.product_id {
            record.product_id = product_id.clone();
        }
        if let Some(variant_id) = &patch.variant_id {
            record.variant_id = variant_id.clone();
        }
        if let Some(handle) = &patch.handle {
            record.handle = handle.clone();
        }
        if let Some(discount_id) = &patch.discount_id {
            record.discount_id = Some(discount_id.clone());
        }
        if let Some(discount_code) = &patch.discount_code {
            record.discount_code = Some(discount_code.clone());
        }
        if let Some(destination) = &patch.destination {
            record.destination = destination.clone();
        }
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn delete(&self, shop: &str, id: Uuid) -> AppResult<bool> {
        let mut records = self.records.write().await;
        match records.get(&id) {
            Some(r) if r.shop_domain == shop => {
                records.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> CreateQrCodeRequest {
        CreateQrCodeRequest {
            title: "Summer promo".into(),
            product_id: "gid://shopify/Product/11".into(),
            variant_id: "gid://shopify/ProductVariant/22".into(),
            handle: "summer-promo".into(),
            discount_id: None,
            discount_code: None,
            destination: "product".into(),
        }
    }

    #[tokio::test]
    async fn records_are_invisible_to_other_shops() {
        let store = MemoryQrCodeStore::new();
        let created = store.create("a.myshopify.com", &sample_request()).await.unwrap();

        assert!(store.get("b.myshopify.com", created.id).await.unwrap().is_none());
        assert!(!store.delete("b.myshopify.com", created.id).await.unwrap());
        assert!(store.get("a.myshopify.com", created.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn patch_changes_only_named_fields() {
        let store = MemoryQrCodeStore::new();
        let created = store.create("a.myshopify.com", &sample_request()).await.unwrap();

        let patch = QrCodePatch {
            title: Some("Winter promo".into()),
            ..Default::default()
        };
        let updated = store
            .update("a.myshopify.com", created.id, &patch)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Winter promo");
        assert_eq!(updated.handle, created.handle);
        assert!(updated.updated_at >= created.updated_at);
    }
}
