//! Order store port and its in-memory adapter.

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::aggregates::{OrderPayload, OrderRecord};
use crate::Result;

pub const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Serialize)]
pub struct Page<T> { pub data: Vec<T>, pub total: i64, pub page: u32 }

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn insert(&self, payload: OrderPayload) -> Result<OrderRecord>;
    async fn get(&self, id: Uuid) -> Result<Option<OrderRecord>>;
    async fn list(&self, page: u32, per_page: u32) -> Result<Page<OrderRecord>>;
}

#[derive(Debug)]
pub struct InMemoryOrderRepository {
    currency: String,
    orders: RwLock<Vec<OrderRecord>>,
}

impl InMemoryOrderRepository {
    pub fn new(currency: impl Into<String>) -> Self {
        Self { currency: currency.into(), orders: RwLock::new(Vec::new()) }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, payload: OrderPayload) -> Result<OrderRecord> {
        let record = OrderRecord::place(payload, &self.currency);
        self.orders.write().await.push(record.clone());
        tracing::info!(order_id = %record.id, order_number = %record.order_number, total = %record.payload.total_amount, "order placed");
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<Option<OrderRecord>> {
        Ok(self.orders.read().await.iter().find(|o| o.id == id).cloned())
    }

    async fn list(&self, page: u32, per_page: u32) -> Result<Page<OrderRecord>> {
        let page = page.max(1);
        let per_page = per_page.clamp(1, MAX_PER_PAGE);
        let orders = self.orders.read().await;
        let data = orders.iter().rev()
            .skip(((page - 1) as usize).saturating_mul(per_page as usize))
            .take(per_page as usize)
            .cloned()
            .collect();
        Ok(Page { data, total: orders.len() as i64, page })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::{project_order, OrderParties};
    use crate::domain::sell_command::parse_sell_command;

    fn payload(text: &str) -> OrderPayload {
        project_order(&parse_sell_command(text), OrderParties::new("p1", "b1", "s1")).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = InMemoryOrderRepository::new("INR");
        let record = repo.insert(payload("sell 120 x3")).await.unwrap();
        let found = repo.get(record.id).await.unwrap().unwrap();
        assert_eq!(found.payload.quantity, 3);
        assert_eq!(found.currency, "INR");
        assert!(repo.get(Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = InMemoryOrderRepository::new("INR");
        for qty in 1..=3 {
            repo.insert(payload(&format!("sell 10 x{qty}"))).await.unwrap();
        }
        let page = repo.list(0, 2).await.unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total, 3);
        assert_eq!(page.data.iter().map(|o| o.payload.quantity).collect::<Vec<_>>(), vec![3, 2]);
        assert_eq!(repo.list(2, 2).await.unwrap().data.len(), 1);
    }

    #[tokio::test]
    async fn test_list_far_page_is_empty() {
        let repo = InMemoryOrderRepository::new("INR");
        repo.insert(payload("sell 10")).await.unwrap();
        let page = repo.list(u32::MAX, MAX_PER_PAGE).await.unwrap();
        assert_eq!(page.page, u32::MAX);
        assert_eq!(page.total, 1);
        assert!(page.data.is_empty());
    }
}
