//! # Report Service
//!
//! One async method per report. Every method returns a
//! [`ServiceResponse`] and never an `Err`: a failed query becomes
//! `{ success: false, message: <error text>, data: null }`.
//!
//! ## Best-Sellers Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  top_ten_sale_items()                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sales().top_items_by_amount(10)    → [(item 7, 5400), (item 2, 3100)] │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  items().find_by_ids(&[7, 2])       → [Item 2]   (item 7 was deleted)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  attach_item_details(..)            → [Unknown: 54.0, Item 2: 31.0]    │
//! │                                                                         │
//! │  top_ten_sale_items_chart()                                            │
//! │       └── chart_points(..)          → [{Unknown, 54.0}, {..., 31.0}]   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::AppResult;
use tally_core::{
    attach_item_details, chart_points, CategoryCount, ChartPoint, ItemCount, ReportKind,
    SaleCount, ServiceResponse, TopSaleItem, TotalItemSold, TotalSaleAmount, SUCCESS_MESSAGE,
    SUCCESS_MESSAGE_PLAIN, TOP_SALE_ITEMS_LIMIT,
};
use tally_db::{Database, DbResult};

/// Runs reports against a database.
#[derive(Debug, Clone)]
pub struct ReportService {
    db: Database,
}

impl ReportService {
    pub fn new(db: Database) -> Self {
        ReportService { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Number of categories.
    pub async fn get_category_count(&self) -> ServiceResponse<CategoryCount> {
        let result = self
            .db
            .catalog()
            .count_categories()
            .await
            .map(|category_count| CategoryCount { category_count });

        respond(ReportKind::CategoryCount, result, SUCCESS_MESSAGE)
    }

    /// Number of items.
    pub async fn get_item_count(&self) -> ServiceResponse<ItemCount> {
        let result = self
            .db
            .items()
            .count()
            .await
            .map(|item_count| ItemCount { item_count });

        respond(ReportKind::ItemCount, result, SUCCESS_MESSAGE)
    }

    /// Number of sales.
    pub async fn get_sale_count(&self) -> ServiceResponse<SaleCount> {
        let result = self
            .db
            .sales()
            .count()
            .await
            .map(|sale_count| SaleCount { sale_count });

        respond(ReportKind::SaleCount, result, SUCCESS_MESSAGE)
    }

    /// Summed price of every sale line, `0.0` when nothing was sold.
    pub async fn get_total_sale_amount(&self) -> ServiceResponse<TotalSaleAmount> {
        let result = self
            .db
            .sales()
            .total_amount()
            .await
            .map(|total| TotalSaleAmount {
                total_sale_amount: total.to_major_units(),
            });

        respond(ReportKind::TotalSaleAmount, result, SUCCESS_MESSAGE)
    }

    /// Summed quantity of every sale line, `0` when nothing was sold.
    pub async fn total_item_sold(&self) -> ServiceResponse<TotalItemSold> {
        let result = self
            .db
            .sales()
            .total_quantity_sold()
            .await
            .map(|total_item_sold| TotalItemSold { total_item_sold });

        respond(ReportKind::TotalItemSold, result, SUCCESS_MESSAGE_PLAIN)
    }

    /// The ten items with the highest summed sale price, best first.
    ///
    /// Items whose detail row is gone are reported as [`Item::unknown`].
    ///
    /// [`Item::unknown`]: tally_core::Item::unknown
    pub async fn top_ten_sale_items(&self) -> ServiceResponse<Vec<TopSaleItem>> {
        let result = self.load_top_items(TOP_SALE_ITEMS_LIMIT).await;
        respond(ReportKind::TopSaleItems, result, SUCCESS_MESSAGE)
    }

    /// `{ name, value }` projection of [`top_ten_sale_items`].
    ///
    /// Always succeeds: if the underlying report fails the chart is empty.
    ///
    /// [`top_ten_sale_items`]: Self::top_ten_sale_items
    pub async fn top_ten_sale_items_chart(&self) -> ServiceResponse<Vec<ChartPoint>> {
        let top = self.top_ten_sale_items().await;

        if !top.is_success() {
            warn!(
                reason = %top.message,
                "Best-sellers report failed, returning empty chart"
            );
        }

        let points = top.data.as_deref().map(chart_points).unwrap_or_default();
        respond(ReportKind::TopSaleItemsChart, Ok(points), SUCCESS_MESSAGE_PLAIN)
    }

    /// Runs one report and returns its envelope as JSON.
    pub async fn run(&self, kind: ReportKind) -> AppResult<Value> {
        let value = match kind {
            ReportKind::CategoryCount => to_json(self.get_category_count().await)?,
            ReportKind::ItemCount => to_json(self.get_item_count().await)?,
            ReportKind::SaleCount => to_json(self.get_sale_count().await)?,
            ReportKind::TotalSaleAmount => to_json(self.get_total_sale_amount().await)?,
            ReportKind::TotalItemSold => to_json(self.total_item_sold().await)?,
            ReportKind::TopSaleItems => to_json(self.top_ten_sale_items().await)?,
            ReportKind::TopSaleItemsChart => to_json(self.top_ten_sale_items_chart().await)?,
        };

        Ok(value)
    }

    async fn load_top_items(&self, limit: u32) -> DbResult<Vec<TopSaleItem>> {
        let ranked = self.db.sales().top_items_by_amount(limit).await?;
        if ranked.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = ranked.iter().map(|row| row.item_id).collect();
        let items = self.db.items().find_by_ids(&ids).await?;

        Ok(attach_item_details(ranked, items))
    }
}

fn respond<T>(kind: ReportKind, result: DbResult<T>, message: &str) -> ServiceResponse<T> {
    match &result {
        Ok(_) => debug!(report = %kind, "Report ready"),
        Err(e) => error!(report = %kind, error = %e, "Report failed"),
    }

    ServiceResponse::from_result(result, message)
}

fn to_json<T: Serialize>(response: ServiceResponse<T>) -> AppResult<Value> {
    Ok(serde_json::to_value(response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tally_core::{Item, NewItem, NewSaleLine};
    use tally_db::DbConfig;

    async fn service() -> ReportService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        ReportService::new(db)
    }

    /// Inserts items named `names`, all in one category and unit.
    async fn add_items(service: &ReportService, names: &[&str]) -> Vec<Item> {
        let db = service.database();
        let category = db.catalog().insert_category("General").await.unwrap();
        let unit = db.catalog().insert_unit("pcs").await.unwrap();

        let mut items = Vec::new();
        for name in names {
            let item = db
                .items()
                .insert(&NewItem {
                    category_id: category.id,
                    unit_id: unit.id,
                    name: name.to_string(),
                    price_cents: 100,
                    stock_quantity: 10,
                })
                .await
                .unwrap();
            items.push(item);
        }
        items
    }

    async fn sell(service: &ReportService, lines: &[(i64, i64, i64)]) {
        let lines: Vec<NewSaleLine> = lines
            .iter()
            .map(|&(item_id, quantity, price_cents)| NewSaleLine {
                item_id,
                quantity,
                price_cents,
            })
            .collect();
        service.database().sales().create_sale(&lines).await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_database_defaults() {
        let service = service().await;

        let categories = service.get_category_count().await;
        assert!(categories.success);
        assert_eq!(categories.message, "Success!");
        assert_eq!(categories.data.unwrap().category_count, 0);

        assert_eq!(service.get_item_count().await.data.unwrap().item_count, 0);
        assert_eq!(service.get_sale_count().await.data.unwrap().sale_count, 0);

        let amount = service.get_total_sale_amount().await;
        assert_eq!(amount.message, "Success!");
        assert_eq!(amount.data.unwrap().total_sale_amount, 0.0);

        let sold = service.total_item_sold().await;
        assert_eq!(sold.message, "Success");
        assert_eq!(sold.data.unwrap().total_item_sold, 0);

        let top = service.top_ten_sale_items().await;
        assert!(top.success);
        assert!(top.data.unwrap().is_empty());

        let chart = service.top_ten_sale_items_chart().await;
        assert_eq!(chart.message, "Success");
        assert!(chart.data.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_counts_and_totals() {
        let service = service().await;
        let items = add_items(&service, &["Cola", "Chips", "Bread"]).await;

        sell(&service, &[(items[0].id, 2, 300), (items[1].id, 1, 249)]).await;
        sell(&service, &[(items[0].id, 1, 150)]).await;

        assert_eq!(
            service.get_category_count().await.data.unwrap().category_count,
            1
        );
        assert_eq!(service.get_item_count().await.data.unwrap().item_count, 3);
        assert_eq!(service.get_sale_count().await.data.unwrap().sale_count, 2);
        assert_eq!(
            service
                .get_total_sale_amount()
                .await
                .data
                .unwrap()
                .total_sale_amount,
            6.99
        );
        assert_eq!(
            service.total_item_sold().await.data.unwrap().total_item_sold,
            4
        );
    }

    #[tokio::test]
    async fn test_top_items_ranking() {
        let service = service().await;
        let items = add_items(&service, &["Cola", "Chips", "Bread"]).await;

        sell(&service, &[(items[0].id, 1, 100), (items[2].id, 5, 1000)]).await;
        sell(&service, &[(items[1].id, 2, 450), (items[0].id, 1, 100)]).await;

        let top = service.top_ten_sale_items().await;
        assert_eq!(top.message, "Success!");

        let top = top.data.unwrap();
        let ranking: Vec<(&str, f64)> = top
            .iter()
            .map(|t| (t.item_details.name.as_str(), t.total_amount))
            .collect();
        assert_eq!(
            ranking,
            vec![("Bread", 10.0), ("Chips", 4.5), ("Cola", 2.0)]
        );
    }

    #[tokio::test]
    async fn test_top_items_limited_to_ten() {
        let service = service().await;
        let names: Vec<String> = (1..=12).map(|n| format!("Item {n}")).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let items = add_items(&service, &names).await;

        let lines: Vec<(i64, i64, i64)> = items
            .iter()
            .enumerate()
            .map(|(n, item)| (item.id, 1, 100 * (n as i64 + 1)))
            .collect();
        sell(&service, &lines).await;

        let top = service.top_ten_sale_items().await.data.unwrap();
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].item_details.name, "Item 12");
        assert_eq!(top[9].item_details.name, "Item 3");

        let chart = service.top_ten_sale_items_chart().await.data.unwrap();
        assert_eq!(chart.len(), 10);
        assert_eq!(chart[0].name, "Item 12");
        assert_eq!(chart[0].value, 12.0);
    }

    #[tokio::test]
    async fn test_deleted_item_reported_as_unknown() {
        let service = service().await;
        let items = add_items(&service, &["Cola", "Chips"]).await;

        sell(&service, &[(items[0].id, 3, 2599), (items[1].id, 1, 100)]).await;
        service.database().items().delete(items[0].id).await.unwrap();

        let top = service.top_ten_sale_items().await.data.unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].item_details.id, 0);
        assert_eq!(top[0].item_details.name, "Unknown");
        assert_eq!(top[0].item_details.price_cents, 0);
        assert_eq!(top[0].total_amount, 25.99);
        assert_eq!(top[1].item_details.name, "Chips");

        let chart = service.top_ten_sale_items_chart().await.data.unwrap();
        assert_eq!(
            chart,
            vec![
                ChartPoint {
                    name: "Unknown".to_string(),
                    value: 25.99,
                },
                ChartPoint {
                    name: "Chips".to_string(),
                    value: 1.0,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_item_details_json_uses_major_unit_price() {
        let service = service().await;
        let db = service.database();
        let category = db.catalog().insert_category("Drinks").await.unwrap();
        let unit = db.catalog().insert_unit("can").await.unwrap();
        let cola = db
            .items()
            .insert(&NewItem {
                category_id: category.id,
                unit_id: unit.id,
                name: "Cola".to_string(),
                price_cents: 150,
                stock_quantity: 12,
            })
            .await
            .unwrap();

        // 9999 has no item row and ranks below Cola.
        sell(&service, &[(cola.id, 2, 300), (9999, 1, 100)]).await;
        let stored = db.items().get_by_id(cola.id).await.unwrap().unwrap();

        let value = service.run(ReportKind::TopSaleItems).await.unwrap();
        let data = value["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);

        assert_eq!(
            data[0],
            json!({
                "itemDetails": {
                    "id": cola.id,
                    "categoryId": category.id,
                    "unitId": unit.id,
                    "name": "Cola",
                    "price": 1.5,
                    "stockQuantity": 12,
                    "createdAt": stored.created_at,
                    "updatedAt": stored.updated_at,
                },
                "totalAmount": 3.0,
            })
        );

        let sentinel = &data[1]["itemDetails"];
        assert_eq!(sentinel["createdAt"], sentinel["updatedAt"]);
        assert_eq!(
            data[1],
            json!({
                "itemDetails": {
                    "id": 0,
                    "categoryId": 0,
                    "unitId": 0,
                    "name": "Unknown",
                    "price": 0.0,
                    "stockQuantity": 0,
                    "createdAt": sentinel["createdAt"].clone(),
                    "updatedAt": sentinel["updatedAt"].clone(),
                },
                "totalAmount": 1.0,
            })
        );
    }

    #[tokio::test]
    async fn test_failures_become_failure_envelopes() {
        let service = service().await;
        service.database().close().await;

        let count = service.get_sale_count().await;
        assert!(!count.success);
        assert!(count.data.is_none());
        assert_eq!(count.message, "Connection failed: Pool is closed");

        let amount = service.get_total_sale_amount().await;
        assert!(!amount.success);
        assert!(amount.data.is_none());

        let top = service.top_ten_sale_items().await;
        assert!(!top.success);
        assert!(top.data.is_none());
    }

    #[tokio::test]
    async fn test_chart_succeeds_when_top_items_fail() {
        let service = service().await;
        service.database().close().await;

        let chart = service.top_ten_sale_items_chart().await;
        assert!(chart.success);
        assert_eq!(chart.message, "Success");
        assert_eq!(chart.data, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_run_serializes_envelopes() {
        let service = service().await;
        let items = add_items(&service, &["Cola"]).await;
        sell(&service, &[(items[0].id, 2, 300)]).await;

        let value = service.run(ReportKind::SaleCount).await.unwrap();
        assert_eq!(
            value,
            json!({ "success": true, "message": "Success!", "data": { "saleCount": 1 } })
        );

        let value = service.run(ReportKind::TotalItemSold).await.unwrap();
        assert_eq!(
            value,
            json!({ "success": true, "message": "Success", "data": { "totalItemSold": 2 } })
        );

        let value = service.run(ReportKind::TopSaleItemsChart).await.unwrap();
        assert_eq!(value["data"], json!([{ "name": "Cola", "value": 3.0 }]));

        service.database().close().await;
        let value = service.run(ReportKind::ItemCount).await.unwrap();
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["data"], Value::Null);
    }
}
