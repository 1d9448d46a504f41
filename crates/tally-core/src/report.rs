//! # Report Shaping
//!
//! Pure post-processing for the reports: which reports exist, joining the
//! revenue ranking to item details, and the chart projection.
//!
//! ## Best-Sellers Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sale_items ── GROUP BY item_id ORDER BY SUM(price) DESC LIMIT 10      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<ItemSales>  [ (12, 9300), (4, 7150), (99, 1200) ]                 │
//! │       │                                                                 │
//! │       │   items WHERE id IN (12, 4, 99)  →  rows for 12 and 4 only     │
//! │       ▼                                                                 │
//! │  attach_item_details()                                                 │
//! │       │   12 → Cola,  4 → Chips,  99 → Item::unknown()                 │
//! │       ▼                                                                 │
//! │  Vec<TopSaleItem>  ──► chart_points() ──► [{ name, value }, ...]       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::types::{ChartPoint, Item, ItemSales, TopSaleItem};

/// Size of the best-sellers report.
pub const TOP_SALE_ITEMS_LIMIT: u32 = 10;

/// Upper bound accepted for any ranking query.
pub const MAX_REPORT_LIMIT: u32 = 100;

/// Checks a ranking limit before it reaches SQL.
pub fn validate_limit(limit: u32) -> CoreResult<u32> {
    if limit == 0 || limit > MAX_REPORT_LIMIT {
        return Err(CoreError::InvalidLimit {
            requested: limit,
            max: MAX_REPORT_LIMIT,
        });
    }
    Ok(limit)
}

/// Joins ranked rows to their item records.
///
/// Ranking order is preserved. Ids without a record get
/// [`Item::unknown`]; a NULL sum becomes `0`.
pub fn attach_item_details(ranked: Vec<ItemSales>, items: Vec<Item>) -> Vec<TopSaleItem> {
    let mut by_id: HashMap<i64, Item> = items.into_iter().map(|i| (i.id, i)).collect();

    ranked
        .into_iter()
        .map(|row| {
            // The same id never appears twice in a GROUP BY result.
            let item_details = by_id.remove(&row.item_id).unwrap_or_else(Item::unknown);
            TopSaleItem {
                item_details,
                total_amount: row.total().to_major_units(),
            }
        })
        .collect()
}

/// Projects best-sellers onto `{ name, value }` chart points.
pub fn chart_points(items: &[TopSaleItem]) -> Vec<ChartPoint> {
    items
        .iter()
        .map(|i| ChartPoint {
            name: i.item_details.name.clone(),
            value: i.total_amount,
        })
        .collect()
}

// =============================================================================
// Report Kinds
// =============================================================================

/// Every report the service can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    CategoryCount,
    ItemCount,
    SaleCount,
    TotalSaleAmount,
    TotalItemSold,
    TopSaleItems,
    TopSaleItemsChart,
}

impl ReportKind {
    /// All reports, in display order.
    pub const ALL: [ReportKind; 7] = [
        ReportKind::CategoryCount,
        ReportKind::ItemCount,
        ReportKind::SaleCount,
        ReportKind::TotalSaleAmount,
        ReportKind::TotalItemSold,
        ReportKind::TopSaleItems,
        ReportKind::TopSaleItemsChart,
    ];

    /// Kebab-case name used on the command line.
    pub const fn name(&self) -> &'static str {
        match self {
            ReportKind::CategoryCount => "category-count",
            ReportKind::ItemCount => "item-count",
            ReportKind::SaleCount => "sale-count",
            ReportKind::TotalSaleAmount => "total-sale-amount",
            ReportKind::TotalItemSold => "total-item-sold",
            ReportKind::TopSaleItems => "top-items",
            ReportKind::TopSaleItemsChart => "top-items-chart",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ReportKind::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| CoreError::UnknownReport {
                name: s.to_string(),
                expected: ReportKind::ALL
                    .iter()
                    .map(|k| k.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(id: i64, name: &str) -> Item {
        let now = Utc::now();
        Item {
            id,
            category_id: 1,
            unit_id: 1,
            name: name.to_string(),
            price_cents: 250,
            stock_quantity: 10,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_attach_keeps_ranking_order() {
        let ranked = vec![
            ItemSales { item_id: 12, total_cents: Some(9300) },
            ItemSales { item_id: 4, total_cents: Some(7150) },
        ];
        // Detail rows come back in arbitrary order.
        let items = vec![item(4, "Chips"), item(12, "Cola")];

        let top = attach_item_details(ranked, items);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].item_details.name, "Cola");
        assert_eq!(top[0].total_amount, 93.0);
        assert_eq!(top[1].item_details.name, "Chips");
        assert_eq!(top[1].total_amount, 71.5);
    }

    #[test]
    fn test_attach_missing_item_uses_placeholder() {
        let ranked = vec![
            ItemSales { item_id: 99, total_cents: Some(1200) },
            ItemSales { item_id: 5, total_cents: None },
        ];
        let items = vec![item(5, "Water")];

        let top = attach_item_details(ranked, items);

        assert_eq!(top[0].item_details.id, 0);
        assert_eq!(top[0].item_details.name, Item::UNKNOWN_NAME);
        assert_eq!(top[0].total_amount, 12.0);
        assert_eq!(top[1].item_details.name, "Water");
        assert_eq!(top[1].total_amount, 0.0);
    }

    #[test]
    fn test_attach_empty() {
        assert!(attach_item_details(Vec::new(), vec![item(1, "Cola")]).is_empty());
    }

    #[test]
    fn test_chart_points() {
        let top = attach_item_details(
            vec![
                ItemSales { item_id: 1, total_cents: Some(1050) },
                ItemSales { item_id: 2, total_cents: Some(300) },
            ],
            vec![item(1, "Cola")],
        );

        let points = chart_points(&top);

        assert_eq!(
            points,
            vec![
                ChartPoint { name: "Cola".to_string(), value: 10.5 },
                ChartPoint { name: "Unknown".to_string(), value: 3.0 },
            ]
        );
    }

    #[test]
    fn test_validate_limit() {
        assert_eq!(validate_limit(TOP_SALE_ITEMS_LIMIT), Ok(10));
        assert_eq!(validate_limit(MAX_REPORT_LIMIT), Ok(100));
        assert!(validate_limit(0).is_err());
        assert!(validate_limit(101).is_err());
    }

    #[test]
    fn test_report_kind_names_round_trip() {
        for kind in ReportKind::ALL {
            assert_eq!(kind.name().parse::<ReportKind>(), Ok(kind));
        }
        assert_eq!(" Top-Items ".parse::<ReportKind>(), Ok(ReportKind::TopSaleItems));
    }

    #[test]
    fn test_report_kind_unknown() {
        let err = "revenue".parse::<ReportKind>().unwrap_err();
        match err {
            CoreError::UnknownReport { name, expected } => {
                assert_eq!(name, "revenue");
                assert!(expected.starts_with("category-count, item-count"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
