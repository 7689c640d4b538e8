//! Integration tests for the order placement transaction and the
//! surrounding repositories, run against an in-memory SQLite database
//! with the full migration set applied.

use store_core::{Money, OrderStatus};
use store_db::{Database, DbConfig, DbError, OrderError};

/// Fresh in-memory database with one customer and one product.
///
/// Returns (db, customer_id, product_id). The product is priced $19.99
/// with the given stock.
async fn fixture(stock: i64) -> (Database, i64, i64) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    let category_id = db.products().insert_category("Electronics").await.unwrap();
    let customer_id = db
        .customers()
        .insert("Alice Martin", "alice@example.com", "12 Rose Lane")
        .await
        .unwrap();
    let product_id = db
        .products()
        .insert("Wireless Mouse", Money::parse("19.99").unwrap(), stock, category_id)
        .await
        .unwrap();

    (db, customer_id, product_id)
}

async fn table_count(db: &Database, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(db.pool())
        .await
        .unwrap()
}

async fn stock_of(db: &Database, product_id: i64) -> i64 {
    db.products()
        .get_by_id(product_id)
        .await
        .unwrap()
        .unwrap()
        .stock_qty
}

/// Happy path: $19.99 x 3 = $59.97, stock 10 -> 7, ledger booked.
#[tokio::test]
async fn place_order_commits_all_four_writes() {
    let (db, customer_id, product_id) = fixture(10).await;

    let order_id = db
        .placement()
        .place_order(customer_id, product_id, 3)
        .await
        .unwrap();

    let order = db.orders().get_by_id(order_id).await.unwrap().unwrap();
    assert_eq!(order.total_cents, 5997);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.customer_id, customer_id);

    let items = db.orders().items(order_id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 3);
    assert_eq!(items[0].unit_price_cents, 1999);
    assert_eq!(items[0].product_id, product_id);

    assert_eq!(stock_of(&db, product_id).await, 7);

    let ledger = db.orders().ledger_for_order(order_id).await.unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].amount_cents, 5997);
}

#[tokio::test]
async fn insufficient_stock_rejected_and_stock_untouched() {
    let (db, customer_id, product_id) = fixture(2).await;

    let err = db
        .placement()
        .place_order(customer_id, product_id, 5)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OrderError::InsufficientStock {
            available: 2,
            requested: 5
        }
    ));

    assert_eq!(stock_of(&db, product_id).await, 2);
    assert_eq!(table_count(&db, "orders").await, 0);
}

#[tokio::test]
async fn unknown_customer_fails_before_any_write() {
    let (db, _customer_id, product_id) = fixture(10).await;

    let err = db
        .placement()
        .place_order(999, product_id, 1)
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::CustomerNotFound(999)));

    // Byte-for-byte unchanged tables: nothing was written anywhere.
    assert_eq!(table_count(&db, "orders").await, 0);
    assert_eq!(table_count(&db, "order_items").await, 0);
    assert_eq!(table_count(&db, "ledger_entries").await, 0);
    assert_eq!(stock_of(&db, product_id).await, 10);
}

#[tokio::test]
async fn unknown_product_rejected() {
    let (db, customer_id, _product_id) = fixture(10).await;

    let err = db
        .placement()
        .place_order(customer_id, 424242, 1)
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::ProductNotFound(424242)));
}

#[tokio::test]
async fn zero_and_negative_quantity_rejected_regardless_of_stock() {
    let (db, customer_id, product_id) = fixture(10).await;

    for qty in [0, -1] {
        let err = db
            .placement()
            .place_order(customer_id, product_id, qty)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidQuantity(q) if q == qty));
    }

    assert_eq!(table_count(&db, "orders").await, 0);
    assert_eq!(stock_of(&db, product_id).await, 10);
}

/// The committed line keeps the price read at validation time even if
/// the product price changes afterwards.
#[tokio::test]
async fn order_records_are_immune_to_later_price_changes() {
    let (db, customer_id, product_id) = fixture(10).await;

    let order_id = db
        .placement()
        .place_order(customer_id, product_id, 3)
        .await
        .unwrap();

    db.products()
        .update_price(product_id, Money::parse("99.99").unwrap())
        .await
        .unwrap();

    let order = db.orders().get_by_id(order_id).await.unwrap().unwrap();
    let items = db.orders().items(order_id).await.unwrap();
    let ledger = db.orders().ledger_for_order(order_id).await.unwrap();

    assert_eq!(items[0].unit_price_cents, 1999);
    assert_eq!(order.total_cents, 5997);
    assert_eq!(ledger[0].amount_cents, 5997);
}

#[tokio::test]
async fn consecutive_orders_decrement_stock_exactly() {
    let (db, customer_id, product_id) = fixture(10).await;

    let placement = db.placement();
    placement.place_order(customer_id, product_id, 4).await.unwrap();
    placement.place_order(customer_id, product_id, 6).await.unwrap();

    assert_eq!(stock_of(&db, product_id).await, 0);

    // Stock is exhausted; the next placement must fail cleanly.
    let err = placement
        .place_order(customer_id, product_id, 1)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrderError::InsufficientStock {
            available: 0,
            requested: 1
        }
    ));
    assert_eq!(table_count(&db, "orders").await, 2);
}

// =============================================================================
// Repository behavior around the core
// =============================================================================

#[tokio::test]
async fn duplicate_customer_email_is_a_unique_violation() {
    let (db, _customer_id, _product_id) = fixture(10).await;

    let err = db
        .customers()
        .insert("Alice Clone", "alice@example.com", "Elsewhere")
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::UniqueViolation { .. }));
    assert_eq!(table_count(&db, "customers").await, 1);
}

#[tokio::test]
async fn update_email_reports_missing_customer() {
    let (db, customer_id, _product_id) = fixture(10).await;

    let err = db
        .customers()
        .update_email(999, "new@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound { id: 999, .. }));

    db.customers()
        .update_email(customer_id, "new@example.com")
        .await
        .unwrap();
    let customer = db
        .customers()
        .get_by_id(customer_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(customer.email, "new@example.com");
}

#[tokio::test]
async fn add_order_item_extends_order_and_decrements_stock() {
    let (db, customer_id, product_id) = fixture(10).await;

    let order_id = db
        .placement()
        .place_order(customer_id, product_id, 1)
        .await
        .unwrap();

    db.orders()
        .add_order_item(order_id, product_id, 2)
        .await
        .unwrap();

    let order = db.orders().get_by_id(order_id).await.unwrap().unwrap();
    let items = db.orders().items(order_id).await.unwrap();

    assert_eq!(items.len(), 2);
    // 1 x $19.99 + 2 x $19.99
    assert_eq!(order.total_cents, 3 * 1999);
    assert_eq!(stock_of(&db, product_id).await, 7);
}

#[tokio::test]
async fn add_order_item_rolls_back_on_stock_overdraw() {
    let (db, customer_id, product_id) = fixture(3).await;

    let order_id = db
        .placement()
        .place_order(customer_id, product_id, 1)
        .await
        .unwrap();
    let total_before = db
        .orders()
        .get_by_id(order_id)
        .await
        .unwrap()
        .unwrap()
        .total_cents;

    // Only 2 left in stock; the CHECK constraint rejects the decrement
    // and the whole routine rolls back.
    let err = db
        .orders()
        .add_order_item(order_id, product_id, 5)
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::QueryFailed { .. }));

    let order = db.orders().get_by_id(order_id).await.unwrap().unwrap();
    assert_eq!(order.total_cents, total_before);
    assert_eq!(db.orders().items(order_id).await.unwrap().len(), 1);
    assert_eq!(stock_of(&db, product_id).await, 2);
}

/// An overflowing line total must fail the routine with an error, not
/// wrap into the stored order total.
#[tokio::test]
async fn add_order_item_rejects_line_total_overflow() {
    let (db, customer_id, _product_id) = fixture(10).await;

    let category_id = db.products().insert_category("Collectibles").await.unwrap();
    let pricey_id = db
        .products()
        .insert("Moon Deed", Money::from_cents(i64::MAX), 5, category_id)
        .await
        .unwrap();

    let order_id = db
        .placement()
        .place_order(customer_id, pricey_id, 1)
        .await
        .unwrap();

    let err = db
        .orders()
        .add_order_item(order_id, pricey_id, 2)
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::QueryFailed { .. }));

    // Nothing was written: single original line, total and stock unchanged.
    let order = db.orders().get_by_id(order_id).await.unwrap().unwrap();
    assert_eq!(order.total_cents, i64::MAX);
    assert_eq!(db.orders().items(order_id).await.unwrap().len(), 1);
    assert_eq!(stock_of(&db, pricey_id).await, 4);
}

#[tokio::test]
async fn add_order_item_requires_existing_pending_order() {
    let (db, _customer_id, product_id) = fixture(10).await;

    let err = db
        .orders()
        .add_order_item(77, product_id, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound { id: 77, .. }));
}

#[tokio::test]
async fn order_summary_view_aggregates_items() {
    let (db, customer_id, product_id) = fixture(10).await;

    let order_id = db
        .placement()
        .place_order(customer_id, product_id, 3)
        .await
        .unwrap();

    let rows = db.orders().order_summary().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].order_id, order_id);
    assert_eq!(rows[0].customer_name, "Alice Martin");
    assert_eq!(rows[0].total_items, 3);
    assert_eq!(rows[0].total_amount_cents, 5997);
}

#[tokio::test]
async fn listings_join_related_names() {
    let (db, customer_id, product_id) = fixture(10).await;

    db.placement()
        .place_order(customer_id, product_id, 2)
        .await
        .unwrap();

    let products = db.products().list().await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].category_name, "Electronics");
    assert_eq!(products[0].price().to_string(), "$19.99");

    let orders = db.orders().list().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].customer_name, "Alice Martin");
    assert_eq!(orders[0].total().to_string(), "$39.98");
}
