//! Integration tests for purchase registration and purchase history.

mod common;

use stockroom::models::{Category, Size};
use stockroom::queries::LedgerFilter;
use stockroom::StockroomError;

// ---------------------------------------------------------------------------
// Register
// ---------------------------------------------------------------------------

#[test]
fn register_decrements_stock_and_records_the_sale() {
    let store = common::setup_store();
    let tee = store.products().add(common::tee_input()).unwrap();

    let receipt = store
        .purchases()
        .register(common::purchase_input("Tee", 3))
        .unwrap();
    assert_eq!(receipt.remaining_stock, 7);
    assert_eq!(store.products().get(&tee.id).unwrap().quantity, 7);

    let purchase = receipt.purchase;
    assert_eq!(purchase.name, "Asha");
    assert_eq!(purchase.number, "9876543210");
    assert_eq!(purchase.title, "Tee");
    assert_eq!(purchase.category, Category::Men);
    assert_eq!(purchase.price, 1500.0);
    assert_eq!(purchase.quantity, 3);
    assert_eq!(purchase.size, vec![Size::M]);
    assert_eq!(purchase.colors, vec!["Red"]);
    assert_eq!(purchase.image, vec!["https://img.example/tee.png"]);

    let stored = store.purchases().get(&purchase.id).unwrap().unwrap();
    assert_eq!(stored, purchase);
}

#[test]
fn buying_the_whole_stock_leaves_zero() {
    let store = common::setup_store();
    store.products().add(common::tee_input()).unwrap();
    let receipt = store
        .purchases()
        .register(common::purchase_input("Tee", 10))
        .unwrap();
    assert_eq!(receipt.remaining_stock, 0);
}

#[test]
fn insufficient_stock_writes_nothing() {
    let store = common::setup_store();
    let tee = store.products().add(common::tee_input()).unwrap();

    let err = store
        .purchases()
        .register(common::purchase_input("Tee", 11))
        .unwrap_err();
    match err {
        StockroomError::InsufficientStock {
            requested,
            available,
            ..
        } => {
            assert_eq!(requested, 11);
            assert_eq!(available, 10);
        }
        other => panic!("expected insufficient stock, got {other:?}"),
    }

    assert_eq!(store.products().get(&tee.id).unwrap().quantity, 10);
    assert_eq!(store.purchases().count().unwrap(), 0);
}

#[test]
fn unknown_title_is_not_found() {
    let store = common::setup_store();
    let err = store
        .purchases()
        .register(common::purchase_input("Ghost", 1))
        .unwrap_err();
    assert!(matches!(err, StockroomError::NotFound(_)));
    assert_eq!(store.purchases().count().unwrap(), 0);
}

#[test]
fn invalid_purchase_writes_nothing() {
    let store = common::setup_store();
    let tee = store.products().add(common::tee_input()).unwrap();

    let mut input = common::purchase_input("Tee", 2);
    input.size = Some("Huge".into());
    let err = store.purchases().register(input).unwrap_err();
    assert!(matches!(err, StockroomError::Validation(_)));

    assert_eq!(store.products().get(&tee.id).unwrap().quantity, 10);
    assert_eq!(store.purchases().count().unwrap(), 0);
}

#[test]
fn sequential_purchases_cannot_oversell() {
    let store = common::setup_store();
    store.products().add(common::product_input("Cap", 5)).unwrap();

    store
        .purchases()
        .register(common::purchase_input("Cap", 3))
        .unwrap();
    let err = store
        .purchases()
        .register(common::purchase_input("Cap", 3))
        .unwrap_err();
    assert!(matches!(err, StockroomError::InsufficientStock { .. }));
    assert_eq!(store.products().get_by_title("Cap").unwrap().unwrap().quantity, 2);
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[test]
fn history_is_most_recent_first_with_total_amount() {
    let store = common::setup_store();
    store.products().add(common::product_input("Tee", 100)).unwrap();

    let first = store
        .purchases()
        .register(common::purchase_input("Tee", 1))
        .unwrap();
    let second = store
        .purchases()
        .register(common::purchase_input("Tee", 2))
        .unwrap();

    let history = store.purchases().list(1, &LedgerFilter::default()).unwrap();
    assert_eq!(history.page.total_count, 2);
    assert_eq!(history.page.total_pages, 1);
    assert_eq!(history.page.items[0].id, second.purchase.id);
    assert_eq!(history.page.items[1].id, first.purchase.id);
    assert_eq!(history.total_amount, 1500.0);
}

#[test]
fn history_search_matches_name_number_or_title() {
    let store = common::setup_store();
    store.products().add(common::product_input("Tee", 100)).unwrap();
    store.products().add(common::product_input("Cap", 100)).unwrap();

    store
        .purchases()
        .register(common::purchase_by("Asha", "111", "Tee", 1))
        .unwrap();
    store
        .purchases()
        .register(common::purchase_by("Ravi", "222", "Cap", 2))
        .unwrap();

    let by_name = store.purchases().list(1, &LedgerFilter::search("asha")).unwrap();
    assert_eq!(by_name.page.total_count, 1);
    assert_eq!(by_name.total_amount, 500.0);

    let by_number = store.purchases().list(1, &LedgerFilter::search("22")).unwrap();
    assert_eq!(by_number.page.items[0].name, "Ravi");

    let by_title = store.purchases().list(1, &LedgerFilter::search("CAP")).unwrap();
    assert_eq!(by_title.page.total_count, 1);

    let none = store.purchases().list(1, &LedgerFilter::search("zzz")).unwrap();
    assert_eq!(none.page.total_count, 0);
    assert_eq!(none.total_amount, 0.0);
}

#[test]
fn get_unknown_purchase_is_none() {
    let store = common::setup_store();
    assert!(store.purchases().get("missing").unwrap().is_none());
}

#[test]
fn history_past_the_end_is_empty_but_keeps_totals() {
    let store = common::setup_store();
    store.products().add(common::tee_input()).unwrap();
    store
        .purchases()
        .register(common::purchase_input("Tee", 2))
        .unwrap();

    for page in [2, usize::MAX] {
        let history = store.purchases().list(page, &LedgerFilter::default()).unwrap();
        assert!(history.page.items.is_empty());
        assert_eq!(history.page.total_count, 1);
        assert_eq!(history.total_amount, 1000.0);
    }

    let returns = store.returns().list(usize::MAX, &LedgerFilter::default()).unwrap();
    assert!(returns.page.items.is_empty());
}
