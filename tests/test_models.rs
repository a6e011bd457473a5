//! Tests for request validation and model parsing.

mod common;

use stockroom::models::{
    page_offset, total_pages, Category, ListInput, ProductInput, ProductPatch, PurchaseInput,
    Size,
};
use stockroom::StockroomError;

fn validation_message(err: StockroomError) -> String {
    match err {
        StockroomError::Validation(msg) => msg,
        other => panic!("expected a validation error, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[test]
fn category_parses_known_values() {
    assert_eq!("men".parse::<Category>().unwrap(), Category::Men);
    assert_eq!(" women ".parse::<Category>().unwrap(), Category::Women);
    assert_eq!("both".parse::<Category>().unwrap(), Category::Both);
    assert!("kids".parse::<Category>().is_err());
}

#[test]
fn size_parses_known_values() {
    assert_eq!("XXXL".parse::<Size>().unwrap(), Size::XXXL);
    assert!("xl".parse::<Size>().is_err());
    assert_eq!(Size::XL.to_string(), "XL");
}

// ---------------------------------------------------------------------------
// ListInput
// ---------------------------------------------------------------------------

#[test]
fn list_input_splits_comma_separated_text() {
    let list = ListInput::from(" Red, ,Blue ,");
    assert_eq!(list.into_vec(), vec!["Red", "Blue"]);
}

#[test]
fn list_input_accepts_json_array_or_string() {
    let arr: ListInput = serde_json::from_str(r#"["a", " b "]"#).unwrap();
    let csv: ListInput = serde_json::from_str(r#""a,b""#).unwrap();
    assert_eq!(arr.into_vec(), vec!["a", "b"]);
    assert_eq!(csv.into_vec(), vec!["a", "b"]);
}

// ---------------------------------------------------------------------------
// ProductInput
// ---------------------------------------------------------------------------

#[test]
fn complete_product_input_validates() {
    let product = common::tee_input().into_new_product().unwrap();
    assert_eq!(product.title, "Tee");
    assert_eq!(product.category, Category::Men);
    assert_eq!(product.size, vec![Size::M, Size::L]);
    assert_eq!(product.colors, vec!["Red", "Blue"]);
    assert_eq!(product.quantity, 10);
}

#[test]
fn missing_fields_are_reported_by_name() {
    let input = ProductInput {
        title: Some("Tee".into()),
        ..Default::default()
    };
    let msg = validation_message(input.into_new_product().unwrap_err());
    assert_eq!(
        msg,
        "Missing required fields: category, price, size, colors, image, inStock, quantity"
    );
}

#[test]
fn blank_title_counts_as_missing() {
    let input = ProductInput {
        title: Some("   ".into()),
        ..common::tee_input()
    };
    let msg = validation_message(input.into_new_product().unwrap_err());
    assert_eq!(msg, "Missing required fields: title");
}

#[test]
fn constraint_violations_are_all_reported() {
    let input = ProductInput {
        price: Some(-1.0),
        quantity: Some(-5),
        ..common::tee_input()
    };
    let msg = validation_message(input.into_new_product().unwrap_err());
    assert!(msg.contains("price must be a non-negative number"));
    assert!(msg.contains("quantity must not be negative"));
}

#[test]
fn zero_quantity_is_allowed() {
    let input = ProductInput {
        quantity: Some(0),
        ..common::tee_input()
    };
    assert_eq!(input.into_new_product().unwrap().quantity, 0);
}

#[test]
fn unknown_size_is_rejected() {
    let input = ProductInput {
        size: Some("M, Huge".into()),
        ..common::tee_input()
    };
    let msg = validation_message(input.into_new_product().unwrap_err());
    assert!(msg.contains("Huge"));
}

#[test]
fn product_input_deserializes_camel_case_fields() {
    let input: ProductInput = serde_json::from_str(
        r#"{"title":"Tee","category":"men","price":500,"size":["M"],
            "colors":"Red","image":["https://img.example/t.png"],
            "inStock":true,"quantity":10}"#,
    )
    .unwrap();
    assert_eq!(input.in_stock, Some(true));
    assert!(input.into_new_product().is_ok());
}

// ---------------------------------------------------------------------------
// ProductPatch
// ---------------------------------------------------------------------------

#[test]
fn patch_only_changes_given_fields() {
    let store = common::setup_store();
    let tee = store.products().add(common::tee_input()).unwrap();

    let patch = ProductPatch {
        price: Some(450.0),
        colors: Some("Green".into()),
        ..Default::default()
    };
    let merged = patch.apply(&tee).unwrap();
    assert_eq!(merged.price, 450.0);
    assert_eq!(merged.colors, vec!["Green"]);
    assert_eq!(merged.title, tee.title);
    assert_eq!(merged.size, tee.size);
    assert_eq!(merged.quantity, tee.quantity);
}

#[test]
fn patch_clearing_a_list_fails_validation() {
    let store = common::setup_store();
    let tee = store.products().add(common::tee_input()).unwrap();

    let patch = ProductPatch {
        image: Some(ListInput::Many(vec![])),
        ..Default::default()
    };
    let msg = validation_message(patch.apply(&tee).unwrap_err());
    assert!(msg.contains("image"));
}

// ---------------------------------------------------------------------------
// PurchaseInput
// ---------------------------------------------------------------------------

#[test]
fn purchase_input_accepts_number_as_json_number_or_string() {
    let from_number = common::purchase_input("Tee", 1).into_new_purchase().unwrap();
    assert_eq!(from_number.number, "9876543210");

    let from_text = common::purchase_by("Asha", "98765-43210", "Tee", 1)
        .into_new_purchase()
        .unwrap();
    assert_eq!(from_text.number, "98765-43210");
}

#[test]
fn fractional_number_is_invalid_not_missing() {
    let input = PurchaseInput {
        number: Some(serde_json::json!(98765.5)),
        ..common::purchase_input("Tee", 1)
    };
    let msg = validation_message(input.into_new_purchase().unwrap_err());
    assert_eq!(msg, "Number must be a whole number, got 98765.5");
}

#[test]
fn non_scalar_number_is_invalid() {
    let input = PurchaseInput {
        number: Some(serde_json::json!(["98765"])),
        ..common::purchase_input("Tee", 1)
    };
    let msg = validation_message(input.into_new_purchase().unwrap_err());
    assert!(msg.starts_with("Number must be"));
}

#[test]
fn blank_number_counts_as_missing() {
    let input = common::purchase_by("Asha", "  ", "Tee", 1);
    let msg = validation_message(input.into_new_purchase().unwrap_err());
    assert_eq!(msg, "Missing required fields: Number");
}

#[test]
fn purchase_input_reads_price_aliases() {
    let input: PurchaseInput = serde_json::from_str(
        r#"{"Name":"Asha","Number":1,"title":"Tee","totalPrice":99.5,"quantity":1,
            "size":"M","color":"Red","category":"men","image":"https://img.example/t.png"}"#,
    )
    .unwrap();
    assert_eq!(input.into_new_purchase().unwrap().price, 99.5);
}

#[test]
fn purchase_quantity_must_be_positive() {
    let input = common::purchase_input("Tee", 0);
    let msg = validation_message(input.into_new_purchase().unwrap_err());
    assert_eq!(msg, "quantity must be at least 1");
}

#[test]
fn purchase_missing_fields_are_reported_by_name() {
    let input = PurchaseInput {
        title: Some("Tee".into()),
        quantity: Some(1),
        ..Default::default()
    };
    let msg = validation_message(input.into_new_purchase().unwrap_err());
    assert_eq!(
        msg,
        "Missing required fields: Name, Number, totalprice, size, color, category, image"
    );
}

// ---------------------------------------------------------------------------
// Paging arithmetic
// ---------------------------------------------------------------------------

#[test]
fn total_pages_rounds_up() {
    assert_eq!(total_pages(0), 0);
    assert_eq!(total_pages(1), 1);
    assert_eq!(total_pages(50), 1);
    assert_eq!(total_pages(51), 2);
    assert_eq!(total_pages(101), 3);
}

#[test]
fn page_offset_is_capped_for_huge_pages() {
    assert_eq!(page_offset(0), 0);
    assert_eq!(page_offset(1), 0);
    assert_eq!(page_offset(3), 100);
    assert_eq!(page_offset(usize::MAX), i64::MAX as usize);
    assert_eq!(page_offset(200_000_000_000_000_000), i64::MAX as usize);
}
