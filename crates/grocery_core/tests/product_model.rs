use grocery_core::Product;
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;

#[test]
fn serializes_with_camel_case_keys_and_string_price() {
    let mut product = Product::new("Milk12", "MM")
        .with_stock(1000)
        .with_price(Decimal::from_str("1.50").unwrap());
    product.id = Some(1);

    let value = serde_json::to_value(&product).unwrap();
    assert_eq!(
        value,
        json!({
            "id": 1,
            "name": "Milk12",
            "description": null,
            "category": "MM",
            "initialQuantity": 1000,
            "remainingQuantity": 1000,
            "pricePerUnit": "1.50"
        })
    );
}

#[test]
fn deserializes_numeric_or_string_price_without_id() {
    let from_number: Product = serde_json::from_value(json!({
        "name": "Milk12",
        "category": "MM",
        "initialQuantity": 1000,
        "remainingQuantity": 1000,
        "pricePerUnit": 1
    }))
    .unwrap();
    assert_eq!(from_number.id, None);
    assert_eq!(from_number.price_per_unit, Decimal::ONE);

    let from_string: Product = serde_json::from_value(json!({
        "name": "Milk12",
        "category": "MM",
        "pricePerUnit": "19.99"
    }))
    .unwrap();
    assert_eq!(from_string.price_per_unit, Decimal::from_str("19.99").unwrap());
}

#[test]
fn numeric_price_keeps_every_significant_digit() {
    let product: Product = serde_json::from_str(
        r#"{"name":"Milk12","category":"MM","pricePerUnit":12345678901234567.89}"#,
    )
    .unwrap();
    assert_eq!(
        product.price_per_unit,
        Decimal::from_str("12345678901234567.89").unwrap()
    );

    let small: Product =
        serde_json::from_str(r#"{"name":"Salt","category":"MM","pricePerUnit":0.1}"#).unwrap();
    assert_eq!(small.price_per_unit.to_string(), "0.1");
}

#[test]
fn omitted_optional_fields_default_to_zero_or_none() {
    let product: Product = serde_json::from_value(json!({
        "name": "Bread",
        "category": "bakery"
    }))
    .unwrap();

    assert_eq!(product.description, None);
    assert_eq!(product.initial_quantity, 0);
    assert_eq!(product.remaining_quantity, 0);
    assert_eq!(product.price_per_unit, Decimal::ZERO);
}

#[test]
fn missing_required_field_fails_to_deserialize() {
    let result = serde_json::from_value::<Product>(json!({ "name": "Bread" }));
    assert!(result.is_err());
}
