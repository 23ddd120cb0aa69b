mod common;

use common::{customer, menu_item, price};
use restaurant_storefront::{
    models::OrderType,
    storefront::{
        Cart, CustomerDetails, MAX_LINE_QUANTITY, NoticeKind, ValidationError, format_money,
        validate,
    },
};

#[test]
fn distinct_items_get_one_line_each() {
    let items = [
        menu_item("Margherita Pizza", 1299),
        menu_item("Pepperoni Pizza", 1450),
        menu_item("Caesar Salad", 875),
    ];
    let mut cart = Cart::new();
    for item in &items {
        cart.add_item(item);
    }

    assert_eq!(cart.lines().len(), 3);
    assert_eq!(cart.total_item_count(), 3);
    let order: Vec<&str> = cart.lines().iter().map(|l| l.item.name()).collect();
    assert_eq!(order, ["Margherita Pizza", "Pepperoni Pizza", "Caesar Salad"]);
}

#[test]
fn adding_the_same_item_twice_increments_one_line() {
    let pizza = menu_item("Margherita Pizza", 1299);
    let mut cart = Cart::new();

    let first = cart.add_item(&pizza).expect("acknowledged");
    cart.add_item(&pizza);

    assert_eq!(first.kind, NoticeKind::Info);
    assert_eq!(first.title, "Item added to cart!");
    assert_eq!(first.description, "Margherita Pizza has been added.");
    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.quantity_of(pizza.id), Some(2));
    assert_eq!(cart.total_item_count(), 2);
}

#[test]
fn unavailable_items_are_ignored_silently() {
    let mut sold_out = menu_item("Calzone", 1100);
    sold_out.is_available = false;
    let mut cart = Cart::new();

    assert!(cart.add_item(&sold_out).is_none());
    assert!(cart.is_empty());
}

#[test]
fn subtotal_is_exact() {
    let pizza = menu_item("Margherita Pizza", 1299);
    let salad = menu_item("Caesar Salad", 875);
    let mut cart = Cart::new();
    cart.add_item(&pizza);
    cart.add_item(&pizza);
    cart.add_item(&salad);

    assert_eq!(cart.subtotal(), price(3473));
    assert_eq!(format_money(cart.subtotal()), "$34.73");
}

#[test]
fn subtotal_has_no_float_drift() {
    let mint = menu_item("After-dinner mint", 10);
    let mut cart = Cart::new();
    cart.add_item(&mint);
    cart.add_item(&mint);
    cart.add_item(&mint);

    assert_eq!(cart.subtotal(), price(30));
    assert_eq!(cart.subtotal().to_string(), "0.30");
    assert_eq!(format_money(cart.subtotal()), "$0.30");
}

#[test]
fn line_quantity_is_capped_instead_of_overflowing() {
    let pizza = menu_item("Margherita Pizza", 1299);
    let mut cart = Cart::new();
    cart.add_item(&pizza);

    cart.set_quantity(pizza.id, i64::MAX);
    assert_eq!(cart.quantity_of(pizza.id), Some(MAX_LINE_QUANTITY));

    cart.add_item(&pizza);
    cart.increment(pizza.id);
    assert_eq!(cart.quantity_of(pizza.id), Some(MAX_LINE_QUANTITY));
    assert_eq!(cart.lines().len(), 1);
}

#[test]
fn setting_quantity_to_zero_removes_the_line() {
    let pizza = menu_item("Margherita Pizza", 1299);
    let mut cart = Cart::new();
    cart.add_item(&pizza);

    cart.set_quantity(pizza.id, 0);

    assert!(cart.is_empty());
    assert_eq!(cart.total_item_count(), 0);
}

#[test]
fn decrementing_from_one_removes_and_from_more_reduces() {
    let pizza = menu_item("Margherita Pizza", 1299);
    let salad = menu_item("Caesar Salad", 875);
    let mut cart = Cart::new();
    cart.add_item(&pizza);
    cart.add_item(&salad);
    cart.set_quantity(salad.id, 3);

    cart.decrement(salad.id);
    assert_eq!(cart.quantity_of(salad.id), Some(2));

    cart.decrement(pizza.id);
    assert_eq!(cart.quantity_of(pizza.id), None);

    cart.increment(salad.id);
    assert_eq!(cart.quantity_of(salad.id), Some(3));
    assert_eq!(cart.total_item_count(), 3);
}

#[test]
fn negative_quantity_removes_and_unknown_ids_are_ignored() {
    let pizza = menu_item("Margherita Pizza", 1299);
    let other = menu_item("Pepperoni Pizza", 1450);
    let mut cart = Cart::new();
    cart.add_item(&pizza);

    cart.set_quantity(other.id, 4);
    cart.remove_item(other.id);
    assert_eq!(cart.quantity_of(pizza.id), Some(1));

    cart.set_quantity(pizza.id, -2);
    assert!(cart.is_empty());
}

#[test]
fn cart_lines_hold_a_snapshot_of_the_menu_item() {
    let mut pizza = menu_item("Margherita Pizza", 1299);
    let mut cart = Cart::new();
    cart.add_item(&pizza);

    pizza.price = price(1999);
    pizza.name = "Renamed".to_string();
    pizza.is_available = false;

    let line = &cart.lines()[0];
    assert_eq!(line.item.price(), price(1299));
    assert_eq!(line.item.name(), "Margherita Pizza");
    assert!(line.item.is_available());
    assert_eq!(cart.subtotal(), price(1299));
}

#[test]
fn validation_rejects_an_empty_cart_even_with_full_details() {
    let mut details = customer();
    details.address = Some("1 Main St".to_string());

    assert_eq!(
        validate(&[], &details, OrderType::Pickup),
        Err(ValidationError::EmptyCart)
    );
    assert_eq!(
        validate(&[], &details, OrderType::Delivery),
        Err(ValidationError::EmptyCart)
    );
}

#[test]
fn validation_requires_name_and_email() {
    let mut cart = Cart::new();
    cart.add_item(&menu_item("Margherita Pizza", 1299));

    let no_name = CustomerDetails {
        name: "   ".to_string(),
        ..customer()
    };
    let no_email = CustomerDetails {
        email: String::new(),
        ..customer()
    };

    assert_eq!(
        validate(cart.lines(), &no_name, OrderType::Pickup),
        Err(ValidationError::MissingCustomerInfo)
    );
    assert_eq!(
        validate(cart.lines(), &no_email, OrderType::Pickup),
        Err(ValidationError::MissingCustomerInfo)
    );
}

#[test]
fn delivery_needs_an_address_but_pickup_does_not() {
    let mut cart = Cart::new();
    cart.add_item(&menu_item("Margherita Pizza", 1299));
    let mut details = customer();
    details.address = Some("  ".to_string());

    assert_eq!(
        validate(cart.lines(), &details, OrderType::Delivery),
        Err(ValidationError::MissingCustomerInfo)
    );
    assert_eq!(validate(cart.lines(), &details, OrderType::Pickup), Ok(()));

    details.address = Some("123 Main St, Anytown".to_string());
    assert_eq!(validate(cart.lines(), &details, OrderType::Delivery), Ok(()));
}
