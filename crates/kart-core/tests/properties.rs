//! Property-based tests for the cart engine and pricing.
//!
//! These tests use proptest to verify that the reconciliation and pricing
//! rules hold across many randomly generated carts and inputs.

use kart_core::config::default_catalog;
use kart_core::snapshot::{decode, encode, load_initial_items};
use kart_core::{
    CartConfig, CartEngine, ItemId, KeyValueStore, LineItem, MemoryStore, Money, Quantity,
    DISCOUNT_ERROR_MESSAGE,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

prop_compose! {
    fn arbitrary_item(id: i64)(
        name in "[A-Za-z ]{1,20}",
        paise in 0i64..10_000_000,
        quantity in 1u32..500,
    ) -> LineItem {
        LineItem::new(
            ItemId::new(id),
            name,
            Money::from_paise(paise),
            Quantity::units(quantity).unwrap(),
        )
    }
}

fn arbitrary_cart() -> impl Strategy<Value = Vec<LineItem>> {
    (1usize..8).prop_flat_map(|len| {
        (0..len)
            .map(|index| arbitrary_item(index as i64 * 7 + 3))
            .collect::<Vec<_>>()
    })
}

fn engine_with(items: &[LineItem]) -> CartEngine<MemoryStore> {
    let store = MemoryStore::with_entry("cartProducts", encode(items).unwrap());
    CartEngine::load(CartConfig::default(), store)
}

proptest! {
    #[test]
    fn unusable_snapshot_falls_back_to_catalog(raw in ".*") {
        if decode(&raw).is_err() {
            prop_assert_eq!(load_initial_items(Some(&raw), &default_catalog()), default_catalog());
        }
    }

    #[test]
    fn non_array_json_falls_back_to_catalog(value in prop_oneof![
        any::<i64>().prop_map(|n| n.to_string()),
        "[a-z]{0,10}".prop_map(|s| format!("\"{s}\"")),
        Just("{}".to_string()),
        Just("null".to_string()),
        Just("[]".to_string()),
    ]) {
        let engine = CartEngine::load(
            CartConfig::default(),
            MemoryStore::with_entry("cartProducts", value),
        );
        let catalog = default_catalog();
        prop_assert_eq!(engine.items(), catalog.as_slice());
    }

    #[test]
    fn snapshot_round_trips(items in arbitrary_cart()) {
        let decoded = decode(&encode(&items).unwrap()).unwrap();
        prop_assert_eq!(decoded, items);
    }

    #[test]
    fn engine_reload_reproduces_items(items in arbitrary_cart()) {
        let engine = engine_with(&items);
        let reloaded = CartEngine::load(CartConfig::default(), engine.into_store());
        prop_assert_eq!(reloaded.items(), items.as_slice());
    }

    #[test]
    fn quantity_below_one_is_ignored(
        items in arbitrary_cart(),
        pick in any::<prop::sample::Index>(),
        bad in -1_000i64..1,
    ) {
        let mut engine = engine_with(&items);
        let before = engine.store().get("cartProducts").unwrap();
        let target = items[pick.index(items.len())].id();

        prop_assert!(!engine.update_quantity(target, &bad.to_string()));
        prop_assert_eq!(engine.items(), items.as_slice());
        prop_assert_eq!(engine.store().get("cartProducts").unwrap(), before);
    }

    #[test]
    fn quantity_update_touches_only_target(
        items in arbitrary_cart(),
        pick in any::<prop::sample::Index>(),
        good in 1u32..10_000,
    ) {
        let mut engine = engine_with(&items);
        let target = items[pick.index(items.len())].id();

        engine.update_quantity(target, &good.to_string());

        for (before, after) in items.iter().zip(engine.items()) {
            prop_assert_eq!(before.id(), after.id());
            prop_assert_eq!(before.unit_price(), after.unit_price());
            if before.id() == target {
                prop_assert_eq!(after.quantity(), Quantity::units(good).unwrap());
            } else {
                prop_assert_eq!(after.quantity(), before.quantity());
            }
        }
    }

    #[test]
    fn precise_prices_survive_reload(
        mantissa in 1i64..i64::MAX,
        scale in 0u32..=28,
        quantity in 1u32..1_000,
    ) {
        let price = Money::new(Decimal::new(mantissa, scale));
        let items = vec![LineItem::new(
            ItemId::new(1),
            "Spice",
            price,
            Quantity::units(quantity).unwrap(),
        )];

        let engine = engine_with(&items);
        let reloaded = CartEngine::load(CartConfig::default(), engine.into_store());
        prop_assert_eq!(reloaded.items()[0].unit_price().amount(), price.amount());
    }

    #[test]
    fn totals_never_panic(
        mantissa in any::<u64>(),
        exponent in 0u32..=9,
        raw_quantity in "[0-9]{1,12}(\\.[0-9]{1,4})?",
    ) {
        let price = Decimal::from(mantissa) * Decimal::from(10_u64.pow(exponent));
        let store = MemoryStore::with_entry(
            "cartProducts",
            format!(r#"[{{"id": 1, "name": "X", "price": "{price}", "quantity": 1}}]"#),
        );
        let mut engine = CartEngine::load(CartConfig::default(), store);

        engine.update_quantity(ItemId::new(1), &raw_quantity);
        engine.set_discount_input("37.5");

        let totals = engine.totals();
        prop_assert!(totals.discount_amount <= totals.subtotal);
    }

    #[test]
    fn removing_every_item_empties_cart(items in arbitrary_cart()) {
        let mut engine = engine_with(&items);

        for item in &items {
            prop_assert!(engine.remove_item(item.id()));
        }

        prop_assert!(engine.state().is_empty());
        prop_assert_eq!(engine.totals().subtotal, Money::zero());
    }

    #[test]
    fn valid_discount_is_bounded(items in arbitrary_cart(), hundredths in 0i64..=10_000) {
        let mut engine = engine_with(&items);
        let rate = Decimal::new(hundredths, 2);
        engine.set_discount_input(rate.to_string());

        let totals = engine.totals();
        prop_assert_eq!(engine.state().discount_error(), None);
        prop_assert_eq!(
            totals.discount_amount.amount(),
            totals.subtotal.amount() * rate / Decimal::ONE_HUNDRED
        );
        prop_assert!(!totals.discount_amount.is_negative());
        prop_assert!(totals.discount_amount <= totals.subtotal);
        prop_assert!(!totals.final_total.is_negative());
    }

    #[test]
    fn out_of_range_discount_is_neutral(
        items in arbitrary_cart(),
        raw in prop_oneof![
            (10_001i64..1_000_000).prop_map(|n| Decimal::new(n, 2).to_string()),
            (1i64..1_000_000).prop_map(|n| format!("-{}", Decimal::new(n, 2))),
            "[a-zA-Z]{1,8}",
        ],
    ) {
        let mut engine = engine_with(&items);
        engine.set_discount_input(raw.clone());

        let totals = engine.totals();
        prop_assert_eq!(engine.state().discount_input(), raw.as_str());
        prop_assert_eq!(engine.state().discount_error(), Some(DISCOUNT_ERROR_MESSAGE));
        prop_assert_eq!(totals.discount_amount, Money::zero());
        prop_assert_eq!(totals.final_total, totals.subtotal);
    }
}
