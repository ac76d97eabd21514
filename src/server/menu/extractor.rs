//! Flattens the upstream menu document into restaurant info, offers and menu sections.
//!
//! The upstream payload is owned by a third party and has no stable schema, so every hop
//! below is an `Option` lookup. Anything missing or of the wrong shape counts as "no match".

use serde_json::Value;

const RESTAURANT_TYPE: &str = "type.googleapis.com/swiggy.presentation.food.v2.Restaurant";
const GRID_WIDGET_TYPE: &str = "type.googleapis.com/swiggy.gandalf.widgets.v2.GridWidget";
const ITEM_CATEGORY_TYPE: &str = "type.googleapis.com/swiggy.presentation.food.v2.ItemCategory";

const TYPE_KEY: &str = "@type";
const GROUPED_CARD_KEY: &str = "groupedCard";

/// Normalized view of one upstream menu document
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct MenuExtract {
    pub restaurant_info: Option<Value>,
    pub offers: Vec<Value>,
    pub menu_sections: Vec<Vec<Value>>,
}

/// Run all three projections over `doc`.
pub(crate) fn extract(doc: &Value) -> MenuExtract {
    let cards = top_level_cards(doc);
    MenuExtract {
        restaurant_info: restaurant_info(cards),
        offers: offers(cards),
        menu_sections: menu_sections(cards),
    }
}

/// `data.cards`, empty when absent or not an array
fn top_level_cards(doc: &Value) -> &[Value] {
    doc.get("data")
        .and_then(|data| data.get("cards"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// `@type` of the value at `path` below `value`
fn discriminator<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    path.iter()
        .try_fold(value, |node, key| node.get(key))
        .and_then(|node| node.get(TYPE_KEY))
        .and_then(Value::as_str)
}

/// First top-level card whose `card.@type` equals `tag`. Only the first one is ever used.
fn first_card_of_type<'a>(cards: &'a [Value], tag: &str) -> Option<&'a Value> {
    cards
        .iter()
        .filter(|card| card.is_object())
        .find(|card| discriminator(card, &["card"]) == Some(tag))
}

pub(crate) fn restaurant_info(cards: &[Value]) -> Option<Value> {
    first_card_of_type(cards, RESTAURANT_TYPE)
        .and_then(|card| card.get("card"))
        .and_then(|card| card.get("info"))
        .cloned()
}

pub(crate) fn offers(cards: &[Value]) -> Vec<Value> {
    let Some(card) = first_card_of_type(cards, GRID_WIDGET_TYPE) else {
        return vec![];
    };
    ["card", "gridElements", "infoWithStyle", "offers"]
        .iter()
        .try_fold(card, |node, key| node.get(key))
        .and_then(Value::as_array)
        .map(|offers| {
            offers
                .iter()
                // keep positions, an offer without info becomes null
                .map(|offer| offer.get("info").cloned().unwrap_or(Value::Null))
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn menu_sections(cards: &[Value]) -> Vec<Vec<Value>> {
    cards
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|entry| entry.get(GROUPED_CARD_KEY))
        .map(item_categories)
        .collect()
}

/// `card.card` of every `ItemCategory` in `cardGroupMap.REGULAR.cards`
fn item_categories(grouped: &Value) -> Vec<Value> {
    let Some(regular) = ["cardGroupMap", "REGULAR", "cards"]
        .iter()
        .try_fold(grouped, |node, key| node.get(key))
        .and_then(Value::as_array)
    else {
        return vec![];
    };
    regular
        .iter()
        .filter(|card| card.is_object())
        .filter(|card| discriminator(card, &["card", "card"]) == Some(ITEM_CATEGORY_TYPE))
        .filter_map(|card| card.get("card").and_then(|inner| inner.get("card")).cloned())
        .collect()
}
