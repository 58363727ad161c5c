//! Normalized catalog products.
//!
//! The upstream backend is loose about product payloads: the same field
//! shows up as `title` on one endpoint and `name` on another, prices arrive
//! as numbers or strings, images as a URL, an array of URLs, or an array of
//! objects. [`Product::from_upstream`] is the single place where those
//! shapes are folded into one record with explicit defaults. Nothing past
//! the proxy boundary reads raw product JSON.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{ProductId, parse_price};

/// Title used when upstream provides none.
pub const DEFAULT_TITLE: &str = "Untitled product";

const ID_KEYS: &[&str] = &["id", "_id", "productId", "product_id"];
const TITLE_KEYS: &[&str] = &["title", "name", "productName", "product_name"];
const PRICE_KEYS: &[&str] = &[
    "price",
    "salePrice",
    "sale_price",
    "sellingPrice",
    "regularPrice",
];
const IMAGE_KEYS: &[&str] = &["image", "imageUrl", "image_url", "thumbnail", "images"];
const CATEGORY_KEYS: &[&str] = &["category", "categoryName", "category_name"];
const DESCRIPTION_KEYS: &[&str] = &["description", "shortDescription", "summary"];
const STOCK_FLAG_KEYS: &[&str] = &["inStock", "in_stock", "available"];
const STOCK_COUNT_KEYS: &[&str] = &["stock", "countInStock", "quantity"];

/// A catalog product in the shape the rest of the system relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Primary image URL, empty when upstream has none.
    pub image: String,
    pub category: Option<String>,
    pub description: String,
    pub in_stock: bool,
}

impl Product {
    /// Normalize a loosely-typed upstream product payload.
    ///
    /// Returns `None` when the value is not an object or carries no usable
    /// id. Every other field falls back to a default:
    ///
    /// | field | keys tried | default |
    /// |-------|------------|---------|
    /// | title | `title`, `name`, `productName` | `"Untitled product"` |
    /// | price | `price`, `salePrice`, `sellingPrice`, `regularPrice` | `0` |
    /// | image | `image`, `imageUrl`, `thumbnail`, `images[0]` | `""` |
    /// | category | `category` (string or `{name}`), `categoryName` | `None` |
    /// | description | `description`, `shortDescription`, `summary` | `""` |
    /// | in stock | `inStock`, `available`, `stock > 0`, `countInStock > 0` | `true` |
    #[must_use]
    pub fn from_upstream(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;

        let id = ID_KEYS
            .iter()
            .filter_map(|key| obj.get(*key))
            .find_map(ProductId::from_json)?;

        Some(Self {
            id,
            title: first_string(obj, TITLE_KEYS).unwrap_or_else(|| DEFAULT_TITLE.to_owned()),
            price: first_price(obj).unwrap_or(Decimal::ZERO),
            image: first_image(obj).unwrap_or_default(),
            category: first_category(obj),
            description: first_string(obj, DESCRIPTION_KEYS).unwrap_or_default(),
            in_stock: stock_status(obj),
        })
    }

    /// Normalize an upstream product listing.
    ///
    /// Accepts a bare array or an object wrapping the array under
    /// `products`, `data`, or `items`. Entries without an id are dropped.
    #[must_use]
    pub fn list_from_upstream(value: &Value) -> Vec<Self> {
        let entries = match value {
            Value::Array(items) => Some(items),
            Value::Object(obj) => ["products", "data", "items"]
                .iter()
                .find_map(|key| obj.get(*key).and_then(Value::as_array)),
            _ => None,
        };

        entries
            .map(|items| items.iter().filter_map(Self::from_upstream).collect())
            .unwrap_or_default()
    }

    /// Normalize a single-product response.
    ///
    /// Accepts the product object itself or one wrapped under `product` or
    /// `data`.
    #[must_use]
    pub fn one_from_upstream(value: &Value) -> Option<Self> {
        ["product", "data"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Self::from_upstream))
            .or_else(|| Self::from_upstream(value))
    }
}

fn first_string(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| obj.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_owned)
}

fn first_price(obj: &Map<String, Value>) -> Option<Decimal> {
    PRICE_KEYS
        .iter()
        .filter_map(|key| obj.get(*key))
        .find_map(|value| match value {
            // { "price": { "amount": "12.00", "currencyCode": "USD" } }
            Value::Object(money) => money.get("amount").and_then(parse_price),
            other => parse_price(other),
        })
}

fn first_image(obj: &Map<String, Value>) -> Option<String> {
    IMAGE_KEYS
        .iter()
        .filter_map(|key| obj.get(*key))
        .find_map(image_url)
}

fn image_url(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Object(img) => ["url", "src", "secure_url"]
            .iter()
            .find_map(|key| img.get(*key).and_then(image_url)),
        Value::Array(items) => items.iter().find_map(image_url),
        _ => None,
    }
}

fn first_category(obj: &Map<String, Value>) -> Option<String> {
    CATEGORY_KEYS
        .iter()
        .filter_map(|key| obj.get(*key))
        .find_map(|value| match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
            Value::Object(category) => first_string(category, &["name", "title", "slug"]),
            _ => None,
        })
}

fn stock_status(obj: &Map<String, Value>) -> bool {
    if let Some(flag) = STOCK_FLAG_KEYS
        .iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_bool))
    {
        return flag;
    }

    STOCK_COUNT_KEYS
        .iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_f64))
        .is_none_or(|count| count > 0.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_payload() {
        let product = Product::from_upstream(&json!({
            "id": 1,
            "title": "Linen Shirt",
            "price": 49.5,
            "image": "https://cdn.example.com/shirt.jpg",
            "category": "apparel",
            "description": "Breathable.",
            "inStock": true
        }))
        .unwrap();

        assert_eq!(product.id, ProductId::Number(1));
        assert_eq!(product.title, "Linen Shirt");
        assert_eq!(product.price, Decimal::new(495, 1));
        assert_eq!(product.image, "https://cdn.example.com/shirt.jpg");
        assert_eq!(product.category.as_deref(), Some("apparel"));
        assert!(product.in_stock);
    }

    #[test]
    fn test_fallback_keys() {
        let product = Product::from_upstream(&json!({
            "_id": "64f1c0ffee",
            "name": "Mug",
            "salePrice": "$12.00",
            "images": [{"url": "https://cdn.example.com/mug.png"}],
            "category": {"name": "kitchen"},
            "shortDescription": "Holds coffee.",
            "countInStock": 0
        }))
        .unwrap();

        assert_eq!(product.id, ProductId::from("64f1c0ffee"));
        assert_eq!(product.title, "Mug");
        assert_eq!(product.price, Decimal::from(12));
        assert_eq!(product.image, "https://cdn.example.com/mug.png");
        assert_eq!(product.category.as_deref(), Some("kitchen"));
        assert_eq!(product.description, "Holds coffee.");
        assert!(!product.in_stock);
    }

    #[test]
    fn test_defaults() {
        let product = Product::from_upstream(&json!({"id": 5})).unwrap();

        assert_eq!(product.title, DEFAULT_TITLE);
        assert_eq!(product.price, Decimal::ZERO);
        assert_eq!(product.image, "");
        assert_eq!(product.category, None);
        assert_eq!(product.description, "");
        assert!(product.in_stock);
    }

    #[test]
    fn test_blank_title_falls_through() {
        let product = Product::from_upstream(&json!({"id": 5, "title": "  ", "name": "Cap"})).unwrap();
        assert_eq!(product.title, "Cap");
    }

    #[test]
    fn test_money_object_price() {
        let product = Product::from_upstream(&json!({
            "id": 2,
            "price": {"amount": "8.25", "currencyCode": "USD"}
        }))
        .unwrap();
        assert_eq!(product.price, Decimal::new(825, 2));
    }

    #[test]
    fn test_missing_id_is_rejected() {
        assert!(Product::from_upstream(&json!({"title": "Ghost"})).is_none());
        assert!(Product::from_upstream(&json!("not an object")).is_none());
    }

    #[test]
    fn test_list_shapes() {
        let items = json!([{"id": 1}, {"title": "no id"}, {"id": 2}]);
        assert_eq!(Product::list_from_upstream(&items).len(), 2);

        let wrapped = json!({"products": [{"id": 1}], "total": 1});
        assert_eq!(Product::list_from_upstream(&wrapped).len(), 1);

        let data = json!({"data": [{"id": 1}, {"id": 2}, {"id": 3}]});
        assert_eq!(Product::list_from_upstream(&data).len(), 3);

        assert!(Product::list_from_upstream(&json!({"unexpected": true})).is_empty());
    }

    #[test]
    fn test_one_from_upstream_unwraps() {
        let wrapped = json!({"product": {"id": 9, "name": "Tote"}});
        assert_eq!(Product::one_from_upstream(&wrapped).unwrap().title, "Tote");

        let bare = json!({"id": 9, "name": "Tote"});
        assert_eq!(Product::one_from_upstream(&bare).unwrap().id, ProductId::Number(9));
    }

    #[test]
    fn test_price_serializes_as_number() {
        let product = Product::from_upstream(&json!({"id": 1, "price": "10.5"})).unwrap();
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["price"], json!(10.5));
        assert_eq!(json["inStock"], json!(true));
    }
}
