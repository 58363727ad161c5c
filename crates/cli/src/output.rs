//! Terminal output.

#![allow(clippy::print_stdout)]

use serde_json::Value;
use shopfront_core::{Cart, Product, Wishlist, format_price};

pub fn cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }

    for item in cart.items() {
        println!(
            "{:>10}  {:<32} {:>4} x {:>10} = {:>10}",
            item.id.to_string(),
            item.title,
            item.quantity,
            format_price(item.price),
            format_price(item.subtotal())
        );
    }
    println!(
        "{} item(s), total {}",
        cart.item_count(),
        format_price(cart.total())
    );
}

pub fn wishlist(wishlist: &Wishlist) {
    if wishlist.is_empty() {
        println!("Wishlist is empty");
        return;
    }

    for item in wishlist.items() {
        println!(
            "{:>10}  {:<32} {:>10}",
            item.id.to_string(),
            item.title,
            format_price(item.price)
        );
    }
}

pub fn product(product: &Product) {
    let stock = if product.in_stock { "in stock" } else { "out of stock" };
    println!(
        "{:>10}  {:<32} {:>10}  {}",
        product.id.to_string(),
        product.title,
        format_price(product.price),
        stock
    );
}

pub fn json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{value}"),
    }
}

pub fn line(message: &str) {
    println!("{message}");
}
