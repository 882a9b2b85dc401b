//! Picks a few fields out of a large API response without reading the rest.
//!
//! The document below carries a long `items` list, but the caller only wants
//! the pagination cursor and the first item's title. Lazily parsed, only the
//! bytes in front of those fields are scanned, which the scan counters make
//! visible.
//!
//! Run with
//!
//! ```bash
//! cargo run -p lazyjson --example pick_fields
//! ```
#![allow(missing_docs)]

use lazyjson::{Result, parse};

fn response(items: usize) -> String {
    let items: Vec<String> = (0..items)
        .map(|i| format!(r#"{{"title": "item \"{i}\"", "body": "{}"}}"#, "x".repeat(64)))
        .collect();
    format!(
        r#"{{"page": {{"next": "cursor-42", "size": {}}}, "items": [{}], "trailer": null}}"#,
        items.len(),
        items.join(", ")
    )
}

fn main() -> Result<()> {
    let text = response(5_000);
    let doc = parse(text.as_str())?;

    let next = doc.get("page")?.get("next")?;
    let items = doc.get("items")?;
    let first = items.at(0)?.get("title")?;

    println!("next cursor: {}", next.as_str()?);
    println!("first title: {}", first.as_str()?);

    let root = doc.as_object()?;
    let list = items.as_array()?;
    println!(
        "document: {} bytes, root entries scanned: {}, items scanned: {}",
        text.len(),
        root.scanned_entries(),
        list.scanned_len()
    );

    // Now validate everything, e.g. before caching the response.
    doc.materialize()?;
    println!("validated {} items", list.len()?);
    Ok(())
}
