//! Wildberries URL derivation.
//!
//! Builds the product detail URL from an article number (nmId) and derives
//! the first product photo URL on the `wbbasket.ru` CDN. The basket host is
//! selected by the article's `vol` range.

/// Returns the catalog detail URL for an article.
pub fn detail_url(article: &str) -> String {
    format!("https://www.wildberries.ru/catalog/{article}/detail.aspx")
}

/// Returns the URL of the first product photo for an article.
///
/// `None` when the article is not a number. The `vol`/`part` path segments
/// and the basket-host ranges follow the CDN's sharding scheme.
pub fn image_url(article: &str) -> Option<String> {
    let nm_id: u64 = article.trim().parse().ok()?;

    let vol = nm_id / 100_000;
    let part = nm_id / 1_000;
    let host = basket_host(vol);

    Some(format!(
        "https://basket-{host}.wbbasket.ru/vol{vol}/part{part}/{nm_id}/images/big/1.webp"
    ))
}

/// Maps a `vol` value to its basket host number.
fn basket_host(vol: u64) -> &'static str {
    match vol {
        0..=143 => "01",
        144..=287 => "02",
        288..=431 => "03",
        432..=719 => "04",
        720..=1007 => "05",
        1008..=1061 => "06",
        1062..=1115 => "07",
        1116..=1169 => "08",
        1170..=1313 => "09",
        1314..=1601 => "10",
        1602..=1655 => "11",
        1656..=1919 => "12",
        1920..=2045 => "13",
        2046..=2189 => "14",
        2190..=2405 => "15",
        2406..=2621 => "16",
        2622..=2837 => "17",
        2838..=3083 => "19",
        3084..=3330 => "20",
        _ => "18",
    }
}
