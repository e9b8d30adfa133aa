// tests/extract_payload.rs
//
// Extractor contract at the library surface: fenced-then-raw recovery and
// the Format/Shape split, exercised with the payload shapes the pipelines
// actually consume.

use serde::Deserialize;
use trend_scout::extract;
use trend_scout::ScoutError;

#[derive(Debug, Deserialize)]
struct TrendingPayload {
    trending_categories: Vec<CategoryEntry>,
}

#[derive(Debug, Deserialize)]
struct CategoryEntry {
    category: String,
    example_product: String,
}

#[derive(Debug, Deserialize)]
struct FallbackPayload {
    description: String,
    amazon_link: String,
}

#[test]
fn fenced_trending_payload_round_trips() {
    let raw = "Sure! Here are the trends:\n```json\n{\"trending_categories\": [\
               {\"category\": \"Home\", \"example_product\": \"air fryer\"},\
               {\"category\": \"Desk\", \"example_product\": \"mechanical keyboard\"}\
               ]}\n```";
    let payload: TrendingPayload = extract::json_payload(raw).expect("fenced payload");
    assert_eq!(payload.trending_categories.len(), 2);
    assert_eq!(payload.trending_categories[0].category, "Home");
    assert_eq!(
        payload.trending_categories[1].example_product,
        "mechanical keyboard"
    );
}

#[test]
fn bare_fallback_payload_round_trips() {
    let raw = "{\"description\": \"Crisp results fast.\", \"amazon_link\": \"https://www.amazon.com/s?k=air+fryer\"}";
    let payload: FallbackPayload = extract::json_payload(raw).expect("bare payload");
    assert_eq!(payload.description, "Crisp results fast.");
    assert!(payload.amazon_link.starts_with("https://"));
}

#[test]
fn prose_is_a_format_error() {
    let err = extract::json_payload::<FallbackPayload>("I couldn't find anything, sorry!")
        .expect_err("prose must fail");
    assert!(matches!(err, ScoutError::Format(_)), "got {err:?}");
}

#[test]
fn valid_json_with_missing_keys_is_a_shape_error() {
    // Parses as JSON, but `amazon_link` is absent: a distinct failure class
    // from unparsable output.
    let err = extract::json_payload::<FallbackPayload>("{\"description\": \"ok\"}")
        .expect_err("missing key must fail");
    assert!(matches!(err, ScoutError::Shape(_)), "got {err:?}");
}
