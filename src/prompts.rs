// src/prompts.rs
// Prompt templates. Declared-shape prompts spell out the exact JSON contract
// the extractor will enforce; the model still wraps output in Markdown
// fences often enough that extraction stays two-tier (see extract.rs).

/// Discovery call: ask for `n` category/example-product pairs.
pub fn trending_categories(n: usize) -> String {
    format!(
        "You are a shopping trend analyst. List {n} product categories that are \
         trending with online shoppers right now, each with one concrete example \
         product. Respond ONLY with JSON of this exact shape:\n\
         {{\"trending_categories\": [{{\"category\": \"...\", \"example_product\": \"...\"}}]}}"
    )
}

/// Marketing blurb for a priced-search winner. Free text, no declared shape.
pub fn product_description(name: &str) -> String {
    format!(
        "Write one short, punchy marketing sentence (max 25 words, no emojis) \
         for this product: {name}. Output only the sentence."
    )
}

/// Fallback-layer call: description plus a plausible store link for a keyword.
pub fn fallback_product(keyword: &str) -> String {
    format!(
        "For the product keyword \"{keyword}\", respond ONLY with JSON of this \
         exact shape:\n\
         {{\"description\": \"one short marketing sentence\", \
         \"amazon_link\": \"a plausible Amazon search or product URL\"}}"
    )
}

/// Content call: ask for `n` full article bodies.
pub fn articles(n: usize) -> String {
    format!(
        "You are the editor of a consumer shopping magazine. Write {n} short \
         articles about current product trends. Respond ONLY with JSON of this \
         exact shape:\n\
         {{\"articles\": [{{\"title\": \"...\", \"author\": \"...\", \
         \"summary\": \"one sentence\", \"content\": \"3-4 paragraphs of markdown\", \
         \"takeaways\": [\"...\", \"...\"]}}]}}"
    )
}

/// Learn/Q&A call about a scanned product.
pub fn answer(question: &str) -> String {
    format!(
        "Answer this shopper question concisely, then suggest follow-ups. \
         Question: {question}\n\
         Respond ONLY with JSON of this exact shape:\n\
         {{\"answer\": \"...\", \"relatedQuestions\": [\"...\", \"...\", \"...\"]}}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_substitute_caller_values() {
        assert!(trending_categories(6).contains("List 6 product categories"));
        assert!(fallback_product("air fryer").contains("\"air fryer\""));
        assert!(answer("is it safe?").contains("is it safe?"));
    }

    #[test]
    fn prompts_are_never_empty() {
        for p in [
            trending_categories(1),
            product_description(""),
            fallback_product(""),
            articles(3),
            answer(""),
        ] {
            assert!(!p.trim().is_empty());
        }
    }
}
