// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Attribute extraction over parsed HTML.

use scraper::{Html, Selector};

/// Extract `want_attr` from the first `element` whose `match_attr` equals
/// `match_value`, in document order.
///
/// Matching is exact and case-sensitive on the attribute value. Input that
/// is not well-formed HTML (e.g. a response head pasted before the markup)
/// is tolerated; the parser skips what it cannot interpret.
pub fn attr_of_first(
    page: &str,
    element: &str,
    match_attr: &str,
    match_value: &str,
    want_attr: &str,
) -> Option<String> {
    let document = Html::parse_document(page);
    let selector = Selector::parse(element).ok()?;

    document
        .select(&selector)
        .find(|el| el.value().attr(match_attr) == Some(match_value))
        .and_then(|el| el.value().attr(want_attr))
        .map(|value| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN_PAGE: &str = r#"
        <html><body>
        <form action="/wiki/Special:UserLogin" method="post">
            <input type="text" name="wpName" value="" />
            <input type="password" name="wpPassword" />
            <input type="hidden" name="wpLoginToken" value="d41d8cd98f" />
            <input type="hidden" name="wpLoginToken" value="second-token" />
        </form>
        </body></html>
    "#;

    #[test]
    fn test_first_matching_input_wins() {
        let token = attr_of_first(LOGIN_PAGE, "input", "name", "wpLoginToken", "value");
        assert_eq!(token.as_deref(), Some("d41d8cd98f"));
    }

    #[test]
    fn test_no_matching_input() {
        let token = attr_of_first(LOGIN_PAGE, "input", "name", "wpEditToken", "value");
        assert_eq!(token, None);
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let token = attr_of_first(LOGIN_PAGE, "input", "name", "WPLOGINTOKEN", "value");
        assert_eq!(token, None);
    }

    #[test]
    fn test_tolerates_response_head_prefix() {
        let page = format!(
            "HTTP 200\r\nContent-Type: text/html\r\nSet-Cookie: wiki_session=abc\r\n{}",
            LOGIN_PAGE
        );
        let token = attr_of_first(&page, "input", "name", "wpLoginToken", "value");
        assert_eq!(token.as_deref(), Some("d41d8cd98f"));
    }

    #[test]
    fn test_matching_element_without_wanted_attr() {
        let page = r#"<input name="wpLoginToken" />"#;
        assert_eq!(attr_of_first(page, "input", "name", "wpLoginToken", "value"), None);
    }
}
