//! Leaf page crawler
//!
//! Resolves a hierarchical listing URL to the set of terminal ("leaf")
//! content pages it ultimately references. A page with a navigable list (its
//! first `<ul>`) links to children; a page without one is itself a leaf.
//!
//! The traversal uses an explicit stack with a visited set and a depth cap,
//! so cyclic or pathological listings terminate instead of recursing without
//! bound.

use std::collections::HashSet;

use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use crate::harvest::fetcher::fetch_text;
use crate::Result;

/// Listings nested deeper than this are treated as leaves.
const MAX_LIST_DEPTH: usize = 16;

/// Crawls a listing URL down to its leaf content pages
///
/// Leaves come back in the order the unguarded depth-first traversal would
/// visit them: children in list order, each child's subtree fully expanded
/// before its next sibling. Fetch failures anywhere in the traversal fail
/// the whole crawl; only a missing or unparsable child list degrades a page
/// to a leaf.
pub async fn crawl_leaves(client: &Client, root: &Url) -> Result<Vec<Url>> {
    let mut leaves = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut stack = vec![(root.clone(), 0usize)];

    while let Some((url, depth)) = stack.pop() {
        if !visited.insert(url.to_string()) {
            continue;
        }

        let body = fetch_text(client, &url).await?;
        match child_links(&body, &url) {
            Some(children) if depth < MAX_LIST_DEPTH => {
                // Reversed so the first child is popped next
                for child in children.into_iter().rev() {
                    stack.push((child, depth + 1));
                }
            }
            Some(_) => {
                tracing::warn!("Listing nesting too deep at {}, treating as leaf", url);
                leaves.push(url);
            }
            None => leaves.push(url),
        }
    }

    Ok(leaves)
}

/// Extracts the child links of a listing page
///
/// Returns `None` when the page has no navigable list, which marks the page
/// as a leaf. A present but empty list returns `Some` with no entries.
/// Hrefs are resolved sibling-relative: against the parent directory of
/// `page_url`, not the page itself.
pub fn child_links(html: &str, page_url: &Url) -> Option<Vec<Url>> {
    let document = Html::parse_document(html);
    let list_selector = Selector::parse("ul").ok()?;
    let anchor_selector = Selector::parse("a[href]").ok()?;

    let list = document.select(&list_selector).next()?;

    let mut children = Vec::new();
    for anchor in list.select(&anchor_selector) {
        if let Some(href) = anchor.value().attr("href") {
            match page_url.join(href) {
                Ok(child) => children.push(child),
                Err(e) => {
                    tracing::debug!("Skipping child link {}: {}", href, e);
                }
            }
        }
    }

    Some(children)
}
