//! Serialisable page envelope returned by HTTP adapters.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{PageNumber, PageSize, Paginator};

const PAGE_PARAM: &str = "page";

/// Navigation links for a page, derived from the request URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    /// Link to the current page.
    #[serde(rename = "self")]
    pub self_: Url,
    /// Link to the previous page, absent on the first page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<Url>,
    /// Link to the next page, absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Url>,
}

impl PageLinks {
    /// Build links for `page` by rewriting the `page` query parameter of
    /// `base`. Other query parameters are preserved.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageLinks, PageNumber, PageSize, Paginator};
    /// use url::Url;
    ///
    /// let base = Url::parse("https://example.test/listings?sort=new").expect("valid url");
    /// let paginator = Paginator::new(25, PageSize::DEFAULT);
    /// let links = PageLinks::for_page(&base, &paginator, PageNumber::FIRST);
    ///
    /// assert!(links.previous.is_none());
    /// assert_eq!(
    ///     links.next.map(String::from).as_deref(),
    ///     Some("https://example.test/listings?sort=new&page=2")
    /// );
    /// ```
    #[must_use]
    pub fn for_page(base: &Url, paginator: &Paginator, page: PageNumber) -> Self {
        let current = paginator.clamp(page.get());
        let previous = paginator
            .has_previous(current)
            .then(|| with_page(base, paginator.previous(current)));
        let next = paginator
            .has_next(current)
            .then(|| with_page(base, paginator.next(current)));
        Self {
            self_: with_page(base, current),
            previous,
            next,
        }
    }
}

fn with_page(base: &Url, page: PageNumber) -> Url {
    let retained: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != PAGE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(PAGE_PARAM, &page.to_string());
    url
}

/// One page of items plus the metadata needed to render navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Current one-based page number after clamping.
    pub page: PageNumber,
    /// Configured page size.
    pub page_size: PageSize,
    /// Number of items across all pages.
    pub total_items: usize,
    /// Number of pages, never less than one.
    pub total_pages: usize,
    /// Whether a previous page exists.
    pub has_previous: bool,
    /// Whether a next page exists.
    pub has_next: bool,
    /// Optional navigation links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<PageLinks>,
}

impl<T: Clone> Page<T> {
    /// Cut `page` out of a fully materialised collection.
    ///
    /// # Examples
    /// ```
    /// use pagination::{Page, PageNumber, PageSize};
    ///
    /// let items: Vec<u32> = (1..=25).collect();
    /// let page = Page::from_slice(&items, PageNumber::saturating(3), PageSize::DEFAULT);
    ///
    /// assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
    /// assert_eq!(page.total_pages, 3);
    /// assert!(page.has_previous);
    /// assert!(!page.has_next);
    /// ```
    #[must_use]
    pub fn from_slice(items: &[T], page: PageNumber, page_size: PageSize) -> Self {
        let paginator = Paginator::new(items.len(), page_size);
        let current = paginator.clamp(page.get());
        Self {
            items: paginator.slice(items, current).to_vec(),
            page: current,
            page_size,
            total_items: paginator.total_items(),
            total_pages: paginator.total_pages(),
            has_previous: paginator.has_previous(current),
            has_next: paginator.has_next(current),
            links: None,
        }
    }
}

impl<T> Page<T> {
    /// Attach navigation links derived from `base`.
    #[must_use]
    pub fn with_links(mut self, base: &Url) -> Self {
        let paginator = Paginator::new(self.total_items, self.page_size);
        self.links = Some(PageLinks::for_page(base, &paginator, self.page));
        self
    }

    /// Transform the items while keeping the pagination metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
            has_previous: self.has_previous,
            has_next: self.has_next,
            links: self.links,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for the page envelope.
    #![expect(
        clippy::expect_used,
        reason = "test code uses expect for clear failure messages"
    )]

    use super::*;
    use serde_json::{Value, json};

    fn base() -> Url {
        Url::parse("https://powerhub.test/api/v1/listings?page=7&q=solar").expect("valid url")
    }

    #[test]
    fn serialises_in_camel_case_with_links() {
        let items: Vec<u32> = (1..=12).collect();
        let page = Page::from_slice(&items, PageNumber::FIRST, PageSize::DEFAULT).with_links(&base());

        let value = serde_json::to_value(&page).expect("page serialises");
        assert_eq!(value.get("pageSize"), Some(&json!(10)));
        assert_eq!(value.get("totalItems"), Some(&json!(12)));
        assert_eq!(value.get("totalPages"), Some(&json!(2)));
        assert_eq!(value.get("hasNext"), Some(&json!(true)));
        let links = value.get("links").expect("links present");
        assert_eq!(
            links.get("self").and_then(Value::as_str),
            Some("https://powerhub.test/api/v1/listings?q=solar&page=1")
        );
        assert!(links.get("previous").is_none());
        assert_eq!(
            links.get("next").and_then(Value::as_str),
            Some("https://powerhub.test/api/v1/listings?q=solar&page=2")
        );
    }

    #[test]
    fn out_of_range_requests_clamp_to_last_page() {
        let items: Vec<u32> = (1..=12).collect();
        let page = Page::from_slice(&items, PageNumber::saturating(9), PageSize::DEFAULT);

        assert_eq!(page.page.get(), 2);
        assert_eq!(page.items, vec![11, 12]);
        assert!(page.has_previous);
        assert!(!page.has_next);
    }

    #[test]
    fn map_preserves_metadata() {
        let items: Vec<u32> = (1..=3).collect();
        let page = Page::from_slice(&items, PageNumber::FIRST, PageSize::DEFAULT)
            .map(|value| value.to_string());

        assert_eq!(page.items, vec!["1", "2", "3"]);
        assert_eq!(page.total_pages, 1);
    }
}
