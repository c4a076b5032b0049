//! Extension listing filter
//!
//! Encodes to the backend's PascalCase query (`SearchTerm`, `TagIds`, ...)
//! and reads the dashboard's own camelCase URL query.

use reqwest::Url;

pub const DEFAULT_PAGE_NUMBER: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Placeholder origin for encoding/decoding bare query strings
const QUERY_BASE: &str = "http://localhost/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    pub search_term: Option<String>,
    pub uploader_id: Option<String>,
    pub tag_ids: Vec<String>,
    pub sort_by: Option<String>,
    pub sort_descending: Option<bool>,
    pub page_number: u32,
    pub page_size: u32,
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self {
            search_term: None,
            uploader_id: None,
            tag_ids: Vec::new(),
            sort_by: None,
            sort_descending: None,
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ExtensionFilter {
    /// Same filter on another page
    pub fn with_page(mut self, page_number: u32) -> Self {
        self.page_number = page_number;
        self
    }

    /// Backend query pairs, in a stable order; blank values are skipped
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(term) = non_blank(&self.search_term) {
            pairs.push(("SearchTerm", term.to_string()));
        }
        if let Some(uploader) = non_blank(&self.uploader_id) {
            pairs.push(("UploaderId", uploader.to_string()));
        }
        if let Some(sort_by) = non_blank(&self.sort_by) {
            pairs.push(("SortBy", sort_by.to_string()));
        }
        if let Some(descending) = self.sort_descending {
            pairs.push(("SortDescending", descending.to_string()));
        }
        if self.page_number > 0 {
            pairs.push(("PageNumber", self.page_number.to_string()));
        }
        if self.page_size > 0 {
            pairs.push(("PageSize", self.page_size.to_string()));
        }
        for tag_id in self.tag_ids.iter().filter(|id| !id.is_empty()) {
            pairs.push(("TagIds", tag_id.clone()));
        }
        pairs
    }

    /// Form-encoded backend query, without the leading `?`
    pub fn to_query_string(&self) -> String {
        encode(self.query_pairs())
    }

    /// Read the dashboard URL query (`searchTerm`, `uploaderId`,
    /// `pageNumber`, `pageSize`); bad numbers fall back to the defaults
    pub fn from_dashboard_query(query: &str) -> Self {
        let mut filter = Self::default();
        let Ok(url) = Url::parse(&format!("{}?{}", QUERY_BASE, query.trim_start_matches('?')))
        else {
            return filter;
        };

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "searchTerm" if !value.is_empty() => filter.search_term = Some(value.into_owned()),
                "uploaderId" if !value.is_empty() => filter.uploader_id = Some(value.into_owned()),
                "pageNumber" => filter.page_number = positive_or(&value, DEFAULT_PAGE_NUMBER),
                "pageSize" => filter.page_size = positive_or(&value, DEFAULT_PAGE_SIZE),
                _ => {}
            }
        }
        filter
    }

    /// The dashboard URL query for this filter
    pub fn to_dashboard_query(&self) -> String {
        let mut pairs = Vec::new();
        if let Some(term) = non_blank(&self.search_term) {
            pairs.push(("searchTerm", term.to_string()));
        }
        if let Some(uploader) = non_blank(&self.uploader_id) {
            pairs.push(("uploaderId", uploader.to_string()));
        }
        pairs.push(("pageNumber", self.page_number.to_string()));
        if self.page_size != DEFAULT_PAGE_SIZE {
            pairs.push(("pageSize", self.page_size.to_string()));
        }
        encode(pairs)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn positive_or(value: &str, default: u32) -> u32 {
    value.trim().parse().ok().filter(|n| *n > 0).unwrap_or(default)
}

fn encode(pairs: Vec<(&'static str, String)>) -> String {
    match Url::parse_with_params(QUERY_BASE, &pairs) {
        Ok(url) => url.query().unwrap_or_default().to_string(),
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query() {
        assert_eq!(
            ExtensionFilter::default().to_query_string(),
            "PageNumber=1&PageSize=12"
        );
    }

    #[test]
    fn test_full_query_repeats_tag_ids() {
        let filter = ExtensionFilter {
            search_term: Some("dark theme".to_string()),
            uploader_id: Some("u1".to_string()),
            tag_ids: vec!["t1".to_string(), "t2".to_string()],
            sort_by: Some("name".to_string()),
            sort_descending: Some(false),
            page_number: 2,
            page_size: 24,
        };
        assert_eq!(
            filter.to_query_string(),
            "SearchTerm=dark+theme&UploaderId=u1&SortBy=name&SortDescending=false\
             &PageNumber=2&PageSize=24&TagIds=t1&TagIds=t2"
        );
    }

    #[test]
    fn test_blank_values_skipped() {
        let filter = ExtensionFilter {
            search_term: Some("  ".to_string()),
            uploader_id: Some(String::new()),
            ..ExtensionFilter::default()
        };
        assert_eq!(filter.to_query_string(), "PageNumber=1&PageSize=12");
    }

    #[test]
    fn test_from_dashboard_query() {
        let filter =
            ExtensionFilter::from_dashboard_query("?searchTerm=dark&uploaderId=u1&pageNumber=3");
        assert_eq!(filter.search_term.as_deref(), Some("dark"));
        assert_eq!(filter.uploader_id.as_deref(), Some("u1"));
        assert_eq!(filter.page_number, 3);
        assert_eq!(filter.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_from_dashboard_query_bad_numbers() {
        let filter = ExtensionFilter::from_dashboard_query("pageNumber=abc&pageSize=0");
        assert_eq!(filter.page_number, DEFAULT_PAGE_NUMBER);
        assert_eq!(filter.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(ExtensionFilter::from_dashboard_query(""), ExtensionFilter::default());
    }

    #[test]
    fn test_dashboard_query_round_trip() {
        let filter = ExtensionFilter {
            search_term: Some("dark theme".to_string()),
            ..ExtensionFilter::default()
        }
        .with_page(4);
        let query = filter.to_dashboard_query();
        assert_eq!(query, "searchTerm=dark+theme&pageNumber=4");
        assert_eq!(ExtensionFilter::from_dashboard_query(&query), filter);
    }
}
