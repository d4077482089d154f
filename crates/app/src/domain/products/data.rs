//! Products Data

use std::fmt;

use crate::domain::products::ProductsServiceError;

/// Page used when none is requested.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when none is requested.
pub const DEFAULT_LIMIT: u32 = 20;

/// Largest page size served.
pub const MAX_LIMIT: u32 = 100;

/// A validated page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub limit: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Page {
    /// Parse raw `page`/`limit` query values. Missing values take the defaults;
    /// `limit` is capped at [`MAX_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::InvalidPagination`] unless both values
    /// are positive integers.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Result<Self, ProductsServiceError> {
        let page = parse_positive(page, DEFAULT_PAGE, "page")?;
        let limit = parse_positive(limit, DEFAULT_LIMIT, "limit")?.min(MAX_LIMIT);

        Ok(Self { page, limit })
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }

    #[must_use]
    pub fn total_pages(&self, total: i64) -> i64 {
        let limit = i64::from(self.limit);

        (total + limit - 1) / limit
    }
}

fn parse_positive(
    value: Option<&str>,
    default: u32,
    field: &'static str,
) -> Result<u32, ProductsServiceError> {
    let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(default);
    };

    match raw.parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ProductsServiceError::InvalidPagination(field)),
    }
}

/// Ordering for category listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    #[default]
    Title,
    PriceAsc,
    PriceDesc,
    Newest,
}

impl ProductSort {
    /// Parse a sort name; unknown names fall back to [`ProductSort::Title`].
    #[must_use]
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value {
            Some("price_asc") => Self::PriceAsc,
            Some("price_desc") => Self::PriceDesc,
            Some("newest") => Self::Newest,
            _ => Self::Title,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::Newest => "newest",
        }
    }
}

impl fmt::Display for ProductSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product index query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductListQuery {
    pub page: Page,
    pub category: Option<String>,

    /// Newest first instead of by title.
    pub featured: bool,
}

/// Free-text search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSearchQuery {
    pub term: String,
    pub page: Page,
}

impl ProductSearchQuery {
    /// `ILIKE` pattern matching `term` anywhere, with wildcards in the term escaped.
    #[must_use]
    pub fn pattern(&self) -> String {
        let mut escaped = String::with_capacity(self.term.len() + 2);

        escaped.push('%');

        for c in self.term.chars() {
            if matches!(c, '%' | '_' | '\\') {
                escaped.push('\\');
            }

            escaped.push(c);
        }

        escaped.push('%');

        escaped
    }
}

/// Category listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryQuery {
    pub category: String,
    pub page: Page,
    pub sort: ProductSort,
}

impl CategoryQuery {
    /// Cache key for this listing; uses the normalized sort so every
    /// unknown sort shares the `title` entry.
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!(
            "category:{}:page:{}:limit:{}:sort:{}",
            self.category, self.page.page, self.page.limit, self.sort
        )
    }
}
