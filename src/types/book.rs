use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// One entry in the catalog.
///
/// Field names follow the persisted dataset (`imageLink` and friends),
/// hence the camelCase renaming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub author: String,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub country: String,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub image_link: String,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub language: String,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub link: String,
    #[validate(range(min = 1, message = "Must be at least 1"))]
    pub pages: u32,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub title: String,
    // Negative years are valid, the dataset reaches back to antiquity.
    pub year: i32,
}

impl Book {
    /// Merges the patch into this book. `None` fields are left untouched.
    pub fn merge(&mut self, patch: &BookPatch) {
        if let Some(author) = &patch.author {
            self.author = author.clone();
        }
        if let Some(country) = &patch.country {
            self.country = country.clone();
        }
        if let Some(image_link) = &patch.image_link {
            self.image_link = image_link.clone();
        }
        if let Some(language) = &patch.language {
            self.language = language.clone();
        }
        if let Some(link) = &patch.link {
            self.link = link.clone();
        }
        if let Some(pages) = patch.pages {
            self.pages = pages;
        }
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
    }
}

/// A partial book for PATCH requests. Provided fields overwrite, absent
/// fields are kept.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub author: Option<String>,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub country: Option<String>,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub image_link: Option<String>,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub language: Option<String>,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub link: Option<String>,
    #[validate(range(min = 1, message = "Must be at least 1"))]
    pub pages: Option<u32>,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub title: Option<String>,
    pub year: Option<i32>,
}

/// Equality filters for list and delete operations.
///
/// Every provided field must match (logical AND). The empty filter matches
/// the entire collection.
#[derive(Debug, Default, Clone, Deserialize, JsonSchema, ToSchema)]
pub struct BookFilter {
    pub author: Option<String>,
    pub country: Option<String>,
    pub language: Option<String>,
    pub title: Option<String>,
    pub year: Option<i32>,
}

impl BookFilter {
    pub fn is_empty(&self) -> bool {
        self.author.is_none()
            && self.country.is_none()
            && self.language.is_none()
            && self.title.is_none()
            && self.year.is_none()
    }

    pub fn matches(&self, book: &Book) -> bool {
        self.author.as_ref().map_or(true, |author| &book.author == author)
            && self.country.as_ref().map_or(true, |country| &book.country == country)
            && self.language.as_ref().map_or(true, |language| &book.language == language)
            && self.title.as_ref().map_or(true, |title| &book.title == title)
            && self.year.map_or(true, |year| book.year == year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a_book() -> Book {
        Book {
            author: "Chinua Achebe".to_string(),
            country: "Nigeria".to_string(),
            image_link: "images/things-fall-apart.jpg".to_string(),
            language: "English".to_string(),
            link: "https://en.wikipedia.org/wiki/Things_Fall_Apart".to_string(),
            pages: 209,
            title: "Things Fall Apart".to_string(),
            year: 1958,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = BookFilter::default();

        assert!(filter.is_empty());
        assert!(filter.matches(&a_book()));
    }

    #[test]
    fn filters_are_anded() {
        let book = a_book();

        let filter = BookFilter {
            author: Some("Chinua Achebe".to_string()),
            year: Some(1958),
            ..Default::default()
        };
        assert!(filter.matches(&book));

        let filter = BookFilter {
            author: Some("Chinua Achebe".to_string()),
            year: Some(2023),
            ..Default::default()
        };
        assert!(!filter.matches(&book));
    }

    #[test]
    fn merge_keeps_absent_fields() {
        let mut book = a_book();
        let patch = BookPatch {
            year: Some(1959),
            pages: Some(216),
            author: None,
            country: None,
            image_link: None,
            language: None,
            link: None,
            title: None,
        };

        book.merge(&patch);

        assert_eq!(book.year, 1959);
        assert_eq!(book.pages, 216);
        assert_eq!(book.title, "Things Fall Apart");
        assert_eq!(book.author, "Chinua Achebe");
    }

    #[test]
    fn json_field_names_follow_the_dataset() {
        let value = serde_json::to_value(a_book()).expect("Book is serializable");

        assert!(value.get("imageLink").is_some());
        assert!(value.get("image_link").is_none());
    }

    #[test]
    fn empty_fields_fail_validation() {
        let mut book = a_book();
        book.author = String::new();

        assert!(book.validate().is_err());
    }
}
