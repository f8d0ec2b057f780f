use models::{article, category, comment, keyword, user};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::pagination::Page;

fn default_language() -> String { article::DEFAULT_LANGUAGE.to_string() }

/// Submitted article form (create and update).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleForm {
    pub heading: String,
    pub content: String,
    pub category_id: i32,
    #[serde(default = "default_language")]
    pub language: String,
    /// Only read on create; publication changes afterwards go through toggle.
    #[serde(default)]
    pub is_published: bool,
    /// Whitespace separated keyword names.
    #[serde(default)]
    pub keywords: String,
}

impl ArticleForm {
    /// Trim the text fields and check them.
    pub fn validated(mut self) -> Result<Self, ServiceError> {
        self.heading = self.heading.trim().to_string();
        self.language = self.language.trim().to_lowercase();
        if self.language.is_empty() {
            self.language = default_language();
        }
        article::validate_heading(&self.heading)?;
        article::validate_content(&self.content)?;
        article::validate_language(&self.language)?;
        Ok(self)
    }
}

/// Public article page.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleDetail {
    pub article: article::Model,
    pub category: category::Model,
    pub keywords: Vec<keyword::Model>,
    pub comments: Vec<comment::Model>,
    pub related: Vec<article::Model>,
    /// Distinct addresses that have viewed the article.
    pub unique_visitors: u64,
}

/// Data for the create and edit forms.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleFormData {
    pub categories: Vec<category::Model>,
    pub article: Option<article::Model>,
    pub keywords: Vec<String>,
}

/// Row of the back-office article list.
#[derive(Debug, Clone, Serialize)]
pub struct AdminArticleRow {
    pub article: article::Model,
    pub category: Option<category::Model>,
    pub keywords: Vec<keyword::Model>,
    pub author: Option<AuthorView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorView {
    pub id: i32,
    pub name: String,
}

impl From<user::Model> for AuthorView {
    fn from(u: user::Model) -> Self { Self { id: u.id, name: u.name } }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub query: String,
    pub articles: Page<article::Model>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(heading: &str, language: &str) -> ArticleForm {
        ArticleForm {
            heading: heading.into(),
            content: "body".into(),
            category_id: 1,
            language: language.into(),
            is_published: true,
            keywords: String::new(),
        }
    }

    #[test]
    fn blank_language_falls_back_to_default() {
        let f = form("  Title ", " ").validated().unwrap();
        assert_eq!(f.heading, "Title");
        assert_eq!(f.language, "en");
    }

    #[test]
    fn blank_heading_is_rejected() {
        assert!(matches!(form("   ", "en").validated(), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn json_defaults() {
        let f: ArticleForm = serde_json::from_str(r#"{"heading":"h","content":"c","category_id":3}"#).unwrap();
        assert_eq!(f.language, "en");
        assert!(!f.is_published);
        assert!(f.keywords.is_empty());
    }
}
