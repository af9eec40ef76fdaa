use serde::Serialize;

/// Kind of article a navigation target points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleType {
    Regular,
    Ai,
    External,
}

impl ArticleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleType::Regular => "regular",
            ArticleType::Ai => "ai",
            ArticleType::External => "external",
        }
    }

    /// Whether reading this kind of article needs a signed-in viewer
    pub fn requires_auth(&self) -> bool {
        matches!(self, ArticleType::Ai)
    }
}

impl std::fmt::Display for ArticleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a content item sends the viewer.
///
/// `url == None` is a valid outcome meaning there is nothing to open; callers
/// tell the user instead of navigating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationTarget {
    pub url: Option<String>,
    pub requires_auth: bool,
    pub article_type: Option<ArticleType>,
    pub needs_login: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub is_external: bool,
}

impl NavigationTarget {
    /// No navigable target
    pub fn none() -> Self {
        Self {
            url: None,
            requires_auth: false,
            article_type: None,
            needs_login: false,
            title: None,
            is_external: false,
        }
    }

    pub fn is_navigable(&self) -> bool {
        self.url.is_some()
    }
}

/// Description of the link that wins the resolution priority, for badges
/// and previews that must not trigger navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LinkedArticleInfo {
    Regular {
        id: String,
        title: String,
        slug: Option<String>,
        #[serde(rename = "isPublished")]
        is_published: bool,
    },
    Ai {
        id: String,
        title: String,
        slug: Option<String>,
        #[serde(rename = "isPublished")]
        is_published: bool,
    },
    External {
        url: String,
    },
}

impl LinkedArticleInfo {
    pub fn article_type(&self) -> ArticleType {
        match self {
            LinkedArticleInfo::Regular { .. } => ArticleType::Regular,
            LinkedArticleInfo::Ai { .. } => ArticleType::Ai,
            LinkedArticleInfo::External { .. } => ArticleType::External,
        }
    }

    pub fn requires_auth(&self) -> bool {
        self.article_type().requires_auth()
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            LinkedArticleInfo::Regular { title, .. } | LinkedArticleInfo::Ai { title, .. } => {
                Some(title.as_str())
            }
            LinkedArticleInfo::External { .. } => None,
        }
    }
}
