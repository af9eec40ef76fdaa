use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::models::{ArticleType, ContentItem, LinkedArticle, LinkedArticleInfo, NavigationTarget};

/// Internal route layout the resolver builds URLs against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePaths {
    pub article_prefix: String,
    pub ai_article_prefix: String,
    pub login_path: String,
    pub redirect_param: String,
}

impl Default for RoutePaths {
    fn default() -> Self {
        Self {
            article_prefix: "/articles".to_string(),
            ai_article_prefix: "/ai-articles".to_string(),
            login_path: "/login".to_string(),
            redirect_param: "redirect".to_string(),
        }
    }
}

/// Decides where a content item sends the viewer.
///
/// Priority, first match wins: a published regular article, then an
/// AI-generated article (behind login), then the external source URL.
#[derive(Debug, Clone, Default)]
pub struct LinkResolver {
    routes: RoutePaths,
}

impl LinkResolver {
    pub fn new(routes: RoutePaths) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &RoutePaths {
        &self.routes
    }

    pub fn resolve(&self, content: &ContentItem, is_authenticated: bool) -> NavigationTarget {
        if let Some((article, slug)) = with_slug(content.linked_article.as_ref()) {
            return NavigationTarget {
                url: Some(self.article_path(slug)),
                requires_auth: false,
                article_type: Some(ArticleType::Regular),
                needs_login: false,
                title: Some(article.title.clone()),
                is_external: false,
            };
        }

        if let Some((article, slug)) = with_slug(content.linked_ai_article.as_ref()) {
            let ai_path = self.ai_article_path(slug);
            let (url, needs_login) = if is_authenticated {
                (ai_path, false)
            } else {
                (self.login_redirect(&ai_path), true)
            };

            return NavigationTarget {
                url: Some(url),
                requires_auth: true,
                article_type: Some(ArticleType::Ai),
                needs_login,
                title: Some(article.title.clone()),
                is_external: false,
            };
        }

        if let Some(url) = content.source_url.as_deref().filter(|url| !url.is_empty()) {
            return NavigationTarget {
                url: Some(url.to_string()),
                requires_auth: false,
                article_type: Some(ArticleType::External),
                needs_login: false,
                title: None,
                is_external: true,
            };
        }

        NavigationTarget::none()
    }

    pub fn article_path(&self, slug: &str) -> String {
        format!("{}/{}", self.routes.article_prefix.trim_end_matches('/'), slug)
    }

    pub fn ai_article_path(&self, slug: &str) -> String {
        format!(
            "{}/{}",
            self.routes.ai_article_prefix.trim_end_matches('/'),
            slug
        )
    }

    /// Login path carrying `target` as the post-login redirect
    pub fn login_redirect(&self, target: &str) -> String {
        format!(
            "{}?{}={}",
            self.routes.login_path,
            self.routes.redirect_param,
            encode_uri_component(target)
        )
    }
}

fn with_slug(article: Option<&LinkedArticle>) -> Option<(&LinkedArticle, &str)> {
    let article = article?;
    let slug = article.slug.as_deref().filter(|slug| !slug.is_empty())?;
    Some((article, slug))
}

/// Resolve with the default routes
pub fn resolve(content: &ContentItem, is_authenticated: bool) -> NavigationTarget {
    LinkResolver::default().resolve(content, is_authenticated)
}

/// Any of the three link fields is present, regardless of auth
pub fn has_linked_article(content: &ContentItem) -> bool {
    content.linked_article.is_some()
        || content.linked_ai_article.is_some()
        || content.source_url.is_some()
}

/// Describe the link `resolve` would follow, without building a URL.
///
/// Articles without a usable slug are skipped exactly as in `resolve`.
pub fn linked_article_info(content: &ContentItem) -> Option<LinkedArticleInfo> {
    if let Some((article, slug)) = with_slug(content.linked_article.as_ref()) {
        return Some(LinkedArticleInfo::Regular {
            id: article.id.clone(),
            title: article.title.clone(),
            slug: Some(slug.to_string()),
            is_published: article.is_published,
        });
    }

    if let Some((article, slug)) = with_slug(content.linked_ai_article.as_ref()) {
        return Some(LinkedArticleInfo::Ai {
            id: article.id.clone(),
            title: article.title.clone(),
            slug: Some(slug.to_string()),
            is_published: article.is_published,
        });
    }

    content
        .source_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .map(|url| LinkedArticleInfo::External {
            url: url.to_string(),
        })
}

/// `encodeURIComponent`: everything but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}
