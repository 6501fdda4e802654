use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;

use crate::domain::Article;
use crate::errors::{DigestError, DigestResult};
use crate::sources::traits::DiscussFeed;

pub const DEFAULT_GRAPHQL_URL: &str = "https://leetcode.com/graphql";

const DISCUSS_TOPICS_QUERY: &str = r#"
query discussPostItems($orderBy: ArticleOrderByEnum, $keywords: [String]!, $tagSlugs: [String!], $skip: Int, $first: Int) {
    ugcArticleDiscussionArticles(
        orderBy: $orderBy
        keywords: $keywords
        tagSlugs: $tagSlugs
        skip: $skip
        first: $first
    ) {
        totalNum
        edges {
            node {
                uuid
                topicId
                title
                slug
                summary
                author {
                    userName
                }
                createdAt
                updatedAt
                articleType
                tags {
                    name
                    slug
                    tagType
                }
                reactions {
                    count
                    reactionType
                }
            }
        }
    }
}
"#;

#[derive(Debug, Deserialize)]
struct DiscussResponse {
    data: Option<DiscussData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiscussData {
    ugc_article_discussion_articles: Option<ArticleConnection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArticleConnection {
    #[serde(default)]
    #[allow(dead_code)]
    total_num: i64,
    #[serde(default)]
    edges: Vec<ArticleEdge>,
}

#[derive(Debug, Deserialize)]
struct ArticleEdge {
    node: Article,
}

/// Blocking client for the LeetCode Discuss GraphQL endpoint.
///
/// The endpoint offers no time-range filter, only offset pagination over a
/// newest-first listing; incremental behavior is layered on top by
/// `FetchService`.
pub struct GraphqlDiscussFeed {
    client: Client,
    url: String,
}

impl GraphqlDiscussFeed {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(15))
                .build()
                .unwrap_or_else(|_| Client::new()),
            url: url.into(),
        }
    }

    fn request_body(page_size: usize, skip: usize) -> serde_json::Value {
        json!({
            "query": DISCUSS_TOPICS_QUERY,
            "variables": {
                "orderBy": "MOST_RECENT",
                "keywords": [],
                "tagSlugs": [],
                "skip": skip,
                "first": page_size,
            }
        })
    }

    fn decode_body(body: &str) -> Result<Vec<Article>, String> {
        let response: DiscussResponse =
            serde_json::from_str(body).map_err(|e| e.to_string())?;

        let connection = response
            .data
            .and_then(|d| d.ugc_article_discussion_articles)
            .ok_or_else(|| "response envelope is missing article data".to_string())?;

        // Already sorted newest-first by the MOST_RECENT ordering
        Ok(connection.edges.into_iter().map(|e| e.node).collect())
    }
}

impl Default for GraphqlDiscussFeed {
    fn default() -> Self {
        Self::new(DEFAULT_GRAPHQL_URL)
    }
}

impl DiscussFeed for GraphqlDiscussFeed {
    fn fetch_page(&self, page_size: usize, skip: usize) -> DigestResult<Vec<Article>> {
        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .header("User-Agent", "LeetCode-Discuss-Fetcher/1.0")
            .header("Referer", "https://leetcode.com/discuss/")
            .header("Origin", "https://leetcode.com")
            .json(&Self::request_body(page_size, skip))
            .send()
            .map_err(|e| DigestError::Transport {
                skip,
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().map_err(|e| DigestError::Transport {
            skip,
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(DigestError::Transport {
                skip,
                message: format!("status {}: {}", status.as_u16(), body),
            });
        }

        Self::decode_body(&body).map_err(DigestError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_carries_paging_variables() {
        let body = GraphqlDiscussFeed::request_body(100, 300);
        assert_eq!(body["variables"]["first"], 100);
        assert_eq!(body["variables"]["skip"], 300);
        assert_eq!(body["variables"]["orderBy"], "MOST_RECENT");
        assert!(body["query"]
            .as_str()
            .unwrap()
            .contains("ugcArticleDiscussionArticles"));
    }

    #[test]
    fn test_decode_body_extracts_nodes_in_order() {
        let body = r#"{
            "data": {
                "ugcArticleDiscussionArticles": {
                    "totalNum": 2,
                    "edges": [
                        {"node": {"uuid": "a", "title": "First", "slug": "first", "createdAt": "2026-01-25T10:00:00Z"}},
                        {"node": {"uuid": "b", "title": "Second", "slug": "second", "createdAt": "2026-01-25T09:00:00Z"}}
                    ]
                }
            }
        }"#;

        let articles = GraphqlDiscussFeed::decode_body(body).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].uuid, "a");
        assert_eq!(articles[1].uuid, "b");
    }

    #[test]
    fn test_decode_body_empty_edges() {
        let body = r#"{
            "data": {
                "ugcArticleDiscussionArticles": {"totalNum": 0, "edges": []}
            }
        }"#;

        let articles = GraphqlDiscussFeed::decode_body(body).unwrap();
        assert!(articles.is_empty());
    }

    #[test]
    fn test_decode_body_rejects_missing_data() {
        let body = r#"{"data": null}"#;
        assert!(GraphqlDiscussFeed::decode_body(body).is_err());
    }

    #[test]
    fn test_decode_body_rejects_invalid_json() {
        assert!(GraphqlDiscussFeed::decode_body("<html>busy</html>").is_err());
    }
}
