use chrono::{DateTime, Utc};

use crate::domain::{ist, Article};

const SUMMARY_MAX_CHARS: usize = 200;

const HTML_STYLE: &str = r#"
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Arial, sans-serif; line-height: 1.6; color: #333; max-width: 800px; margin: 0 auto; padding: 20px; background-color: #f5f5f5; }
        .container { background-color: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        h1 { color: #FFA116; border-bottom: 3px solid #FFA116; padding-bottom: 10px; margin-bottom: 20px; }
        .article { border-left: 4px solid #FFA116; padding: 15px; margin-bottom: 20px; background-color: #fafafa; border-radius: 4px; }
        .article-title { font-size: 18px; font-weight: bold; color: #262626; margin-bottom: 8px; }
        .article-title a { color: #262626; text-decoration: none; }
        .article-meta { font-size: 13px; color: #666; margin-bottom: 10px; }
        .article-summary { font-size: 14px; color: #555; line-height: 1.5; margin-bottom: 10px; }
        .article-tags { display: flex; flex-wrap: wrap; gap: 6px; margin-top: 10px; }
        .tag { background-color: #e8f4f8; color: #0066cc; padding: 3px 10px; border-radius: 12px; font-size: 12px; }
        .reactions { font-size: 13px; color: #888; margin-top: 8px; }
        .footer { text-align: center; margin-top: 30px; padding-top: 20px; border-top: 1px solid #ddd; color: #888; font-size: 12px; }
        .count { color: #FFA116; font-weight: bold; }
"#;

/// Builds the HTML digest email body. Pure formatting: everything
/// feed-supplied goes through HTML escaping and summaries are truncated so
/// one runaway post cannot dominate the digest.
pub struct DigestService;

impl DigestService {
    pub fn subject(article_count: usize, now: DateTime<Utc>) -> String {
        format!(
            "LeetCode Discuss digest: {} new article{} ({})",
            article_count,
            if article_count == 1 { "" } else { "s" },
            now.with_timezone(&ist()).format("%Y-%m-%d")
        )
    }

    pub fn build_html(articles: &[Article], now: DateTime<Utc>) -> String {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n    <style>");
        html.push_str(HTML_STYLE);
        html.push_str("    </style>\n</head>\n<body>\n    <div class=\"container\">\n");
        html.push_str("        <h1>&#128218; LeetCode Daily Articles</h1>\n");
        html.push_str(&format!(
            "        <p>Found <span class=\"count\">{}</span> new articles:</p>\n",
            articles.len()
        ));

        for (i, article) in articles.iter().enumerate() {
            html.push_str("        <div class=\"article\">\n");
            html.push_str(&format!(
                "            <div class=\"article-title\">{}. <a href=\"{}\">{}</a></div>\n",
                i + 1,
                article.url(),
                escape(&article.title)
            ));
            html.push_str(&format!(
                "            <div class=\"article-meta\">&#128100; {} | &#128197; {} | &#128221; {}</div>\n",
                escape(&article.author.user_name),
                article.created_display(),
                escape(&article.article_type)
            ));

            if !article.summary.is_empty() {
                html.push_str(&format!(
                    "            <div class=\"article-summary\">{}</div>\n",
                    escape(&truncate_chars(&article.summary, SUMMARY_MAX_CHARS))
                ));
            }

            if !article.tags.is_empty() {
                html.push_str("            <div class=\"article-tags\">");
                for tag in &article.tags {
                    html.push_str(&format!(
                        "<span class=\"tag\">{}</span>",
                        escape(&tag.name)
                    ));
                }
                html.push_str("</div>\n");
            }

            if !article.reactions.is_empty() {
                let rendered: Vec<String> = article
                    .reactions
                    .iter()
                    .map(|r| format!("{}: {}", escape(&r.reaction_type), r.count))
                    .collect();
                html.push_str(&format!(
                    "            <div class=\"reactions\">{}</div>\n",
                    rendered.join(" | ")
                ));
            }

            html.push_str("        </div>\n");
        }

        html.push_str(&format!(
            "        <div class=\"footer\">\n            <p>Automated LeetCode Articles Digest | Generated on {}</p>\n        </div>\n",
            now.with_timezone(&ist()).format("%B %-d, %Y at %-I:%M %p IST")
        ));
        html.push_str("    </div>\n</body>\n</html>\n");

        html
    }
}

fn escape(s: &str) -> String {
    html_escape::encode_text(s).into_owned()
}

/// Truncate to at most `max_chars` characters with an ellipsis, respecting
/// char boundaries.
fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max_chars).collect();
    format!("{}...", truncated)
}
