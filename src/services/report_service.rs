use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::{ist, Article};
use crate::errors::DigestResult;

/// Writes the plain-text article report into a configured directory, one
/// timestamped file per run.
pub struct ReportService {
    dir: PathBuf,
}

impl ReportService {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Write the report and return the path of the created file.
    pub fn write_report(
        &self,
        articles: &[Article],
        now: DateTime<Utc>,
    ) -> DigestResult<PathBuf> {
        let local = now.with_timezone(&ist());
        let filename = format!(
            "leetcode_articles_{}.txt",
            local.format("%Y-%m-%d_%H-%M-%S")
        );
        let path = self.dir.join(filename);

        let file = File::create(&path)?;
        let mut w = BufWriter::new(file);

        writeln!(w, "LeetCode Discuss - Latest {} Articles", articles.len())?;
        writeln!(w, "Fetched on: {}", local.format("%Y-%m-%d %H:%M:%S IST"))?;
        writeln!(w, "{}\n", "=".repeat(80))?;

        for (i, article) in articles.iter().enumerate() {
            writeln!(w, "{}", "═".repeat(80))?;
            writeln!(w, "Article #{}", i + 1)?;
            writeln!(w, "{}\n", "═".repeat(80))?;

            writeln!(w, "UUID: {}", article.uuid)?;
            writeln!(w, "Title: {}", article.title)?;
            writeln!(w, "Slug: {}", article.slug)?;
            writeln!(w, "Article Type: {}", article.article_type)?;
            writeln!(w, "Posted: {}", article.created_display())?;
            writeln!(w, "Updated: {}", article.updated_display())?;
            writeln!(w, "URL: {}", article.url())?;
            writeln!(w, "Author: {}", article.author.user_name)?;

            if !article.summary.is_empty() {
                writeln!(w, "\n--- Summary ---")?;
                writeln!(w, "{}", article.summary)?;
            }

            if !article.tags.is_empty() {
                writeln!(w, "\n--- Tags ---")?;
                for tag in &article.tags {
                    writeln!(w, "  - {} ({}) [{}]", tag.name, tag.slug, tag.tag_type)?;
                }
            }

            if !article.reactions.is_empty() {
                writeln!(w, "\n--- Reactions ---")?;
                for reaction in &article.reactions {
                    writeln!(w, "  {}: {}", reaction.reaction_type, reaction.count)?;
                }
            }

            writeln!(w)?;
        }

        w.flush()?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 26, 6, 30, 0).unwrap()
    }

    fn sample_article() -> Article {
        let mut a = Article::new("u1".to_string(), "BFS patterns".to_string())
            .with_slug("bfs-patterns")
            .with_created_at("2026-01-25T10:30:00Z")
            .with_summary("Level-order everything");
        a.topic_id = 7;
        a.author.user_name = "bob".to_string();
        a.article_type = "DISCUSSION".to_string();
        a
    }

    #[test]
    fn test_report_filename_uses_ist_run_time() {
        let dir = TempDir::new().unwrap();
        let path = ReportService::new(dir.path())
            .write_report(&[sample_article()], now())
            .unwrap();

        // 06:30 UTC = 12:00 IST
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "leetcode_articles_2026-01-26_12-00-00.txt"
        );
    }

    #[test]
    fn test_report_contains_banner_and_article_block() {
        let dir = TempDir::new().unwrap();
        let path = ReportService::new(dir.path())
            .write_report(&[sample_article()], now())
            .unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with("LeetCode Discuss - Latest 1 Articles"));
        assert!(content.contains("Article #1"));
        assert!(content.contains("Title: BFS patterns"));
        assert!(content.contains("Author: bob"));
        assert!(content.contains("URL: https://leetcode.com/discuss/post/7/bfs-patterns/"));
        assert!(content.contains("--- Summary ---"));
        assert!(content.contains("Level-order everything"));
    }

    #[test]
    fn test_report_omits_empty_sections() {
        let mut article = sample_article();
        article.summary = String::new();

        let dir = TempDir::new().unwrap();
        let path = ReportService::new(dir.path())
            .write_report(&[article], now())
            .unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(!content.contains("--- Summary ---"));
        assert!(!content.contains("--- Tags ---"));
        assert!(!content.contains("--- Reactions ---"));
    }

    #[test]
    fn test_report_with_no_articles_still_writes_header() {
        let dir = TempDir::new().unwrap();
        let path = ReportService::new(dir.path())
            .write_report(&[], now())
            .unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with("LeetCode Discuss - Latest 0 Articles"));
    }
}
