use std::collections::HashSet;

use crate::domain::{Article, Category, Limit};

/// Newest first. Stable, so equal timestamps keep their feed order.
pub fn sort_by_recency(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
}

/// Drop articles whose title exactly matches an earlier one
pub fn dedup_by_title(articles: Vec<Article>) -> Vec<Article> {
    let mut seen = HashSet::new();
    articles
        .into_iter()
        .filter(|article| seen.insert(article.title.clone()))
        .collect()
}

/// Keep articles mentioning one of `category`'s keywords. When fewer than
/// `min_results` match, top up with non-matching articles in their current
/// order until `min_results` is reached.
pub fn filter_with_backfill(
    articles: Vec<Article>,
    category: Category,
    min_results: usize,
) -> Vec<Article> {
    if category.keywords().is_empty() {
        return articles;
    }

    let (mut matched, rest): (Vec<Article>, Vec<Article>) = articles
        .into_iter()
        .partition(|article| category.matches(&article.searchable_text()));

    if matched.len() < min_results {
        let missing = min_results - matched.len();
        matched.extend(rest.into_iter().take(missing));
    }

    matched
}

/// Articles with an image first, newest first within each group
pub fn prioritize_images(articles: &mut [Article]) {
    articles.sort_by(|a, b| {
        b.has_image()
            .cmp(&a.has_image())
            .then_with(|| b.pub_date.cmp(&a.pub_date))
    });
}

/// Full ranking pipeline applied to the merged output of every feed
pub fn rank(
    mut articles: Vec<Article>,
    category: Category,
    min_results: usize,
    limit: Limit,
) -> Vec<Article> {
    sort_by_recency(&mut articles);
    let articles = dedup_by_title(articles);
    let mut articles = filter_with_backfill(articles, category, min_results);
    prioritize_images(&mut articles);
    limit.apply(&mut articles);
    articles
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, hour, 0, 0).unwrap()
    }

    fn article(title: &str, hour: u32, image: bool) -> Article {
        let link = format!("https://example.com/{}/{}", hour, title);
        let image_url = image.then(|| format!("{}.jpg", link));
        Article::new(link, title.to_string(), at(hour))
            .with_category(Category::Sports)
            .with_image_url(image_url)
    }

    fn titles(articles: &[Article]) -> Vec<&str> {
        articles.iter().map(|a| a.title.as_str()).collect()
    }

    #[test]
    fn test_sort_by_recency() {
        let mut articles = vec![article("a", 1, false), article("b", 3, false), article("c", 2, false)];
        sort_by_recency(&mut articles);
        assert_eq!(titles(&articles), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_dedup_first_occurrence_wins() {
        let articles = vec![
            article("축구 결과", 3, false),
            article("축구 결과", 2, true),
            article("축구 결과 ", 1, false),
        ];

        let deduped = dedup_by_title(articles);

        assert_eq!(deduped.len(), 2, "near-duplicates are not merged");
        assert_eq!(deduped[0].pub_date, at(3));
    }

    #[test]
    fn test_keyword_match_retained_without_backfill() {
        let articles = vec![
            article("국회 본회의", 5, false),
            article("축구 대표팀 명단 발표", 4, false),
            article("야구 개막전", 3, false),
        ];

        let filtered = filter_with_backfill(articles, Category::Sports, 2);

        assert_eq!(titles(&filtered), vec!["축구 대표팀 명단 발표", "야구 개막전"]);
    }

    #[test]
    fn test_backfill_up_to_minimum() {
        let articles = vec![
            article("국회 본회의", 5, false),
            article("축구 대표팀 명단 발표", 4, false),
            article("환율 급등", 3, false),
            article("날씨 맑음", 2, false),
        ];

        let filtered = filter_with_backfill(articles, Category::Sports, 3);

        assert_eq!(
            titles(&filtered),
            vec!["축구 대표팀 명단 발표", "국회 본회의", "환율 급등"]
        );
    }

    #[test]
    fn test_description_counts_for_keywords() {
        let articles = vec![
            article("오늘의 소식", 2, false).with_description("손흥민 선발 출전".to_string()),
            article("국회 소식", 1, false),
        ];

        let filtered = filter_with_backfill(articles, Category::Sports, 0);
        assert_eq!(titles(&filtered), vec!["오늘의 소식"]);
    }

    #[test]
    fn test_all_category_skips_filtering() {
        let articles = vec![article("국회 본회의", 2, false), article("환율", 1, false)];
        let filtered = filter_with_backfill(articles, Category::All, 30);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_prioritize_images_partitions() {
        let mut articles = vec![
            article("a", 5, false),
            article("b", 4, true),
            article("c", 3, false),
            article("d", 2, true),
        ];

        prioritize_images(&mut articles);

        assert_eq!(titles(&articles), vec!["b", "d", "a", "c"]);
        let first_without = articles.iter().position(|a| !a.has_image()).unwrap();
        assert!(articles[first_without..].iter().all(|a| !a.has_image()));
    }

    #[test]
    fn test_rank_pipeline_with_limit() {
        let articles = vec![
            article("야구 개막전", 1, false),
            article("축구 결승", 6, true),
            article("축구 결승", 5, true),
            article("농구 올스타전", 4, false),
            article("배구 챔프전", 3, true),
            article("국회 본회의", 2, false),
        ];

        let ranked = rank(articles.clone(), Category::Sports, 30, Limit::AtMost(3));
        assert_eq!(titles(&ranked), vec!["축구 결승", "배구 챔프전", "농구 올스타전"]);
        assert_eq!(ranked[0].pub_date, at(6));

        let all = rank(articles, Category::Sports, 30, Limit::Unbounded);
        assert_eq!(all.len(), 5, "duplicate removed, non-matching article backfilled");
    }
}
