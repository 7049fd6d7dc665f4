use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::AggregatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    All,
    Politics,
    Economy,
    Society,
    World,
    Sports,
    Entertainment,
    Tech,
}

/// Words used to derive a feed's category from its URL path, checked in order.
/// A path word matches when it starts with a fragment; fragments of
/// `WHOLE_WORD_MAX` characters or fewer must equal the word.
const URL_RULES: &[(Category, &[&str])] = &[
    (Category::Politics, &["politic"]),
    (Category::Economy, &["economy", "economic", "finance", "money", "business"]),
    (Category::Sports, &["sport"]),
    (Category::Entertainment, &["entertain", "culture", "star"]),
    (Category::World, &["international", "world", "global", "foreign"]),
    (Category::Tech, &["it", "tech", "science", "digital"]),
    (Category::Society, &["society", "national", "social"]),
];

const WHOLE_WORD_MAX: usize = 4;

impl Category {
    /// Every concrete category, excluding `All`
    pub const CONCRETE: [Category; 7] = [
        Category::Politics,
        Category::Economy,
        Category::Society,
        Category::World,
        Category::Sports,
        Category::Entertainment,
        Category::Tech,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Politics => "politics",
            Category::Economy => "economy",
            Category::Society => "society",
            Category::World => "world",
            Category::Sports => "sports",
            Category::Entertainment => "entertainment",
            Category::Tech => "tech",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::All => "전체",
            Category::Politics => "정치",
            Category::Economy => "경제",
            Category::Society => "사회",
            Category::World => "국제",
            Category::Sports => "스포츠",
            Category::Entertainment => "연예",
            Category::Tech => "IT/과학",
        }
    }

    /// Topical keywords; an article mentioning one of them belongs to the category
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::All => &[],
            Category::Politics => &[
                "정치", "국회", "대통령", "정부", "여당", "야당", "선거", "장관", "의원", "외교",
                "국정", "총리", "민주당", "국민의힘", "청와대", "대통령실",
            ],
            Category::Economy => &[
                "경제", "금리", "주식", "증시", "코스피", "코스닥", "환율", "부동산", "물가",
                "투자", "기업", "수출", "은행", "금융", "시장", "매출",
            ],
            Category::Society => &[
                "사회", "사건", "사고", "경찰", "검찰", "법원", "교육", "복지", "노동", "환경",
                "재판", "학교", "날씨", "의료", "소방",
            ],
            Category::World => &[
                "국제", "미국", "중국", "일본", "러시아", "유럽", "북한", "해외", "세계", "외신",
                "우크라이나", "중동", "트럼프", "유엔",
            ],
            Category::Sports => &[
                "축구", "야구", "농구", "배구", "골프", "올림픽", "월드컵", "선수", "감독", "경기",
                "리그", "스포츠", "손흥민", "kbo", "k리그",
            ],
            Category::Entertainment => &[
                "연예", "배우", "가수", "드라마", "영화", "아이돌", "방송", "예능", "콘서트",
                "앨범", "문화", "공연", "뮤지컬", "k팝", "케이팝",
            ],
            Category::Tech => &[
                "it", "ai", "인공지능", "반도체", "스마트폰", "과학", "기술", "소프트웨어",
                "플랫폼", "데이터", "로봇", "우주", "디지털", "통신",
            ],
        }
    }

    /// Whether `text` mentions one of this category's keywords (case-insensitive).
    /// ASCII keywords such as "ai" only match on word boundaries.
    pub fn matches(&self, text: &str) -> bool {
        let haystack = text.to_lowercase();
        self.keywords()
            .iter()
            .any(|keyword| contains_keyword(&haystack, keyword))
    }

    /// Derive the category a feed belongs to from its URL
    pub fn from_feed_url(url: &str) -> Category {
        let lowered = url.to_lowercase();
        let path = match Url::parse(&lowered) {
            Ok(parsed) => format!("{}?{}", parsed.path(), parsed.query().unwrap_or_default()),
            Err(_) => lowered,
        };
        let words: Vec<&str> = path
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        URL_RULES
            .iter()
            .find(|(_, fragments)| {
                fragments.iter().any(|fragment| {
                    words.iter().any(|word| {
                        if fragment.len() <= WHOLE_WORD_MAX {
                            word == fragment
                        } else {
                            word.starts_with(fragment)
                        }
                    })
                })
            })
            .map(|(category, _)| *category)
            .unwrap_or(Category::Society)
    }

    /// Whether a feed of category `feed` should be fetched for a request for `self`
    pub fn includes(&self, feed: Category) -> bool {
        *self == Category::All || *self == feed
    }
}

/// Substring search where an ASCII alphanumeric keyword edge must not touch
/// another ASCII alphanumeric character ("ai" matches "ai가" but not "said")
fn contains_keyword(haystack: &str, keyword: &str) -> bool {
    let edge_is_word = |c: Option<char>| c.is_some_and(|c| c.is_ascii_alphanumeric());
    let check_start = edge_is_word(keyword.chars().next());
    let check_end = edge_is_word(keyword.chars().next_back());

    haystack.match_indices(keyword).any(|(start, matched)| {
        let end = start + matched.len();
        (!check_start || !edge_is_word(haystack[..start].chars().next_back()))
            && (!check_end || !edge_is_word(haystack[end..].chars().next()))
    })
}

impl std::str::FromStr for Category {
    type Err = AggregatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(Category::All),
            "politics" => Ok(Category::Politics),
            "economy" | "business" => Ok(Category::Economy),
            "society" => Ok(Category::Society),
            "world" | "international" => Ok(Category::World),
            "sports" => Ok(Category::Sports),
            "entertainment" | "culture" => Ok(Category::Entertainment),
            "tech" | "it" | "science" => Ok(Category::Tech),
            _ => Err(AggregatorError::UnknownCategory(s.to_string())),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
