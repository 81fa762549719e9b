use serde::Deserialize;

/// Main configuration structure for kb-harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Knowledge-base table-of-contents pages to start from
    #[serde(rename = "kb_entry_point_urls", default)]
    pub kb_entry_points: Vec<String>,

    /// Forum "solved" listing pages to start from
    #[serde(rename = "forum_entry_point_urls", default)]
    pub forum_entry_points: Vec<String>,

    /// Base URL that root-relative links are resolved against
    pub base_url: String,

    /// Directory receiving the markdown and metadata artifacts
    pub html_storage_path: String,

    #[serde(default)]
    pub crawler: CrawlerConfig,

    #[serde(default)]
    pub user_agent: UserAgentConfig,

    #[serde(default)]
    pub selectors: SelectorConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of tasks admitted into one round
    pub max_concurrent: usize,

    /// Whole-request timeout in seconds
    pub request_timeout_secs: u64,

    /// TCP connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 50,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    pub name: String,
    pub version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: "kb-harvest".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the header value sent with every request
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

/// CSS selectors used by the extraction handlers
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Anchors inside the knowledge-base table of contents
    pub kb_toc_links: String,

    /// Main content container of a knowledge-base article
    pub kb_article: String,

    /// Title anchors of solved forum threads
    pub forum_thread_links: String,

    /// Pagination anchor pointing to the next forum listing page
    pub forum_next_page: String,

    /// Paragraphs of the question body of a forum thread
    pub forum_question: String,

    /// Bodies of the answers in a forum thread
    pub forum_answers: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            kb_toc_links: "div.toc-main a[href]".to_string(),
            kb_article: "div.article-content".to_string(),
            forum_thread_links: "div.thread-solved a.thread-title[href]".to_string(),
            forum_next_page: "a.next-page[href]".to_string(),
            forum_question: "div.question-body p".to_string(),
            forum_answers: "ul.answer-list div.answer-body".to_string(),
        }
    }
}

impl SelectorConfig {
    /// Returns every selector paired with its field name
    pub fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("kb_toc_links", &self.kb_toc_links),
            ("kb_article", &self.kb_article),
            ("forum_thread_links", &self.forum_thread_links),
            ("forum_next_page", &self.forum_next_page),
            ("forum_question", &self.forum_question),
            ("forum_answers", &self.forum_answers),
        ]
    }
}
