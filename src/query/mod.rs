//! Search query construction for the arXiv API.
//!
//! [`QueryString`] accumulates author, title, and abstract terms plus subject
//! categories, and renders them into the percent-encoded boolean expression the
//! arXiv `/api/query` endpoint expects, together with sort order and pagination
//! parameters. Terms are kept in insertion order and duplicates are ignored.

use std::fmt;
use std::str::FromStr;

mod error;

pub use error::QueryError;

/// Default number of results requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

const DEFAULT_BASE_URL: &str = "http://export.arxiv.org/api/query?";
const SEARCH_PREFIX: &str = "search_query=";
const BLOCK_START: &str = "%28";
const BLOCK_END: &str = "%29";
const SORT_BY: &str = "lastUpdatedDate";

/// Known arXiv subject classes a query may be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    CondMat,
    CondMatSoft,
    CondMatStatMech,
    CondMatDisNn,
    CondMatOther,
    CondMatMtrlSci,
    PhysicsBioPh,
    PhysicsCompPh,
}

impl Category {
    /// All known subject classes, in their canonical listing order.
    pub const ALL: [Self; 8] = [
        Self::CondMat,
        Self::CondMatSoft,
        Self::CondMatStatMech,
        Self::CondMatDisNn,
        Self::CondMatOther,
        Self::CondMatMtrlSci,
        Self::PhysicsBioPh,
        Self::PhysicsCompPh,
    ];

    /// Returns the wire name used in `cat:` query terms.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CondMat => "cond-mat",
            Self::CondMatSoft => "cond-mat.soft",
            Self::CondMatStatMech => "cond-mat.stat-mech",
            Self::CondMatDisNn => "cond-mat.dis-nn",
            Self::CondMatOther => "cond-mat.other",
            Self::CondMatMtrlSci => "cond-mat.mtrl-sci",
            Self::PhysicsBioPh => "physics.bio-ph",
            Self::PhysicsCompPh => "physics.comp-ph",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cond-mat" => Ok(Self::CondMat),
            "cond-mat.soft" => Ok(Self::CondMatSoft),
            "cond-mat.stat-mech" => Ok(Self::CondMatStatMech),
            "cond-mat.dis-nn" => Ok(Self::CondMatDisNn),
            "cond-mat.other" => Ok(Self::CondMatOther),
            "cond-mat.mtrl-sci" => Ok(Self::CondMatMtrlSci),
            "physics.bio-ph" => Ok(Self::PhysicsBioPh),
            "physics.comp-ph" => Ok(Self::PhysicsCompPh),
            other => Err(QueryError::invalid_category(other)),
        }
    }
}

/// Boolean join rule between the author block and the title/abstract block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Connector {
    And,
    #[default]
    Or,
}

impl Connector {
    /// Returns the encoded form used between query blocks.
    #[must_use]
    pub const fn as_query_str(self) -> &'static str {
        match self {
            Self::And => "+AND+",
            Self::Or => "+OR+",
        }
    }
}

impl FromStr for Connector {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "and" => Ok(Self::And),
            "or" => Ok(Self::Or),
            other => Err(QueryError::invalid_connector(other)),
        }
    }
}

/// Builder for arXiv search URLs.
///
/// At least one author, title, or abstract term must be present before
/// [`render`](Self::render) produces a URL; categories alone are not a valid
/// query. Pagination state lives on the builder: [`advance_page`](Self::advance_page)
/// shifts the result window so the same builder can be re-rendered for the
/// next page.
#[derive(Debug, Clone)]
pub struct QueryString {
    base_url: String,
    authors: Vec<String>,
    title_words: Vec<String>,
    abstract_words: Vec<String>,
    categories: Vec<Category>,
    connector: Connector,
    start: usize,
    count: usize,
}

impl Default for QueryString {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryString {
    /// Creates an empty query with the default result window (start 0, 10 results).
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            authors: Vec::new(),
            title_words: Vec::new(),
            abstract_words: Vec::new(),
            categories: Vec::new(),
            connector: Connector::default(),
            start: 0,
            count: DEFAULT_PAGE_SIZE,
        }
    }

    /// Replaces the API base URL (useful for pointing tests at a local server).
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    /// Sets the join rule between the author block and the title/abstract block.
    pub fn set_connector(&mut self, connector: Connector) {
        self.connector = connector;
    }

    /// Shifts the result window to the next page.
    ///
    /// The window start advances by the current page size; `next_count`
    /// becomes the new page size. No bounds are checked against the total
    /// number of results.
    pub fn advance_page(&mut self, next_count: usize) {
        self.start += self.count;
        self.count = next_count;
    }

    /// Adds an author to search for. Re-adding a known author is a no-op.
    pub fn add_author(&mut self, author: impl Into<String>) {
        add_unique(&mut self.authors, author.into());
    }

    /// Adds a word to search for in titles. Duplicates are ignored.
    pub fn add_title_word(&mut self, word: impl Into<String>) {
        add_unique(&mut self.title_words, word.into());
    }

    /// Adds a word to search for in abstracts. Duplicates are ignored.
    pub fn add_abstract_word(&mut self, word: impl Into<String>) {
        add_unique(&mut self.abstract_words, word.into());
    }

    /// Adds a subject class to restrict the search to. Duplicates are ignored.
    ///
    /// With no categories added, all subject classes are searched.
    pub fn add_category(&mut self, category: Category) {
        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
    }

    /// Stops searching for an author.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NotInQuery`] if the author was never added.
    pub fn remove_author(&mut self, author: &str) -> Result<(), QueryError> {
        remove_term(&mut self.authors, author)
    }

    /// Stops searching for a title word.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NotInQuery`] if the word was never added.
    pub fn remove_title_word(&mut self, word: &str) -> Result<(), QueryError> {
        remove_term(&mut self.title_words, word)
    }

    /// Stops searching for an abstract word.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NotInQuery`] if the word was never added.
    pub fn remove_abstract_word(&mut self, word: &str) -> Result<(), QueryError> {
        remove_term(&mut self.abstract_words, word)
    }

    /// Stops restricting the search to a subject class.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NotInQuery`] if the category was never added.
    /// Unknown category names never reach this point: they fail with
    /// [`QueryError::InvalidCategory`] when parsed into a [`Category`].
    pub fn remove_category(&mut self, category: Category) -> Result<(), QueryError> {
        match self.categories.iter().position(|c| *c == category) {
            Some(index) => {
                self.categories.remove(index);
                Ok(())
            }
            None => Err(QueryError::not_in_query(category.as_str())),
        }
    }

    /// Clears all author terms.
    pub fn remove_all_authors(&mut self) {
        self.authors.clear();
    }

    /// Clears all title terms.
    pub fn remove_all_title_words(&mut self) {
        self.title_words.clear();
    }

    /// Clears all abstract terms.
    pub fn remove_all_abstract_words(&mut self) {
        self.abstract_words.clear();
    }

    /// Clears all category restrictions.
    pub fn remove_all_categories(&mut self) {
        self.categories.clear();
    }

    /// Authors currently searched for, in insertion order.
    #[must_use]
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Title words currently searched for, in insertion order.
    #[must_use]
    pub fn title_words(&self) -> &[String] {
        &self.title_words
    }

    /// Abstract words currently searched for, in insertion order.
    #[must_use]
    pub fn abstract_words(&self) -> &[String] {
        &self.abstract_words
    }

    /// Categories currently searched in, in insertion order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Renders the full search URL for the current terms and result window.
    ///
    /// The author terms form one OR-joined sub-block, the title and abstract
    /// terms another; when both sides are present each is parenthesized and
    /// they are joined with the configured connector, while a sole surviving
    /// side stays bare. The whole expression is wrapped in one outer block.
    /// Categories, when present, are AND-joined after the main block as their
    /// own OR-block.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyQuery`] if no author, title, or abstract
    /// terms have been added.
    pub fn render(&self) -> Result<String, QueryError> {
        let author_block = or_join("au", self.authors.iter().map(String::as_str));
        let keyword_block = self.keyword_block();

        let main_block = match (author_block.is_empty(), keyword_block.is_empty()) {
            (false, false) => format!(
                "{BLOCK_START}{author_block}{BLOCK_END}{}{BLOCK_START}{keyword_block}{BLOCK_END}",
                self.connector.as_query_str()
            ),
            (false, true) => author_block,
            (true, false) => keyword_block,
            (true, true) => return Err(QueryError::EmptyQuery),
        };

        let mut url = format!(
            "{}{SEARCH_PREFIX}{BLOCK_START}{main_block}{BLOCK_END}",
            self.base_url
        );
        if !self.categories.is_empty() {
            let category_block = or_join("cat", self.categories.iter().map(|c| c.as_str()));
            url.push_str(Connector::And.as_query_str());
            url.push_str(BLOCK_START);
            url.push_str(&category_block);
            url.push_str(BLOCK_END);
        }
        url.push_str(&format!(
            "&sortBy={SORT_BY}&start={}&max_results={}",
            self.start, self.count
        ));
        Ok(url)
    }

    /// Title terms followed by abstract terms, all OR-joined.
    fn keyword_block(&self) -> String {
        let titles = or_join("ti", self.title_words.iter().map(String::as_str));
        let abstracts = or_join("abs", self.abstract_words.iter().map(String::as_str));
        match (titles.is_empty(), abstracts.is_empty()) {
            (false, false) => format!("{titles}{}{abstracts}", Connector::Or.as_query_str()),
            (false, true) => titles,
            (true, false) => abstracts,
            (true, true) => String::new(),
        }
    }
}

fn add_unique(terms: &mut Vec<String>, term: String) {
    if !terms.contains(&term) {
        terms.push(term);
    }
}

fn remove_term(terms: &mut Vec<String>, term: &str) -> Result<(), QueryError> {
    match terms.iter().position(|t| t == term) {
        Some(index) => {
            terms.remove(index);
            Ok(())
        }
        None => Err(QueryError::not_in_query(term)),
    }
}

fn or_join<'a>(field: &str, terms: impl Iterator<Item = &'a str>) -> String {
    let mut block = String::new();
    for term in terms {
        if !block.is_empty() {
            block.push_str(Connector::Or.as_query_str());
        }
        block.push_str(field);
        block.push(':');
        block.push_str(term);
    }
    block
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_query_fails() {
        let query = QueryString::new();
        assert_eq!(query.render(), Err(QueryError::EmptyQuery));
    }

    #[test]
    fn test_render_categories_only_still_fails() {
        let mut query = QueryString::new();
        query.add_category(Category::CondMat);
        assert_eq!(query.render(), Err(QueryError::EmptyQuery));
    }

    #[test]
    fn test_render_single_author() {
        let mut query = QueryString::new();
        query.add_author("Testfrau_T");
        assert_eq!(
            query.render().unwrap(),
            "http://export.arxiv.org/api/query?search_query=%28au:Testfrau_T%29\
             &sortBy=lastUpdatedDate&start=0&max_results=10"
        );
    }

    #[test]
    fn test_render_single_title_word() {
        let mut query = QueryString::new();
        query.add_title_word("Awesome");
        assert!(
            query
                .render()
                .unwrap()
                .contains("search_query=%28ti:Awesome%29&sortBy=")
        );
    }

    #[test]
    fn test_render_title_word_with_category() {
        let mut query = QueryString::new();
        query.add_title_word("Awesome");
        query.add_category(Category::CondMat);
        assert!(
            query
                .render()
                .unwrap()
                .contains("search_query=%28ti:Awesome%29+AND+%28cat:cond-mat%29&")
        );
    }

    #[test]
    fn test_render_two_categories_or_joined() {
        let mut query = QueryString::new();
        query.add_abstract_word("active");
        query.add_category(Category::CondMat);
        query.add_category(Category::CondMatSoft);
        assert!(
            query
                .render()
                .unwrap()
                .contains("%28cat:cond-mat+OR+cat:cond-mat.soft%29")
        );
    }

    #[test]
    fn test_render_authors_or_joined_in_insertion_order() {
        let mut query = QueryString::new();
        query.add_author("Muster_M");
        query.add_author("Testfrau_T");
        assert!(
            query
                .render()
                .unwrap()
                .contains("search_query=%28au:Muster_M+OR+au:Testfrau_T%29&")
        );
    }

    #[test]
    fn test_render_author_and_keyword_sides_get_inner_parentheses() {
        let mut query = QueryString::new();
        query.add_author("Testfrau_T");
        query.add_title_word("Awesome");
        query.set_connector(Connector::And);
        assert!(
            query
                .render()
                .unwrap()
                .contains("search_query=%28%28au:Testfrau_T%29+AND+%28ti:Awesome%29%29&")
        );
    }

    #[test]
    fn test_render_default_connector_is_or() {
        let mut query = QueryString::new();
        query.add_author("Testfrau_T");
        query.add_abstract_word("active");
        assert!(
            query
                .render()
                .unwrap()
                .contains("%28%28au:Testfrau_T%29+OR+%28abs:active%29%29")
        );
    }

    #[test]
    fn test_render_title_and_abstract_words_share_one_block() {
        let mut query = QueryString::new();
        query.add_title_word("Awesome");
        query.add_abstract_word("active");
        assert!(
            query
                .render()
                .unwrap()
                .contains("search_query=%28ti:Awesome+OR+abs:active%29&")
        );
    }

    #[test]
    fn test_add_author_twice_is_idempotent() {
        let mut query = QueryString::new();
        query.add_author("Testfrau_T");
        query.add_author("Testfrau_T");
        assert_eq!(query.authors(), ["Testfrau_T"]);
    }

    #[test]
    fn test_add_category_twice_is_idempotent() {
        let mut query = QueryString::new();
        query.add_category(Category::CondMat);
        query.add_category(Category::CondMat);
        assert_eq!(query.categories(), [Category::CondMat]);
    }

    #[test]
    fn test_categories_keep_insertion_order() {
        let mut query = QueryString::new();
        query.add_category(Category::CondMat);
        query.add_category(Category::CondMatSoft);
        assert_eq!(
            query.categories(),
            [Category::CondMat, Category::CondMatSoft]
        );
    }

    #[test]
    fn test_remove_author_restores_empty_query() {
        let mut query = QueryString::new();
        query.add_author("Testfrau_T");
        query.remove_author("Testfrau_T").unwrap();
        assert_eq!(query.render(), Err(QueryError::EmptyQuery));
    }

    #[test]
    fn test_remove_absent_author_fails() {
        let mut query = QueryString::new();
        assert_eq!(
            query.remove_author("Testfrau_T"),
            Err(QueryError::not_in_query("Testfrau_T"))
        );
    }

    #[test]
    fn test_remove_absent_title_word_fails() {
        let mut query = QueryString::new();
        query.add_title_word("Awesome");
        assert_eq!(
            query.remove_title_word("Boring"),
            Err(QueryError::not_in_query("Boring"))
        );
    }

    #[test]
    fn test_remove_absent_category_fails() {
        let mut query = QueryString::new();
        assert_eq!(
            query.remove_category(Category::CondMat),
            Err(QueryError::not_in_query("cond-mat"))
        );
    }

    #[test]
    fn test_remove_all_title_words_clears_unconditionally() {
        let mut query = QueryString::new();
        query.add_title_word("Awesome");
        query.add_title_word("Great");
        query.remove_all_title_words();
        assert!(query.title_words().is_empty());
        // Clearing an already-empty list is fine too.
        query.remove_all_title_words();
        assert!(query.title_words().is_empty());
    }

    #[test]
    fn test_advance_page_shifts_window() {
        let mut query = QueryString::new();
        query.add_author("Testfrau_T");
        query.advance_page(10);
        assert!(query.render().unwrap().contains("&start=10&max_results=10"));
        query.advance_page(25);
        assert!(query.render().unwrap().contains("&start=20&max_results=25"));
    }

    #[test]
    fn test_set_base_url_replaces_endpoint() {
        let mut query = QueryString::new();
        query.add_author("Testfrau_T");
        query.set_base_url("http://127.0.0.1:9999/api/query?");
        assert!(
            query
                .render()
                .unwrap()
                .starts_with("http://127.0.0.1:9999/api/query?search_query=")
        );
    }

    #[test]
    fn test_category_parse_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_category_parse_unknown_fails() {
        let err = "definetlyInvalid".parse::<Category>().unwrap_err();
        assert_eq!(err, QueryError::invalid_category("definetlyInvalid"));
    }

    #[test]
    fn test_category_parse_empty_fails() {
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_connector_parse_is_case_insensitive() {
        assert_eq!("AND".parse::<Connector>().unwrap(), Connector::And);
        assert_eq!("or".parse::<Connector>().unwrap(), Connector::Or);
    }

    #[test]
    fn test_connector_parse_unknown_fails() {
        let err = "xor".parse::<Connector>().unwrap_err();
        assert_eq!(err, QueryError::invalid_connector("xor"));
    }
}
