//! Query side of the dictionary index.
//!
//! A search first looks at headwords, then at inflected forms, and only
//! when both come up empty at translations and quotations. Within one field
//! every token of the query must match; the fields of a stage are
//! alternatives.

use std::path::Path;

use log::debug;
use serde::Serialize;
use tantivy::collector::{Count, DocSetCollector, TopDocs};
use tantivy::query::{BooleanQuery, Occur, Query, RegexQuery, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, Value};
use tantivy::tokenizer::TokenStream;
use tantivy::{DocAddress, Index, IndexReader, Order, Searcher, TantivyDocument, Term};

use crate::indexer::field_names::{self, FieldSet};
use crate::indexer::register_analyzers;
use crate::model::Language;
use crate::Result;

/// One matching entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: Option<String>,
    pub language: Option<Language>,
    pub roots: Vec<String>,
    pub sort_key: Option<String>,
    pub display_text: String,
}

/// Read-only access to an index built by
/// [`DictionaryIndexer`](crate::indexer::DictionaryIndexer).
///
/// # Examples
///
/// ```no_run
/// use dict_index::readers::DictionarySearcher;
/// use dict_index::Language;
///
/// # fn main() -> dict_index::Result<()> {
/// let searcher = DictionarySearcher::open("index")?;
/// for hit in searcher.search("hus", Some(Language::No), 10)? {
///     println!("{}", hit.display_text);
/// }
/// # Ok(())
/// # }
/// ```
pub struct DictionarySearcher {
    index: Index,
    reader: IndexReader,
}

impl DictionarySearcher {
    pub fn open<P: AsRef<Path>>(index_dir: P) -> Result<Self> {
        let index = Index::open_in_dir(index_dir.as_ref())?;
        debug!("Opened index for search: {}", index_dir.as_ref().display());
        Self::from_index(index)
    }

    pub fn from_index(index: Index) -> Result<Self> {
        register_analyzers(&index);
        let reader = index.reader()?;
        Ok(Self { index, reader })
    }

    /// Picks up commits made after the searcher was opened.
    pub fn reload(&self) -> Result<()> {
        self.reader.reload()?;
        Ok(())
    }

    /// Finds entries for `query`, at most `max` of them, ordered by sort key.
    ///
    /// Only the top `max` documents of the winning stage are loaded; entries
    /// sharing a sort key keep index order.
    ///
    /// With a `language`, only entries whose headwords are in that language
    /// are matched by headword and form; the full-text stage then looks at
    /// text written in that language.
    pub fn search(&self, query: &str, language: Option<Language>, max: usize) -> Result<Vec<SearchHit>> {
        if query.trim().is_empty() || max == 0 {
            return Ok(Vec::new());
        }
        let languages = match language {
            Some(language) => vec![language],
            None => vec![Language::Hu, Language::No],
        };
        let roots: Vec<&str> = languages.iter().map(|l| FieldSet::for_language(*l).roots).collect();
        let forms: Vec<&str> = languages.iter().map(|l| FieldSet::for_language(*l).forms).collect();
        let full_text: Vec<&str> = languages.iter().flat_map(|l| FieldSet::full_text_in(*l)).collect();

        let searcher = self.reader.searcher();
        for (stage, fields) in [("roots", roots), ("forms", forms), ("full text", full_text)] {
            let Some(stage_query) = self.fields_query(query, &fields, false)? else {
                continue;
            };
            let top = TopDocs::with_limit(max).order_by_string_fast_field(field_names::SORT, Order::Asc);
            let (count, top_docs) = searcher.search(stage_query.as_ref(), &(Count, top))?;
            if count == 0 {
                continue;
            }
            debug!("{} {} matches for {:?}", count, stage, query);
            return self.collect_hits(&searcher, top_docs.into_iter().map(|(_, address)| address));
        }
        Ok(Vec::new())
    }

    /// Headwords starting with the words of `prefix`, deduplicated and
    /// sorted, at most `max` of them.
    pub fn suggestions(&self, prefix: &str, max: usize) -> Result<Vec<String>> {
        if prefix.trim().is_empty() || max == 0 {
            return Ok(Vec::new());
        }
        let Some(query) = self.fields_query(prefix, &[field_names::SUGGESTION], true)? else {
            return Ok(Vec::new());
        };
        let searcher = self.reader.searcher();
        let suggestion_field = self.field(field_names::SUGGESTION)?;

        let mut suggestions = Vec::new();
        for address in searcher.search(query.as_ref(), &DocSetCollector)? {
            let document = searcher.doc::<TantivyDocument>(address)?;
            if let Some(value) = document.get_first(suggestion_field).and_then(|v| v.as_str()) {
                suggestions.push(value.to_string());
            }
        }
        suggestions.sort();
        suggestions.dedup();
        suggestions.truncate(max);
        Ok(suggestions)
    }

    fn field(&self, name: &str) -> Result<Field> {
        Ok(self.index.schema().get_field(name)?)
    }

    /// Analyzes `text` the way `field` was indexed.
    fn tokens(&self, field: Field, text: &str) -> Result<Vec<String>> {
        let mut analyzer = self.index.tokenizer_for_field(field)?;
        let mut stream = analyzer.token_stream(text);
        let mut tokens = Vec::new();
        while stream.advance() {
            tokens.push(stream.token().text.clone());
        }
        Ok(tokens)
    }

    /// One SHOULD clause per field, each requiring all query tokens.
    ///
    /// Returns `None` when no field yields a token.
    fn fields_query(&self, text: &str, fields: &[&str], prefix: bool) -> Result<Option<Box<dyn Query>>> {
        let mut field_clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();
        for name in fields {
            let field = self.field(name)?;
            let mut token_clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();
            for token in self.tokens(field, text)? {
                let query: Box<dyn Query> = if prefix {
                    Box::new(RegexQuery::from_pattern(&format!("{}.*", regex::escape(&token)), field)?)
                } else {
                    Box::new(TermQuery::new(
                        Term::from_field_text(field, &token),
                        IndexRecordOption::Basic,
                    ))
                };
                token_clauses.push((Occur::Must, query));
            }
            if !token_clauses.is_empty() {
                field_clauses.push((Occur::Should, Box::new(BooleanQuery::new(token_clauses))));
            }
        }
        if field_clauses.is_empty() {
            return Ok(None);
        }
        Ok(Some(Box::new(BooleanQuery::new(field_clauses))))
    }

    fn collect_hits<I>(&self, searcher: &Searcher, addresses: I) -> Result<Vec<SearchHit>>
    where
        I: IntoIterator<Item = DocAddress>,
    {
        let id = self.field(field_names::ID)?;
        let lang = self.field(field_names::LANG)?;
        let sort = self.field(field_names::SORT)?;
        let text = self.field(field_names::TEXT)?;
        let root_fields = [self.field(field_names::HU_ROOTS)?, self.field(field_names::NO_ROOTS)?];

        let mut hits = Vec::new();
        for address in addresses {
            let document = searcher.doc::<TantivyDocument>(address)?;
            let first_str = |field: Field| document.get_first(field).and_then(|v| v.as_str()).map(str::to_string);
            let roots = root_fields
                .iter()
                .flat_map(|field| document.get_all(*field))
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
            hits.push(SearchHit {
                id: first_str(id),
                language: first_str(lang).and_then(|code| code.parse().ok()),
                roots,
                sort_key: first_str(sort),
                display_text: first_str(text).unwrap_or_default(),
            });
        }
        Ok(hits)
    }
}
