//! EntryStore implementation backed by SQLite.
//!
//! One table per category, all sharing the same shape: an auto-incremented
//! `id`, the category's one or two content columns (first column UNIQUE),
//! `learned_date`, `recalled_count`, and an optional `note`. The store owns
//! the single connection; every mutation runs in a scoped transaction.

use crate::error::Result;
use crate::registry::Category;
use crate::store::entry::{Entry, EntryContent, RETIREMENT_THRESHOLD};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, Row, Transaction, params};
use std::fs;
use std::path::Path;

/// Per-category entry counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCounts {
    /// All stored entries
    pub total: usize,
    /// Entries still served by scheduling queries
    pub eligible: usize,
    /// Entries at or past the retirement threshold
    pub retired: usize,
}

/// SQLite-backed store for learning entries.
pub struct EntryStore {
    /// The one connection through which all operations run
    conn: Connection,
}

impl EntryStore {
    /// Open or create a store at the given database path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Initialize the per-category tables.
    fn init_schema(conn: &Connection) -> Result<()> {
        let mut ddl = String::new();
        for category in Category::ALL {
            let content_columns = match category.content_fields() {
                [first] => format!("{first} TEXT NOT NULL UNIQUE"),
                [first, second] => format!("{first} TEXT NOT NULL UNIQUE, {second} TEXT NOT NULL"),
                _ => unreachable!("categories have one or two content fields"),
            };
            ddl.push_str(&format!(
                r#"
                CREATE TABLE IF NOT EXISTS {} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    {},
                    learned_date TEXT NOT NULL,
                    recalled_count INTEGER NOT NULL DEFAULT 0,
                    note TEXT
                );
                "#,
                category.table(),
                content_columns,
            ));
        }

        conn.execute_batch(&ddl)?;
        Ok(())
    }

    /// Insert a new entry with today's date and a zero recall count.
    ///
    /// Returns false when the first content field collides with an existing
    /// entry in the same category; nothing is written in that case. Other
    /// storage failures surface as errors.
    pub fn add(&mut self, content: &EntryContent, note: Option<&str>) -> Result<bool> {
        let category = content.category();
        let learned_date = Local::now().date_naive().format("%Y-%m-%d").to_string();
        let sql = insert_sql(category);

        let inserted = match content.paired() {
            Some(pair) => self
                .conn
                .execute(&sql, params![content.key(), pair, learned_date, note]),
            None => self.conn.execute(&sql, params![content.key(), learned_date, note]),
        };

        match inserted {
            Ok(_) => Ok(true),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Reset recall counts to zero for one category, or for every category
    /// when none is given. Each category resets in its own transaction.
    pub fn reset(&mut self, category: Option<Category>) -> Result<()> {
        match category {
            Some(category) => self.reset_category(category),
            None => {
                for category in Category::ALL {
                    self.reset_category(category)?;
                }
                Ok(())
            }
        }
    }

    fn reset_category(&mut self, category: Category) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            &format!("UPDATE {} SET recalled_count = 0", category.table()),
            [],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Count entries in a category by recall state.
    pub fn counts(&self, category: Category) -> Result<CategoryCounts> {
        let total: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", category.table()),
            [],
            |row| row.get(0),
        )?;

        let eligible: i64 = self.conn.query_row(
            &format!(
                "SELECT COUNT(*) FROM {} WHERE recalled_count < ?1",
                category.table()
            ),
            params![RETIREMENT_THRESHOLD],
            |row| row.get(0),
        )?;

        Ok(CategoryCounts {
            total: total as usize,
            eligible: eligible as usize,
            retired: (total - eligible) as usize,
        })
    }

    /// Close the store, releasing the connection.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| err.into())
    }

    /// Begin a transaction for a select-and-increment cycle.
    pub(crate) fn transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    /// Fetch every entry in `category` still below the retirement threshold.
    pub(crate) fn eligible(conn: &Connection, category: Category) -> Result<Vec<Entry>> {
        let sql = format!(
            "SELECT id, {}, learned_date, recalled_count, note FROM {} WHERE recalled_count < ?1",
            category.content_fields().join(", "),
            category.table(),
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![RETIREMENT_THRESHOLD], |row| row_to_entry(category, row))?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    /// Advance one entry's recall counter.
    pub(crate) fn bump_recall(conn: &Connection, category: Category, id: i64) -> Result<()> {
        conn.execute(
            &format!(
                "UPDATE {} SET recalled_count = recalled_count + 1 WHERE id = ?1",
                category.table()
            ),
            params![id],
        )?;
        Ok(())
    }
}

fn insert_sql(category: Category) -> String {
    let fields = category.content_fields();
    let placeholders: Vec<String> = (1..=fields.len() + 2).map(|i| format!("?{i}")).collect();
    format!(
        "INSERT INTO {} ({}, learned_date, note) VALUES ({})",
        category.table(),
        fields.join(", "),
        placeholders.join(", "),
    )
}

/// Map a `SELECT id, <fields>, learned_date, recalled_count, note` row.
fn row_to_entry(category: Category, row: &Row<'_>) -> rusqlite::Result<Entry> {
    let id: i64 = row.get(0)?;

    let (content, date_idx) = match category {
        Category::GrammarMistakes => (
            EntryContent::GrammarMistake {
                mistake: row.get(1)?,
                correction: row.get(2)?,
            },
            3,
        ),
        Category::BetterPhrases => (
            EntryContent::BetterPhrase {
                original: row.get(1)?,
                better: row.get(2)?,
            },
            3,
        ),
        Category::BetterVocabulary => (
            EntryContent::BetterVocabulary {
                word: row.get(1)?,
                better_word: row.get(2)?,
            },
            3,
        ),
        Category::NewWords => (EntryContent::NewWord { word: row.get(1)? }, 2),
        Category::NewPhrases => (EntryContent::NewPhrase { phrase: row.get(1)? }, 2),
    };

    let date_text: String = row.get(date_idx)?;
    let learned_date = NaiveDate::parse_from_str(&date_text, "%Y-%m-%d").map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(date_idx, rusqlite::types::Type::Text, Box::new(err))
    })?;

    Ok(Entry {
        id,
        content,
        learned_date,
        recalled_count: row.get(date_idx + 1)?,
        note: row.get(date_idx + 2)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_temp_store() -> (EntryStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = EntryStore::open(temp_dir.path().join("learnings.db")).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_open_creates_database_and_parents() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("learnings.db");
        let _store = EntryStore::open(&db_path).unwrap();

        assert!(db_path.exists());
    }

    #[test]
    fn test_add_entry() {
        let (mut store, _temp) = create_temp_store();

        let content = EntryContent::grammar_mistake("He don't like it", "He doesn't like it");
        assert!(store.add(&content, Some("Common mistake")).unwrap());

        let counts = store.counts(Category::GrammarMistakes).unwrap();
        assert_eq!(counts.total, 1);
        assert_eq!(counts.eligible, 1);
        assert_eq!(counts.retired, 0);
    }

    #[test]
    fn test_duplicate_key_is_rejected_without_write() {
        let (mut store, _temp) = create_temp_store();

        let content = EntryContent::new_word("nitty-gritty");
        assert!(store.add(&content, None).unwrap());
        assert!(!store.add(&content, Some("heard again")).unwrap());

        assert_eq!(store.counts(Category::NewWords).unwrap().total, 1);
    }

    #[test]
    fn test_duplicate_check_is_per_category() {
        let (mut store, _temp) = create_temp_store();

        assert!(store.add(&EntryContent::new_word("nitty-gritty"), None).unwrap());
        assert!(store.add(&EntryContent::new_phrase("nitty-gritty"), None).unwrap());

        assert_eq!(store.counts(Category::NewWords).unwrap().total, 1);
        assert_eq!(store.counts(Category::NewPhrases).unwrap().total, 1);
    }

    #[test]
    fn test_duplicate_only_applies_to_first_field() {
        let (mut store, _temp) = create_temp_store();

        assert!(store
            .add(&EntryContent::better_vocabulary("very big", "enormous"), None)
            .unwrap());
        // Same second field, different key: allowed.
        assert!(store
            .add(&EntryContent::better_vocabulary("really big", "enormous"), None)
            .unwrap());
        // Same key, different second field: rejected.
        assert!(!store
            .add(&EntryContent::better_vocabulary("very big", "huge"), None)
            .unwrap());

        assert_eq!(store.counts(Category::BetterVocabulary).unwrap().total, 2);
    }

    #[test]
    fn test_new_entry_fields() {
        let (mut store, _temp) = create_temp_store();

        store
            .add(&EntryContent::new_phrase("looked down upon"), Some("From an article"))
            .unwrap();

        let entries = EntryStore::eligible(&store.conn, Category::NewPhrases).unwrap();
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.content, EntryContent::new_phrase("looked down upon"));
        assert_eq!(entry.recalled_count, 0);
        assert_eq!(entry.note.as_deref(), Some("From an article"));
        assert_eq!(entry.learned_date, Local::now().date_naive());
    }

    #[test]
    fn test_eligible_excludes_retired() {
        let (mut store, _temp) = create_temp_store();

        store.add(&EntryContent::new_word("serendipity"), None).unwrap();
        store.add(&EntryContent::new_word("nitty-gritty"), None).unwrap();

        let id = EntryStore::eligible(&store.conn, Category::NewWords).unwrap()[0].id;
        for _ in 0..RETIREMENT_THRESHOLD {
            EntryStore::bump_recall(&store.conn, Category::NewWords, id).unwrap();
        }

        let eligible = EntryStore::eligible(&store.conn, Category::NewWords).unwrap();
        assert_eq!(eligible.len(), 1);
        assert_ne!(eligible[0].id, id);

        let counts = store.counts(Category::NewWords).unwrap();
        assert_eq!(counts.total, 2);
        assert_eq!(counts.eligible, 1);
        assert_eq!(counts.retired, 1);
    }

    #[test]
    fn test_reset_single_category() {
        let (mut store, _temp) = create_temp_store();

        store.add(&EntryContent::new_word("serendipity"), None).unwrap();
        store.add(&EntryContent::new_phrase("looked down upon"), None).unwrap();

        let word_id = EntryStore::eligible(&store.conn, Category::NewWords).unwrap()[0].id;
        let phrase_id = EntryStore::eligible(&store.conn, Category::NewPhrases).unwrap()[0].id;
        for _ in 0..RETIREMENT_THRESHOLD {
            EntryStore::bump_recall(&store.conn, Category::NewWords, word_id).unwrap();
            EntryStore::bump_recall(&store.conn, Category::NewPhrases, phrase_id).unwrap();
        }

        store.reset(Some(Category::NewWords)).unwrap();

        assert_eq!(store.counts(Category::NewWords).unwrap().eligible, 1);
        // The other category is untouched.
        assert_eq!(store.counts(Category::NewPhrases).unwrap().eligible, 0);
    }

    #[test]
    fn test_reset_all_categories() {
        let (mut store, _temp) = create_temp_store();

        store.add(&EntryContent::new_word("serendipity"), None).unwrap();
        store.add(&EntryContent::new_phrase("looked down upon"), None).unwrap();

        let word_id = EntryStore::eligible(&store.conn, Category::NewWords).unwrap()[0].id;
        let phrase_id = EntryStore::eligible(&store.conn, Category::NewPhrases).unwrap()[0].id;
        for _ in 0..RETIREMENT_THRESHOLD {
            EntryStore::bump_recall(&store.conn, Category::NewWords, word_id).unwrap();
            EntryStore::bump_recall(&store.conn, Category::NewPhrases, phrase_id).unwrap();
        }

        store.reset(None).unwrap();

        assert_eq!(store.counts(Category::NewWords).unwrap().eligible, 1);
        assert_eq!(store.counts(Category::NewPhrases).unwrap().eligible, 1);
    }

    #[test]
    fn test_entries_persist_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("learnings.db");

        {
            let mut store = EntryStore::open(&db_path).unwrap();
            store
                .add(
                    &EntryContent::grammar_mistake("He don't like it", "He doesn't like it"),
                    Some("Common mistake"),
                )
                .unwrap();
            store.close().unwrap();
        }

        {
            let store = EntryStore::open(&db_path).unwrap();
            let entries = EntryStore::eligible(&store.conn, Category::GrammarMistakes).unwrap();
            assert_eq!(entries.len(), 1);
            assert_eq!(
                entries[0].content,
                EntryContent::grammar_mistake("He don't like it", "He doesn't like it")
            );
            assert_eq!(entries[0].note.as_deref(), Some("Common mistake"));
        }
    }

    #[test]
    fn test_ids_are_monotonic() {
        let (mut store, _temp) = create_temp_store();

        store.add(&EntryContent::new_word("first"), None).unwrap();
        store.add(&EntryContent::new_word("second"), None).unwrap();
        store.add(&EntryContent::new_word("third"), None).unwrap();

        let mut entries = EntryStore::eligible(&store.conn, Category::NewWords).unwrap();
        entries.sort_by_key(|e| e.id);
        assert!(entries.windows(2).all(|pair| pair[0].id < pair[1].id));
    }

    #[test]
    fn test_close() {
        let (store, _temp) = create_temp_store();
        store.close().unwrap();
    }
}
