//! SQLite-backed persistence for documents and their embedded pages.
//!
//! The store is the sole writer of persisted records. It is constructed once
//! at startup and handed to the orchestrators as an `Arc`; business logic
//! never reaches for a global connection.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{Connection, OptionalExtension, params};

use crate::error::StoreError;
use crate::models::{DocumentMetadata, DocumentRecord, Page};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    id TEXT PRIMARY KEY,
    file_name TEXT NOT NULL,
    title TEXT,
    summary TEXT,
    keywords TEXT,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS pages (
    document_id TEXT NOT NULL,
    page_number INTEGER NOT NULL,
    text TEXT NOT NULL,
    embedding TEXT NOT NULL,
    PRIMARY KEY (document_id, page_number)
);
"#;

/// Document and page counts for the status command.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreStats {
    pub documents: u64,
    pub pages: u64,
}

pub struct PageStore {
    conn: Mutex<Connection>,
}

impl PageStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::PathError(format!("{}: {e}", parent.display())))?;
        }
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Store a document's pages in one batch, replacing any pages already
    /// held for this id. Re-ingesting a document refreshes its content
    /// instead of appending duplicate rows.
    pub fn put_document_pages(
        &self,
        document_id: &str,
        file_name: &str,
        pages: &[Page],
    ) -> Result<(), StoreError> {
        let conn = self.lock();
        let tx = conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO documents (id, file_name, created_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET file_name = excluded.file_name",
            params![document_id, file_name, chrono::Utc::now().to_rfc3339()],
        )?;
        tx.execute(
            "DELETE FROM pages WHERE document_id = ?1",
            params![document_id],
        )?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO pages (document_id, page_number, text, embedding)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for page in pages {
                let embedding = serde_json::to_string(&page.embedding)?;
                stmt.execute(params![document_id, page.number, page.text, embedding])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// All pages for a document, page-number ascending. An unknown id yields
    /// an empty vector, not an error.
    pub fn get_pages(&self, document_id: &str) -> Result<Vec<Page>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT page_number, text, embedding FROM pages
             WHERE document_id = ?1 ORDER BY page_number ASC",
        )?;

        let rows = stmt.query_map(params![document_id], |row| {
            Ok((
                row.get::<_, u32>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut pages = Vec::new();
        for row in rows {
            let (number, text, embedding) = row?;
            pages.push(Page {
                number,
                text,
                embedding: serde_json::from_str(&embedding)?,
            });
        }
        Ok(pages)
    }

    pub fn put_document_metadata(
        &self,
        document_id: &str,
        metadata: &DocumentMetadata,
    ) -> Result<(), StoreError> {
        let conn = self.lock();
        conn.execute(
            "UPDATE documents SET title = ?2, summary = ?3, keywords = ?4 WHERE id = ?1",
            params![
                document_id,
                metadata.title,
                metadata.summary,
                metadata.keywords.join(","),
            ],
        )?;
        Ok(())
    }

    pub fn list_documents(&self) -> Result<Vec<DocumentRecord>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, file_name, title, summary, keywords, created_at
             FROM documents ORDER BY created_at ASC, id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(DocumentRecord {
                id: row.get(0)?,
                file_name: row.get(1)?,
                title: row.get(2)?,
                summary: row.get(3)?,
                keywords: row
                    .get::<_, Option<String>>(4)?
                    .map(|s| split_keywords(&s))
                    .unwrap_or_default(),
                created_at: row.get(5)?,
            })
        })?;

        let mut documents = Vec::new();
        for row in rows {
            documents.push(row?);
        }
        Ok(documents)
    }

    pub fn document_exists(&self, document_id: &str) -> Result<bool, StoreError> {
        let conn = self.lock();
        let found: Option<String> = conn
            .query_row(
                "SELECT id FROM documents WHERE id = ?1",
                params![document_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Remove a document's pages and its metadata row in one transaction:
    /// both or neither. Returns whether the document existed.
    pub fn delete_document(&self, document_id: &str) -> Result<bool, StoreError> {
        let conn = self.lock();
        let tx = conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM pages WHERE document_id = ?1",
            params![document_id],
        )?;
        let removed = tx.execute("DELETE FROM documents WHERE id = ?1", params![document_id])?;
        tx.commit()?;
        Ok(removed > 0)
    }

    pub fn stats(&self) -> Result<StoreStats, StoreError> {
        let conn = self.lock();
        let documents: i64 = conn.query_row("SELECT COUNT(*) FROM documents", [], |r| r.get(0))?;
        let pages: i64 = conn.query_row("SELECT COUNT(*) FROM pages", [], |r| r.get(0))?;
        Ok(StoreStats {
            documents: documents as u64,
            pages: pages as u64,
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pages() -> Vec<Page> {
        vec![
            Page {
                number: 1,
                text: "Alice".to_string(),
                embedding: vec![1.0, 0.0],
            },
            Page {
                number: 2,
                text: "Bob".to_string(),
                embedding: vec![0.0, 1.0],
            },
        ]
    }

    #[test]
    fn test_put_get_roundtrip() {
        let store = PageStore::open_in_memory().unwrap();
        store
            .put_document_pages("doc123", "doc.pdf", &sample_pages())
            .unwrap();

        let pages = store.get_pages("doc123").unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].number, 1);
        assert_eq!(pages[0].text, "Alice");
        assert_eq!(pages[0].embedding, vec![1.0, 0.0]);
        assert_eq!(pages[1].number, 2);
        assert_eq!(pages[0].embedding.len(), pages[1].embedding.len());
    }

    #[test]
    fn test_unknown_document_yields_empty() {
        let store = PageStore::open_in_memory().unwrap();
        assert!(store.get_pages("missing").unwrap().is_empty());
        assert!(!store.document_exists("missing").unwrap());
    }

    #[test]
    fn test_reingest_replaces_pages() {
        let store = PageStore::open_in_memory().unwrap();
        store
            .put_document_pages("doc123", "doc.pdf", &sample_pages())
            .unwrap();
        store
            .put_document_pages(
                "doc123",
                "doc.pdf",
                &[Page {
                    number: 1,
                    text: "Only page".to_string(),
                    embedding: vec![0.5, 0.5],
                }],
            )
            .unwrap();

        let pages = store.get_pages("doc123").unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].text, "Only page");
        assert_eq!(store.list_documents().unwrap().len(), 1);
    }

    #[test]
    fn test_metadata_update_and_list() {
        let store = PageStore::open_in_memory().unwrap();
        store
            .put_document_pages("doc123", "doc.pdf", &sample_pages())
            .unwrap();

        let listed = store.list_documents().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, None);
        assert!(listed[0].keywords.is_empty());

        store
            .put_document_metadata(
                "doc123",
                &DocumentMetadata {
                    title: "A Title".to_string(),
                    summary: "Two sentences. Exactly two.".to_string(),
                    keywords: vec!["alpha".to_string(), "beta".to_string()],
                },
            )
            .unwrap();

        let listed = store.list_documents().unwrap();
        assert_eq!(listed[0].title.as_deref(), Some("A Title"));
        assert_eq!(listed[0].keywords, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_delete_removes_pages_and_metadata() {
        let store = PageStore::open_in_memory().unwrap();
        store
            .put_document_pages("doc123", "doc.pdf", &sample_pages())
            .unwrap();

        assert!(store.delete_document("doc123").unwrap());
        assert!(store.get_pages("doc123").unwrap().is_empty());
        assert!(store.list_documents().unwrap().is_empty());
        assert!(!store.delete_document("doc123").unwrap());
    }

    #[test]
    fn test_stats_counts() {
        let store = PageStore::open_in_memory().unwrap();
        store
            .put_document_pages("doc123", "doc.pdf", &sample_pages())
            .unwrap();
        let stats = store.stats().unwrap();
        assert_eq!(stats.documents, 1);
        assert_eq!(stats.pages, 2);
    }
}
