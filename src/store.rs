// Copyright (C) 2026 the fanlog developers
//
// This file is part of fanlog.
//
// fanlog is free software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// fanlog is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even
// the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General
// Public License for more details.
//
// You should have received a copy of the GNU General Public License along with fanlog.  If not,
// see <http://www.gnu.org/licenses/>.

//! The document-store sender.
//!
//! This module defines the two traits a document store must satisfy-- [`DocumentStore`]
//! ("get-or-create a collection by name") and [`Collection`] ("insert one document")-- the
//! [`StoreSender`] that writes log records through them, and an in-memory implementation.
//! The core treats the collection handle opaquely; a driver for a real database only has to
//! implement these two operations.
//!
//! # Examples
//!
//! ```rust
//! use fanlog::store::{MemoryStore, StoreSender};
//! let store = MemoryStore::new();
//! let sender = StoreSender::open(Vec::new(), &store, "log").unwrap();
//! ```
//!
//! An empty collection name fails at construction, not at first use:
//!
//! ```rust
//! use fanlog::store::{MemoryStore, StoreSender};
//! let store = MemoryStore::new();
//! assert!(StoreSender::open(Vec::new(), &store, "").is_err());
//! ```

use crate::{
    error::{Error, Result},
    sender::Sender,
    severity::Severity,
};

use backtrace::Backtrace;
use chrono::Utc;
use serde_json::{json, Map, Value};

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

////////////////////////////////////////////////////////////////////////////////////////////////////
//                                      document store seam                                       //
////////////////////////////////////////////////////////////////////////////////////////////////////

/// One opaque collection: a single insert/write-like operation.
pub trait Collection: Send + Sync {
    /// Write one document. Exactly one backend call per invocation.
    fn insert(&self, document: &Value) -> Result<()>;
}

/// A backend that can hand out collections by name, creating them on first use.
pub trait DocumentStore {
    type Collection: Collection;
    /// Get-or-create the collection named `name`.
    fn collection(&self, name: &str) -> Result<Self::Collection>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
//                                       struct StoreSender                                       //
////////////////////////////////////////////////////////////////////////////////////////////////////

/// A [`Sender`] that writes each record as one document `{level, message, context}`.
///
/// The stored context is a *clone* of the caller's, extended with `timestamp.store` set to the
/// wall-clock milliseconds at the moment of the call; any `timestamp.*` subfields the caller
/// already supplied survive alongside it. The caller's mapping is never touched.
pub struct StoreSender<C: Collection> {
    accepted: Vec<Severity>,
    collection: C,
}

impl<C: Collection> StoreSender<C> {
    /// Construct a sender around a collection handle the caller already holds.
    pub fn with_collection(accepted: Vec<Severity>, collection: C) -> StoreSender<C> {
        StoreSender {
            accepted,
            collection,
        }
    }

    /// Construct a sender by collection name, opening (or creating) the collection now.
    ///
    /// Fails fast with [`Error::BadCollectionName`] on an empty name-- malformed configuration
    /// is a setup-time problem, not a first-use surprise.
    pub fn open<S>(accepted: Vec<Severity>, store: &S, name: &str) -> Result<StoreSender<C>>
    where
        S: DocumentStore<Collection = C>,
    {
        if name.is_empty() {
            return Err(Error::BadCollectionName {
                name: name.to_owned(),
                back: Backtrace::new(),
            });
        }
        Ok(StoreSender {
            accepted,
            collection: store.collection(name)?,
        })
    }
}

impl<C: Collection> Sender for StoreSender<C> {
    fn accepted_levels(&self) -> &[Severity] {
        &self.accepted
    }

    fn send(
        &self,
        severity: Severity,
        message: &Value,
        context: &Map<String, Value>,
    ) -> Result<()> {
        if !self.accepts(severity) {
            return Ok(());
        }
        let mut context = context.clone();
        // A caller-supplied `timestamp` that isn't a mapping can't carry subfields; replace it.
        if !matches!(context.get("timestamp"), Some(Value::Object(_))) {
            context.insert("timestamp".to_owned(), Value::Object(Map::new()));
        }
        if let Some(Value::Object(stamps)) = context.get_mut("timestamp") {
            stamps.insert(
                "store".to_owned(),
                Value::from(Utc::now().timestamp_millis()),
            );
        }
        let document = json!({
            "level": severity.code(),
            "message": message,
            "context": context,
        });
        self.collection.insert(&document)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
//                                     in-memory implementation                                   //
////////////////////////////////////////////////////////////////////////////////////////////////////

/// A [`Collection`] held in process memory; handles are cheap clones of one shared vector.
#[derive(Clone, Default)]
pub struct MemoryCollection {
    documents: Arc<Mutex<Vec<Value>>>,
}

impl MemoryCollection {
    pub fn new() -> MemoryCollection {
        MemoryCollection::default()
    }
    /// Snapshot the documents inserted so far.
    pub fn documents(&self) -> Vec<Value> {
        self.documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
    pub fn len(&self) -> usize {
        self.documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Collection for MemoryCollection {
    fn insert(&self, document: &Value) -> Result<()> {
        self.documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(document.clone());
        Ok(())
    }
}

/// A [`DocumentStore`] backed by process memory. Useful on its own for tests & demos, and the
/// reference for what a real driver has to provide.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, MemoryCollection>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

impl DocumentStore for MemoryStore {
    type Collection = MemoryCollection;
    fn collection(&self, name: &str) -> Result<MemoryCollection> {
        let mut collections = self
            .collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(collections.entry(name.to_owned()).or_default().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn get_or_create_returns_the_same_collection() {
        let store = MemoryStore::new();
        let first = store.collection("log").unwrap();
        let again = store.collection("log").unwrap();
        first.insert(&json!({ "n": 1 })).unwrap();
        assert_eq!(again.len(), 1);
        assert!(store.collection("other").unwrap().is_empty());
    }

    #[test]
    fn send_inserts_exactly_one_stamped_document() {
        let store = MemoryStore::new();
        let sender = StoreSender::open(Vec::new(), &store, "log").unwrap();
        let collection = store.collection("log").unwrap();

        let before = Utc::now().timestamp_millis();
        sender
            .send(Severity::Error, &json!("disk failing"), &Map::new())
            .unwrap();
        let after = Utc::now().timestamp_millis();

        let documents = collection.documents();
        assert_eq!(documents.len(), 1);
        let document = &documents[0];
        assert_eq!(document["level"], json!(3));
        assert_eq!(document["message"], json!("disk failing"));
        let stamp = document["context"]["timestamp"]["store"].as_i64().unwrap();
        assert!(before <= stamp && stamp <= after);
    }

    #[test]
    fn existing_timestamp_subfields_survive() {
        let store = MemoryStore::new();
        let sender = StoreSender::open(Vec::new(), &store, "log").unwrap();

        let context = json!({ "timestamp": { "created": 123 }, "user": "holly" });
        let context = context.as_object().unwrap().clone();
        let untouched = context.clone();

        sender
            .send(Severity::Notice, &json!("hi"), &context)
            .unwrap();

        // the caller's mapping is untouched...
        assert_eq!(context, untouched);
        // ...while the stored copy carries both subfields
        let documents = store.collection("log").unwrap().documents();
        let stamps = documents[0]["context"]["timestamp"].as_object().unwrap();
        assert_eq!(stamps["created"], json!(123));
        assert!(stamps.contains_key("store"));
        assert_eq!(documents[0]["context"]["user"], json!("holly"));
    }

    #[test]
    fn a_non_mapping_timestamp_is_replaced() {
        let store = MemoryStore::new();
        let sender = StoreSender::open(Vec::new(), &store, "log").unwrap();
        let context = json!({ "timestamp": 999 });
        sender
            .send(Severity::Notice, &json!("hi"), context.as_object().unwrap())
            .unwrap();
        let documents = store.collection("log").unwrap().documents();
        assert!(documents[0]["context"]["timestamp"]["store"].is_i64());
    }

    #[test]
    fn filtered_levels_write_nothing() {
        let store = MemoryStore::new();
        let sender = StoreSender::open(vec![Severity::Emergency], &store, "log").unwrap();
        sender
            .send(Severity::Debug, &json!("chatter"), &Map::new())
            .unwrap();
        assert!(store.collection("log").unwrap().is_empty());
    }

    #[test]
    fn an_empty_collection_name_fails_at_construction() {
        let store = MemoryStore::new();
        assert!(matches!(
            StoreSender::open(Vec::new(), &store, ""),
            Err(Error::BadCollectionName { .. })
        ));
    }
}
