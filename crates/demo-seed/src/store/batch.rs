use super::Document;

/// One queued overwrite of `collection/key`.
#[derive(Debug, Clone, PartialEq)]
pub struct Write {
    pub collection: String,
    pub key: String,
    pub payload: Document,
}

/// Writes collected for a single atomic commit.
///
/// Queue with [`set`](Self::set), inspect with [`writes`](Self::writes), then
/// hand the batch to [`DocumentStore::commit`](super::DocumentStore::commit),
/// which consumes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    writes: Vec<Write>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a full overwrite of `collection/key`.
    ///
    /// Setting the same document twice keeps its first position and the last payload.
    pub fn set(
        &mut self,
        collection: impl Into<String>,
        key: impl Into<String>,
        payload: Document,
    ) -> &mut Self {
        let collection = collection.into();
        let key = key.into();

        match self
            .writes
            .iter_mut()
            .find(|w| w.collection == collection && w.key == key)
        {
            Some(existing) => existing.payload = payload,
            None => self.writes.push(Write {
                collection,
                key,
                payload,
            }),
        }
        self
    }

    pub fn writes(&self) -> &[Write] {
        &self.writes
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Number of writes queued for `collection`.
    pub fn count(&self, collection: &str) -> usize {
        self.writes
            .iter()
            .filter(|w| w.collection == collection)
            .count()
    }

    pub fn into_writes(self) -> Vec<Write> {
        self.writes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_set_and_count() {
        let mut batch = WriteBatch::new();
        batch
            .set("recipes", "rec_001", doc(json!({"name": "Margherita"})))
            .set("recipes", "rec_002", doc(json!({"name": "Pepperoni"})))
            .set("settings", "restaurant", doc(json!({"currency": "USD"})));

        assert_eq!(batch.len(), 3);
        assert_eq!(batch.count("recipes"), 2);
        assert_eq!(batch.count("sales"), 0);
        assert_eq!(batch.writes()[2].key, "restaurant");
    }

    #[test]
    fn test_same_key_overwrites() {
        let mut batch = WriteBatch::new();
        batch.set("recipes", "rec_001", doc(json!({"v": 1})));
        batch.set("recipes", "rec_002", doc(json!({"v": 2})));
        batch.set("recipes", "rec_001", doc(json!({"v": 3})));

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.writes()[0].payload["v"], 3);
    }
}
