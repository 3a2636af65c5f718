//! Lazy iteration over paged list endpoints
//!
//! List endpoints answer with `{<field>: [...], "nextPageKey": "..."}`. The
//! follow-up request carries only `?nextPageKey=<key>`; the API rejects any
//! other query parameter next to it.

use crate::client::DynatraceClient;
use crate::error::ApiError;
use crate::transport::Transport;
use serde_json::Value;
use url::Url;

/// Query parameter naming the next page
pub const NEXT_PAGE_KEY: &str = "nextPageKey";

enum Cursor {
    First,
    Next(String),
    Done,
}

/// Iterator over every element of a paged list
///
/// Pages are fetched on demand. After an error the iterator is exhausted.
pub struct Pages<'a, T: Transport> {
    client: &'a DynatraceClient<T>,
    segments: Vec<String>,
    field: &'static str,
    buffer: std::vec::IntoIter<Value>,
    cursor: Cursor,
}

impl<'a, T: Transport> Pages<'a, T> {
    pub(crate) fn new(
        client: &'a DynatraceClient<T>,
        segments: Vec<String>,
        field: &'static str,
    ) -> Self {
        Self {
            client,
            segments,
            field,
            buffer: Vec::new().into_iter(),
            cursor: Cursor::First,
        }
    }

    fn page_url(&self, key: Option<&str>) -> Result<Url, ApiError> {
        let segments: Vec<&str> = self.segments.iter().map(String::as_str).collect();
        let mut url = self.client.endpoint(&segments)?;
        if let Some(key) = key {
            url.query_pairs_mut().append_pair(NEXT_PAGE_KEY, key);
        }
        Ok(url)
    }

    fn fetch(&mut self, key: Option<&str>) -> Result<(), ApiError> {
        let url = self.page_url(key)?;
        let mut page: Value = self.client.get_json(url.clone())?;

        let items = match page.get_mut(self.field).map(Value::take) {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(ApiError::MissingField {
                    url,
                    field: self.field,
                });
            }
        };

        self.cursor = match page.get(NEXT_PAGE_KEY).and_then(Value::as_str) {
            Some(next) if !next.is_empty() => Cursor::Next(next.to_string()),
            _ => Cursor::Done,
        };

        tracing::trace!(%url, items = items.len(), more = !matches!(self.cursor, Cursor::Done), "fetched page");

        self.buffer = items.into_iter();
        Ok(())
    }
}

impl<T: Transport> Iterator for Pages<'_, T> {
    type Item = Result<Value, ApiError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.next() {
                return Some(Ok(item));
            }

            let key = match std::mem::replace(&mut self.cursor, Cursor::Done) {
                Cursor::Done => return None,
                Cursor::First => None,
                Cursor::Next(key) => Some(key),
            };

            if let Err(err) = self.fetch(key.as_deref()) {
                self.cursor = Cursor::Done;
                return Some(Err(err));
            }
        }
    }
}
