use std::collections::HashMap;
use std::convert::Infallible;

use axum::body::Bytes;
use axum::extract::{Form, FromRequest, Multipart, Request};
use axum::http::header;
use serde_json::{Map, Value};

use crate::coerce::coerce_bool;
use crate::data_models::QueryOptions;

/// Request fields from a urlencoded form, a multipart form or a JSON object body.
///
/// A body that cannot be parsed yields no fields, so validation reports the
/// missing query instead of the extractor rejecting the request.
#[derive(Debug, Default, Clone)]
pub struct RequestFields(pub Map<String, Value>);

#[axum::async_trait]
impl<S> FromRequest<S> for RequestFields
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let fields = if content_type.starts_with("application/x-www-form-urlencoded") {
            match Form::<HashMap<String, String>>::from_request(req, state).await {
                Ok(Form(form)) => form
                    .into_iter()
                    .map(|(k, v)| (k, Value::String(v)))
                    .collect(),
                Err(_) => Map::new(),
            }
        } else if content_type.starts_with("multipart/form-data") {
            match Multipart::from_request(req, state).await {
                Ok(multipart) => multipart_fields(multipart).await,
                Err(_) => Map::new(),
            }
        } else {
            let body = Bytes::from_request(req, state).await.unwrap_or_default();
            serde_json::from_slice::<Map<String, Value>>(&body).unwrap_or_default()
        };

        Ok(Self(fields))
    }
}

/// Text parts of a multipart body. File parts are skipped; a malformed body
/// keeps whatever fields were read before the error.
async fn multipart_fields(mut multipart: Multipart) -> Map<String, Value> {
    let mut fields = Map::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if let Ok(text) = field.text().await {
            fields.insert(name, Value::String(text));
        }
    }
    fields
}

impl RequestFields {
    /// Trimmed text of a field; numbers are rendered, anything else is empty.
    pub fn text(&self, key: &str) -> String {
        match self.0.get(key) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }

    pub fn flag(&self, key: &str) -> bool {
        coerce_bool(self.0.get(key))
    }

    pub fn query_options(&self) -> QueryOptions {
        QueryOptions::new(self.text("q"), self.flag("want_prices"))
    }

    pub fn person_name(&self) -> String {
        self.text("name")
    }
}
