//! Request shapes accepted by the handlers
//!
//! None of these extractors reject a request: every route has to record its
//! call before anything can fail, so malformed input degrades to "absent".

use actix_web::{dev::Payload, web, Either, FromRequest, HttpRequest};
use apitutor_core::models::CustomerDraft;
use futures::future::{ready, Ready};
use std::convert::Infallible;
use tracing::debug;

/// First value of `name` in the query string. Repeated keys keep the
/// first occurrence; an undecodable query string counts as empty.
fn first_query_value(req: &HttpRequest, name: &str) -> Option<String> {
    let pairs = match web::Query::<Vec<(String, String)>>::from_query(req.query_string()) {
        Ok(pairs) => pairs.into_inner(),
        Err(e) => {
            debug!(query = req.query_string(), "Unreadable query string: {}", e);
            return None;
        }
    };

    pairs.into_iter().find(|(key, _)| key == name).map(|(_, value)| value)
}

/// `GET /customer?id=`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerQuery {
    pub id: Option<String>,
}

impl FromRequest for CustomerQuery {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self {
            id: first_query_value(req, "id"),
        }))
    }
}

/// `DELETE /records?cust_id=`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordsQuery {
    pub cust_id: Option<String>,
}

impl FromRequest for RecordsQuery {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self {
            cust_id: first_query_value(req, "cust_id"),
        }))
    }
}

/// Customer body, JSON or URL-encoded form. A body neither extractor
/// accepts arrives as `None`.
pub type CustomerBody = Option<Either<web::Json<CustomerDraft>, web::Form<CustomerDraft>>>;

/// Unwrap a customer body, treating an unreadable one as empty
pub fn into_draft(body: CustomerBody) -> CustomerDraft {
    match body {
        Some(Either::Left(json)) => json.into_inner(),
        Some(Either::Right(form)) => form.into_inner(),
        None => CustomerDraft::default(),
    }
}
