//! Request extractors for login initiation.
//!
//! Normalization of an OIDC third-party-initiated login request: the
//! platform may deliver parameters as a form-encoded (or multipart) POST
//! body or as URL query parameters. The parameter source is resolved once,
//! from the declared content type alone; a form-shaped request never falls
//! back to the query string.

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header;
use axum_extra::extract::Multipart;

use crate::error::LaunchError;
use crate::models::{FieldMap, LoginParams, ParamSource};

/// Content shape of the inbound request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyEncoding {
    UrlEncoded,
    Multipart,
    Other,
}

fn body_encoding(req: &Request) -> BodyEncoding {
    let Some(content_type) = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return BodyEncoding::Other;
    };
    // Ignore parameters such as charset or boundary
    let mime = content_type.split(';').next().unwrap_or("").trim();
    if mime.eq_ignore_ascii_case("application/x-www-form-urlencoded") {
        BodyEncoding::UrlEncoded
    } else if mime.eq_ignore_ascii_case("multipart/form-data") {
        BodyEncoding::Multipart
    } else {
        BodyEncoding::Other
    }
}

/// Resolve the request's parameter collection.
///
/// Form content types read the body and fail with
/// [`LaunchError::RequestMalformed`] when no field collection can be
/// obtained. Every other request reads the query string, where an absent
/// query is simply an empty collection.
async fn resolve_param_source(req: Request) -> Result<ParamSource, LaunchError> {
    match body_encoding(&req) {
        BodyEncoding::UrlEncoded => {
            let bytes = Bytes::from_request(req, &()).await.map_err(|e| {
                LaunchError::RequestMalformed(format!("Unreadable form body: {e}"))
            })?;
            let fields = url::form_urlencoded::parse(&bytes).collect();
            Ok(ParamSource::Form(fields))
        }
        BodyEncoding::Multipart => {
            let mut multipart = Multipart::from_request(req, &()).await.map_err(|e| {
                LaunchError::RequestMalformed(format!("Unreadable multipart body: {e}"))
            })?;
            let mut fields = FieldMap::new();
            while let Some(field) = multipart.next_field().await.map_err(|e| {
                LaunchError::RequestMalformed(format!("Malformed multipart field: {e}"))
            })? {
                let Some(name) = field.name().map(ToString::to_string) else {
                    continue;
                };
                let value = field.text().await.map_err(|e| {
                    LaunchError::RequestMalformed(format!("Malformed multipart field: {e}"))
                })?;
                fields.insert(name, value);
            }
            Ok(ParamSource::Form(fields))
        }
        BodyEncoding::Other => {
            let query = req.uri().query().unwrap_or("");
            let fields = url::form_urlencoded::parse(query.as_bytes()).collect();
            Ok(ParamSource::Query(fields))
        }
    }
}

/// Normalized login initiation parameters, extracted from the form body
/// or the query string.
#[derive(Debug)]
pub struct LoginInitiation(pub LoginParams);

#[async_trait]
impl<S> FromRequest<S> for LoginInitiation
where
    S: Send + Sync,
{
    type Rejection = LaunchError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let source = resolve_param_source(req).await?;
        Ok(Self(source.into_login_params()))
    }
}
