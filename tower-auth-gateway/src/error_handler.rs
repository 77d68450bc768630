use http::{header::WWW_AUTHENTICATE, HeaderValue, Response, StatusCode};

use crate::error::AuthError;

/// Maps authentication failures to terminal responses.
pub trait ErrorHandler<B>: Send + Sync {
    fn map_error(&self, error: AuthError) -> Response<B>;
}

/// Responds with an empty 401, adding `WWW-Authenticate: Bearer` when the
/// request carried no usable bearer credential at all.
pub struct DefaultErrorHandler;

impl<B> ErrorHandler<B> for DefaultErrorHandler
where
    B: Default,
{
    fn map_error(&self, error: AuthError) -> Response<B> {
        let mut response = Response::builder()
            .status(StatusCode::UNAUTHORIZED)
            .body(B::default())
            .unwrap();
        if error == AuthError::MissingAuthorizationHeader
            || error == AuthError::InvalidAuthorizationHeader
        {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
