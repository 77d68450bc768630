use http::{Request, Response};
use pin_project::pin_project;
use serde::de::DeserializeOwned;

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};
use tower::{Layer, Service};

use crate::{error_handler::ErrorHandler, gateway::AuthGateway};

pub struct AuthGatewayLayer<ResBody, Claims> {
    gateway: AuthGateway<Claims>,
    error_handler: Arc<dyn ErrorHandler<ResBody>>,
}

impl<ResBody, Claims> Clone for AuthGatewayLayer<ResBody, Claims>
where
    Claims: Clone,
{
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            error_handler: self.error_handler.clone(),
        }
    }
}

impl<ResBody, Claims> AuthGatewayLayer<ResBody, Claims> {
    pub(crate) fn new(
        gateway: AuthGateway<Claims>,
        error_handler: Arc<dyn ErrorHandler<ResBody>>,
    ) -> Self {
        AuthGatewayLayer {
            gateway,
            error_handler,
        }
    }
}

impl<S, ResBody, Claims> Layer<S> for AuthGatewayLayer<ResBody, Claims>
where
    Claims: Clone + DeserializeOwned + Send + 'static,
{
    type Service = AuthGatewayService<S, ResBody, Claims>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthGatewayService::new(inner, self.gateway.clone(), self.error_handler.clone())
    }
}

pub struct AuthGatewayService<S, ResBody, Claims> {
    inner: S,
    gateway: AuthGateway<Claims>,
    error_handler: Arc<dyn ErrorHandler<ResBody>>,
}

impl<S, ResBody, Claims> Clone for AuthGatewayService<S, ResBody, Claims>
where
    S: Clone,
    Claims: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            gateway: self.gateway.clone(),
            error_handler: self.error_handler.clone(),
        }
    }
}

impl<S, ResBody, Claims> AuthGatewayService<S, ResBody, Claims> {
    fn new(
        inner: S,
        gateway: AuthGateway<Claims>,
        error_handler: Arc<dyn ErrorHandler<ResBody>>,
    ) -> Self {
        Self {
            inner,
            gateway,
            error_handler,
        }
    }
}

impl<S, ReqBody, ResBody, Claims> Service<Request<ReqBody>>
    for AuthGatewayService<S, ResBody, Claims>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    Claims: Clone + DeserializeOwned + Send + Sync + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = ResponseFuture<S::Future, ResBody>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        // Authorization is a synchronous check, so the decision is made
        // here and the future only has to forward or short-circuit.
        match self.gateway.authorize_request(request) {
            Ok(request) => ResponseFuture::authorized(self.inner.call(request)),
            Err(error) => ResponseFuture::rejected(self.error_handler.map_error(error)),
        }
    }
}

#[pin_project]
pub struct ResponseFuture<F, ResBody> {
    #[pin]
    state: State<F, ResBody>,
}

#[pin_project(project = StateProj)]
enum State<F, ResBody> {
    Authorized {
        #[pin]
        fut: F,
    },
    Rejected {
        response: Option<Response<ResBody>>,
    },
}

impl<F, ResBody> ResponseFuture<F, ResBody> {
    fn authorized(fut: F) -> Self {
        ResponseFuture {
            state: State::Authorized { fut },
        }
    }

    fn rejected(response: Response<ResBody>) -> Self {
        ResponseFuture {
            state: State::Rejected {
                response: Some(response),
            },
        }
    }
}

impl<F, ResBody, E> Future for ResponseFuture<F, ResBody>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = Result<Response<ResBody>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.project().state.project() {
            StateProj::Authorized { fut } => fut.poll(cx),
            StateProj::Rejected { response } => Poll::Ready(Ok(response
                .take()
                .expect("ResponseFuture polled after completion"))),
        }
    }
}
