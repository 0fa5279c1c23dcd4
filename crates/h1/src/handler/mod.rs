//! Request handlers.
//!
//! A [`Handler`] receives the head of a request together with its fully read
//! body and answers with a [`ResponseHead`]. Plain async functions become
//! handlers through [`make_handler`].

use std::error::Error;

use async_trait::async_trait;
use bytes::Bytes;

use crate::protocol::{MessageHead, ResponseHead};

#[async_trait]
pub trait Handler: Send + Sync {
    type Error: Into<Box<dyn Error + Send + Sync>>;

    async fn call(&self, head: MessageHead, body: Bytes) -> Result<ResponseHead, Self::Error>;
}

#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

#[async_trait]
impl<Err, F, Fut> Handler for HandlerFn<F>
where
    F: Fn(MessageHead, Bytes) -> Fut + Send + Sync,
    Err: Into<Box<dyn Error + Send + Sync>>,
    Fut: Future<Output = Result<ResponseHead, Err>> + Send,
{
    type Error = Err;

    async fn call(&self, head: MessageHead, body: Bytes) -> Result<ResponseHead, Self::Error> {
        (self.f)(head, body).await
    }
}

pub fn make_handler<F, Err, Ret>(f: F) -> HandlerFn<F>
where
    Err: Into<Box<dyn Error + Send + Sync>>,
    Ret: Future<Output = Result<ResponseHead, Err>>,
    F: Fn(MessageHead, Bytes) -> Ret,
{
    HandlerFn { f }
}
