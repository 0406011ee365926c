// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    /// No post matched the requested id.
    #[error("post not found")]
    NotFound,
    /// Highest-id reduction over an empty `posts` sequence.
    #[error("cannot derive the next id: posts is empty")]
    EmptyCollection,
    /// The post holding the highest id has no integer id to increment.
    #[error("cannot derive the next id: highest post has no integer id")]
    MissingId,
    /// The next id does not fit in an i64.
    #[error("post id overflow")]
    Overflow,
}

pub type KernelResult<T> = core::result::Result<T, KernelError>;
pub type Result<T> = KernelResult<T>;
