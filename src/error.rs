// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// Represents errors that can occur when constructing a container
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// A constructor parameter was out of range (name of the parameter)
    InvalidParameter(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BiasedSearchError: {self:?}")
    }
}

impl std::error::Error for Error {}

/// Container result
pub type Result<T> = std::result::Result<T, Error>;
