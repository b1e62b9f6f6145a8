//! This crate implements the lexical analysis phase. This phase is responsible for tokenizing the
//! source text into a stream of classified tokens.
//!
//! The final output of this phase is a [`token_stream::TokenStream`], which always ends with a
//! single end of tokens marker.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod error;
pub mod lexer;
pub mod token;
pub mod token_stream;
