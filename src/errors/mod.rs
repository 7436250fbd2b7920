//! Error types and error handling for the front end.
//!
//! This module defines the errors raised while turning source text into a
//! syntax tree. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing and parsing failures
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;
