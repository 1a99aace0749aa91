#![forbid(unsafe_code)]
//! Core types and helpers for mailforge.
//!
//! This crate carries everything the pipeline stages share:
//! - Error taxonomy ([`error`])
//! - Data models for raw records and wire-shaped output ([`models`])
//! - Run configuration with injectable heuristic tables ([`config`])
//! - Deterministic content-addressed IDs ([`ident`])
//! - Multi-format date parsing ([`dates`])
//! - Address extraction and display-name synthesis ([`addr`])
//! - Transfer-encoding repair ([`encoding`])
//!
//! No pipeline logic lives here; stages are in `mailforge-pipeline` and the
//! binary surface in `mailforge-cli`.

pub mod addr;
pub mod config;
pub mod dates;
pub mod encoding;
pub mod error;
pub mod ident;
pub mod models;

pub use config::{Config, LabelRules};
pub use error::{Error, Result};
pub use models::{
    CorpusMetadata, DateRange, ListMessagesResponse, MessageBody, MessageHeader, MessagePart,
    MessageRef, OutputMessage, Persona, RawRecord, RunStatistics,
};
