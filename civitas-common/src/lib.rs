//! # Civitas Common Library
//!
//! Shared code for the Civitas services including:
//! - Text assist engine (summarize, proofread, rewrite, translate, strategy prompts)
//! - Mesh record sync merge policy
//! - Database models and queries for reports and alerts
//! - Event types (CivitasEvent) and the broadcast EventBus
//! - Configuration loading

pub mod assist;
pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod sse;
pub mod sync;

pub use assist::{FallbackAssist, TextAssist};
pub use error::{Error, Result};
pub use sync::merge::{merge_records, ExternalRecord, SyncRecord};
