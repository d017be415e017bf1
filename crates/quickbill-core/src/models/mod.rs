//! Data models for QuickBill documents.

pub mod config;
pub mod document;
pub mod item;
