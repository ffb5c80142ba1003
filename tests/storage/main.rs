//! Integration tests for Layer 1: Storage
//!
//! Tests for rooms, the room store, exit linking, attributes, templates, and
//! prefixes.

mod store;
mod templates;
