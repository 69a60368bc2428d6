//! Integration tests for the agents administration core

mod console_flow;
mod http_client;
mod predicate_editor;
mod profile_sync;
mod support;
