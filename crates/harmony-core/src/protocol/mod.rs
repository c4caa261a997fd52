//! Protocol layer for hub communication.
//!
//! This module handles building command frames and parsing response frames.

pub mod commands;
pub mod response;
