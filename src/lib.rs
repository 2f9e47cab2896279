//! cleanup-rules: rule engine for flagging unreleased cloud-client resources
//!
//! Defines which client types must be released and where that requirement is
//! waived, matches paths against those waivers, and manages the lifecycle of
//! rule files with an audited change history.

pub mod cli;
pub mod config;
pub mod domain;
pub mod service;
