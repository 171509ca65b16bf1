//! Slack Integration - webhook payloads and outbound calls
//!
//! This crate provides the Slack interface for bugline:
//! - **Payloads** (`payloads`) - inbound slash-command and dialog-submission
//!   wire types with strict parsing
//! - **Dialogs** (`dialog`) - the bug-report dialog descriptor and builder
//! - **Gateway** (`api`) - outbound `dialog.open` and response-URL posts
//!
//! # Getting Started
//!
//! 1. Create a Slack app at https://api.slack.com/apps
//! 2. Add a slash command (e.g. `/report-bug`) pointing at the command route
//! 3. Enable Interactivity pointing at the interactive route
//! 4. Configure `slack.verification_token` and `slack.access_token`
//!
//! # Key Types
//!
//! - `SlashCommandRequest` / `DialogSubmission` - parsed inbound payloads
//! - `Dialog` + `bug_report_dialog` - the fixed three-field report form
//! - `ChatGateway` - trait seam over the Slack Web API calls

pub mod api;
pub mod dialog;
pub mod payloads;
