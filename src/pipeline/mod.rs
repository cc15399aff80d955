//! Pipeline stages for PDF image extraction and reporting.
//!
//! Each submodule implements exactly one step, so each is testable on its
//! own and the report generator in [`crate::report`] only composes them.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ encode ──▶ markdown
//! (paths)   (lopdf)     (base64)   (report text)
//! ```
//!
//! 1. [`input`]     validate user-supplied paths (`.pdf`, exists, `%PDF`)
//! 2. [`extract`]   pull image XObjects out of every page, optionally save them
//! 3. [`encode`]    standard Base64 for bytes and files
//! 4. [`markdown`]  string builders for each report section

pub mod encode;
pub mod extract;
pub mod input;
pub mod markdown;
