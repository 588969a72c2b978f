//! The library code for `permaflat`, which post-processes the blog posts of a
//! static site before they are rendered. It does two things:
//!
//! 1. Flattens each post's hierarchical permalink (`/2023/01/title`) into a
//!    single segment (`2023-01-title`) ([`crate::permalink`])
//! 2. Orders the posts by flattened permalink, latest first, using
//!    locale-aware comparison ([`crate::collate`])
//!
//! [`crate::normalize::Normalizer`] combines the two and is the piece the
//! site generator's hook calls into, via [`crate::pipeline::run`] when driven
//! from the command line. Everything else about the site (routing,
//! rendering, search) belongs to the site generator.
//!
//! The normalizer is lenient by default: a permalink missing its leading
//! `/` is flattened anyway and only logged. Set `strict: true` in
//! `permaflat.yaml` ([`crate::config`]) to reject such posts instead.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod collate;
pub mod config;
pub mod normalize;
pub mod permalink;
pub mod pipeline;
pub mod post;
