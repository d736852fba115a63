//! # Tutorial: Encoding Requests with stencil
//!
//! Learn to declare endpoints and encode invocations step by step.
//!
//! ## Chapters
//!
//! 1. [Getting Started][chapter_0] - Your first endpoint
//! 2. [Aggregate Parameters][chapter_1] - `#[derive(Bindable)]`, pruning, headers
//! 3. [Bodies & Configuration][chapter_2] - Forms, query maps, profiles
//!
//! Ready? Start with [Chapter 0: Getting Started][chapter_0].

pub mod chapter_0;
pub mod chapter_1;
pub mod chapter_2;
