// src/lib.rs

//! Game review crawler library.
//!
//! Paginates a review listing, follows each title's detail page and
//! extracts scores, consensus and release metadata into `GameRecord`s.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
