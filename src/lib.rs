//! memsort library crate
//!
//! An in-memory table loaded from CSV, reordered by classic comparison sorts
//! and written back out. The library provides:
//!
//! - CSV loading and export with literal comma splitting
//! - A numeric-aware, case-insensitive row comparator over prioritized columns
//! - Bubble, insertion, merge and quick sort over table rows
//! - The fixed school/sex/age grouping sorts
//! - A tiny `select ... order by ... with <sort>` command interpreter
//! - An interactive console menu tying it together

pub mod cli;
pub mod command;
pub mod compare;
pub mod config;
pub mod csv_handler;
pub mod error;
pub mod legacy;
pub mod menu;
pub mod sort;
pub mod table;
