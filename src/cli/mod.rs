// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the dalil command-line interface.
//!
//! Three subcommands: `index` to check how a catalog tokenizes, `search` to run
//! one query with optional filters, and `replay` to push a recorded keystroke
//! script through the debounced controller.

pub mod display;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dalil",
    about = "Search a directory of establishments from the terminal",
    version
)]
pub struct Cli {
    /// Path to a JSON search configuration
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug events to stderr (overridden by DALIL_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the index for a catalog and print per-field statistics
    Index {
        /// Catalog JSON (array of establishments or {"establishments": [...]})
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Run one query against a catalog
    Search {
        /// Catalog JSON
        #[arg(short, long)]
        input: PathBuf,

        /// Search query
        query: String,

        /// Only this category code (e.g. "sante")
        #[arg(long)]
        category: Option<String>,

        /// Only this governorate code (e.g. "sfax")
        #[arg(long)]
        governorate: Option<String>,

        /// Only this Tunis district code (e.g. "el-menzah"); needs --governorate tunis
        #[arg(long)]
        district: Option<String>,

        /// Minimum rating, 0 to 5
        #[arg(long)]
        min_rating: Option<f32>,

        /// Only verified establishments
        #[arg(long)]
        verified: bool,

        /// Only premium establishments
        #[arg(long)]
        premium: bool,

        /// Label table JSON ({"code": "Label"}); defaults to built-in French labels
        #[arg(long)]
        labels: Option<PathBuf>,

        /// Maximum number of results to print (defaults to maxResults)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Replay a keystroke script through the debounced controller
    ///
    /// Each script line is `<ms> <text>`; a line with only `<ms>` clears the
    /// input. Runs on a virtual clock, so it finishes immediately.
    Replay {
        /// Catalog JSON
        #[arg(short, long)]
        input: PathBuf,

        /// Keystroke script
        #[arg(short, long)]
        script: PathBuf,

        /// Label table JSON; defaults to built-in French labels
        #[arg(long)]
        labels: Option<PathBuf>,
    },
}
