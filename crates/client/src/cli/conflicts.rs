//! Schedule conflict commands. These read a schedule snapshot from a JSON
//! file and never touch the network.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
pub struct ConflictsCommand {
    #[command(subcommand)]
    pub action: ConflictsAction,
}

#[derive(Debug, Subcommand)]
pub enum ConflictsAction {
    /// List every conflict in a schedule file.
    Check {
        /// Schedule JSON (events, campers, staff, rooms, certifications, enrolled, assigned).
        #[arg(long)]
        file: PathBuf,
    },
    /// Check whether a staff member is free for a time slot.
    Staff {
        #[arg(long)]
        file: PathBuf,
        /// Staff member ID.
        #[arg(long)]
        staff: String,
        /// Slot start (YYYY-MM-DDTHH:MM:SS).
        #[arg(long)]
        start: NaiveDateTime,
        /// Slot end (YYYY-MM-DDTHH:MM:SS).
        #[arg(long)]
        end: NaiveDateTime,
        /// Event being edited, ignored when looking for clashes.
        #[arg(long)]
        exclude: Option<String>,
    },
}
