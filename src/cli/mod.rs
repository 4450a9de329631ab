//! CLI module - Command-line interface for Asetrack
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::domain::{AssetId, AssetStatus, NotificationId, RecordId, Role, TabelRef, TransactionKind};

/// Asetrack - Asset Management Admin Client
/// Tracks assets and reviews repair, damage, loan, sale and transfer submissions
#[derive(Parser)]
#[command(name = "asetrack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the default config file
    Init,

    /// Log in and store the session
    ///
    /// The password is read from stdin unless given by flag or
    /// ASETRACK_PASSWORD. Flags end up in shell history.
    Login {
        username: String,
        #[arg(long, short, env = "ASETRACK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in user
    #[command(alias = "me")]
    Whoami,

    /// Browse and register assets
    #[command(alias = "aset")]
    Asset {
        #[command(subcommand)]
        command: AssetCommands,
    },

    /// List and submit transactions
    #[command(alias = "tx")]
    Transaction {
        #[command(subcommand)]
        command: TransactionCommands,
    },

    /// Review pending submissions (admin)
    #[command(alias = "approvals")]
    Approval {
        #[command(subcommand)]
        command: ApprovalCommands,
    },

    /// Notification feed
    #[command(alias = "notif", alias = "n")]
    Notification {
        #[command(subcommand)]
        command: NotificationCommands,
    },

    /// Manage users (admin)
    #[command(alias = "users")]
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Reference lists
    #[command(alias = "ref")]
    Reference {
        #[command(subcommand)]
        command: ReferenceCommands,
    },
}

#[derive(Subcommand)]
pub enum AssetCommands {
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        status: Option<AssetStatus>,
        #[arg(long)]
        beban: Option<String>,
        /// Matches id, name or category
        #[arg(long, short)]
        search: Option<String>,
    },
    Show {
        id: AssetId,
    },
    Add {
        id: AssetId,
        #[arg(long)]
        nama: String,
        #[arg(long)]
        kategori: String,
        #[arg(long)]
        kode_akun: String,
        #[arg(long)]
        nilai: f64,
        /// Acquisition date (YYYY-MM-DD)
        #[arg(long)]
        tgl_perolehan: NaiveDate,
        /// Useful life in months
        #[arg(long)]
        masa_manfaat: u32,
        #[arg(long)]
        beban: String,
        #[arg(long)]
        lokasi: String,
        #[arg(long)]
        gambar: Option<String>,
    },
    Update {
        id: AssetId,
        #[arg(long)]
        status: Option<AssetStatus>,
        #[arg(long)]
        nilai: Option<f64>,
        #[arg(long)]
        lokasi: Option<String>,
        #[arg(long)]
        beban: Option<String>,
    },
}

/// Dates default to today when omitted.
#[derive(Subcommand)]
pub enum TransactionCommands {
    #[command(alias = "ls")]
    List {
        kind: TransactionKind,
    },
    Repair {
        aset_id: AssetId,
        #[arg(long)]
        lokasi: String,
        #[arg(long)]
        teknisi: String,
        #[arg(long)]
        biaya: f64,
        #[arg(long)]
        tanggal: Option<NaiveDate>,
        #[arg(long)]
        keterangan: Option<String>,
    },
    Damage {
        aset_id: AssetId,
        #[arg(long)]
        lokasi: String,
        #[arg(long)]
        tanggal: Option<NaiveDate>,
        #[arg(long)]
        keterangan: Option<String>,
    },
    Loan {
        aset_id: AssetId,
        #[arg(long)]
        lokasi: String,
        #[arg(long)]
        peminjam: String,
        #[arg(long)]
        tgl_pinjam: Option<NaiveDate>,
        #[arg(long)]
        tgl_kembali: NaiveDate,
    },
    Sale {
        aset_id: AssetId,
        #[arg(long)]
        lokasi: String,
        #[arg(long)]
        harga: f64,
        #[arg(long)]
        tanggal: Option<NaiveDate>,
        #[arg(long)]
        pembeli: Option<String>,
    },
    Transfer {
        aset_id: AssetId,
        #[arg(long)]
        lokasi: String,
        #[arg(long)]
        dari: String,
        #[arg(long)]
        ke: String,
        #[arg(long)]
        tanggal: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
pub enum ApprovalCommands {
    /// Pending records grouped by type
    #[command(alias = "ls")]
    List,
    Show {
        tabel_ref: TabelRef,
        record_id: RecordId,
    },
    Approve {
        tabel_ref: TabelRef,
        record_id: RecordId,
    },
    Reject {
        tabel_ref: TabelRef,
        record_id: RecordId,
        #[arg(long, short)]
        reason: String,
    },
}

#[derive(Subcommand)]
pub enum NotificationCommands {
    #[command(alias = "ls")]
    List {
        #[arg(long, short)]
        unread: bool,
    },
    Count,
    Read {
        id: NotificationId,
    },
    ReadAll,
    #[command(alias = "rm")]
    Delete {
        id: NotificationId,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(alias = "ls")]
    List,
    Create {
        username: String,
        #[arg(long)]
        nama: String,
        /// Read from stdin when omitted
        #[arg(long, short, env = "ASETRACK_NEW_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        #[arg(long, default_value = "user")]
        role: Role,
        /// Cost centers, comma separated
        #[arg(long, value_delimiter = ',')]
        beban: Vec<String>,
    },
    /// Replace a user's cost centers
    Beban {
        username: String,
        #[arg(value_delimiter = ',', required = true)]
        beban: Vec<String>,
    },
    /// Reset a user's password, read from stdin when not given
    Password {
        username: String,
        #[arg(long, short, env = "ASETRACK_NEW_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ReferenceCommands {
    Beban,
    Departemen,
}

pub use commands::*;
