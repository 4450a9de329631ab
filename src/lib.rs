pub mod cli;
pub mod clients;
pub mod config;
pub mod domain;
pub mod models;
pub mod normalize;
pub mod services;
pub mod session;

use chrono::{Local, NaiveDate};
use clap::Parser;

use cli::{
    ApprovalCommands, AssetCommands, Cli, CommandContext, Commands, NotificationCommands,
    ReferenceCommands, TransactionCommands, UserCommands,
};
pub use config::Config;
use models::{
    AssetUpdate, DamageDetails, LoanDetails, NewAsset, NewTransaction, NewUser, RepairDetails,
    SaleDetails, TransactionDetails, TransferDetails,
};
use services::AssetFilter;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub async fn run(config: Config) -> anyhow::Result<()> {
    config.validate()?;
    init_tracing(&config);

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    debug!(backend = %config.backend.base_url, "Starting");
    let ctx = CommandContext::new(config);

    match command {
        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("config.toml already exists.");
            }
            Ok(())
        }

        Commands::Login { username, password } => {
            let password = cli::password_or_prompt(password)?;
            cli::cmd_login(&ctx, &username, &password).await
        }
        Commands::Logout => cli::cmd_logout(&ctx),
        Commands::Whoami => cli::cmd_whoami(&ctx),

        Commands::Asset { command } => run_asset(&ctx, command).await,
        Commands::Transaction { command } => run_transaction(&ctx, command).await,

        Commands::Approval { command } => match command {
            ApprovalCommands::List => cli::cmd_approval_list(&ctx).await,
            ApprovalCommands::Show {
                tabel_ref,
                record_id,
            } => cli::cmd_approval_show(&ctx, tabel_ref, &record_id).await,
            ApprovalCommands::Approve {
                tabel_ref,
                record_id,
            } => cli::cmd_approve(&ctx, tabel_ref, &record_id).await,
            ApprovalCommands::Reject {
                tabel_ref,
                record_id,
                reason,
            } => cli::cmd_reject(&ctx, tabel_ref, &record_id, &reason).await,
        },

        Commands::Notification { command } => match command {
            NotificationCommands::List { unread } => cli::cmd_notification_list(&ctx, unread).await,
            NotificationCommands::Count => cli::cmd_notification_count(&ctx).await,
            NotificationCommands::Read { id } => cli::cmd_notification_read(&ctx, &id).await,
            NotificationCommands::ReadAll => cli::cmd_notification_read_all(&ctx).await,
            NotificationCommands::Delete { id } => cli::cmd_notification_delete(&ctx, &id).await,
        },

        Commands::User { command } => match command {
            UserCommands::List => cli::cmd_user_list(&ctx).await,
            UserCommands::Create {
                username,
                nama,
                password,
                role,
                beban,
            } => {
                let user = NewUser {
                    username,
                    nama,
                    role,
                    password: cli::password_or_prompt(password)?,
                    beban,
                };
                cli::cmd_user_create(&ctx, user).await
            }
            UserCommands::Beban { username, beban } => {
                cli::cmd_user_beban(&ctx, &username, &beban).await
            }
            UserCommands::Password { username, password } => {
                let password = cli::password_or_prompt(password)?;
                cli::cmd_user_password(&ctx, &username, &password).await
            }
        },

        Commands::Reference { command } => match command {
            ReferenceCommands::Beban => cli::cmd_reference_beban(&ctx).await,
            ReferenceCommands::Departemen => cli::cmd_reference_departemen(&ctx).await,
        },
    }
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    // stdout carries command output
    if config.general.log_format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run_asset(ctx: &CommandContext, command: AssetCommands) -> anyhow::Result<()> {
    match command {
        AssetCommands::List {
            status,
            beban,
            search,
        } => {
            let filter = AssetFilter {
                status,
                beban,
                search,
            };
            cli::cmd_asset_list(ctx, filter).await
        }
        AssetCommands::Show { id } => cli::cmd_asset_show(ctx, &id).await,
        AssetCommands::Add {
            id,
            nama,
            kategori,
            kode_akun,
            nilai,
            tgl_perolehan,
            masa_manfaat,
            beban,
            lokasi,
            gambar,
        } => {
            let asset = NewAsset {
                aset_id: id,
                nama_aset: nama,
                kategori,
                kode_akun,
                nilai_aset: nilai,
                tgl_perolehan,
                masa_manfaat,
                beban,
                lokasi,
                status: domain::AssetStatus::Aktif,
                gambar,
            };
            cli::cmd_asset_add(ctx, asset).await
        }
        AssetCommands::Update {
            id,
            status,
            nilai,
            lokasi,
            beban,
        } => {
            let update = AssetUpdate {
                status,
                nilai_aset: nilai,
                lokasi,
                beban,
            };
            cli::cmd_asset_update(ctx, &id, update).await
        }
    }
}

async fn run_transaction(ctx: &CommandContext, command: TransactionCommands) -> anyhow::Result<()> {
    let today = || -> NaiveDate { Local::now().date_naive() };

    let (aset_id, lokasi, details) = match command {
        TransactionCommands::List { kind } => return cli::cmd_transaction_list(ctx, kind).await,
        TransactionCommands::Repair {
            aset_id,
            lokasi,
            teknisi,
            biaya,
            tanggal,
            keterangan,
        } => (
            aset_id,
            lokasi,
            TransactionDetails::Repair(RepairDetails {
                tgl_perbaikan: tanggal.unwrap_or_else(today),
                teknisi,
                biaya,
                keterangan,
            }),
        ),
        TransactionCommands::Damage {
            aset_id,
            lokasi,
            tanggal,
            keterangan,
        } => (
            aset_id,
            lokasi,
            TransactionDetails::Damage(DamageDetails {
                tgl_rusak: tanggal.unwrap_or_else(today),
                keterangan,
            }),
        ),
        TransactionCommands::Loan {
            aset_id,
            lokasi,
            peminjam,
            tgl_pinjam,
            tgl_kembali,
        } => (
            aset_id,
            lokasi,
            TransactionDetails::Loan(LoanDetails {
                peminjam,
                tgl_pinjam: tgl_pinjam.unwrap_or_else(today),
                tgl_kembali,
            }),
        ),
        TransactionCommands::Sale {
            aset_id,
            lokasi,
            harga,
            tanggal,
            pembeli,
        } => (
            aset_id,
            lokasi,
            TransactionDetails::Sale(SaleDetails {
                tgl_jual: tanggal.unwrap_or_else(today),
                harga_jual: harga,
                pembeli,
            }),
        ),
        TransactionCommands::Transfer {
            aset_id,
            lokasi,
            dari,
            ke,
            tanggal,
        } => (
            aset_id,
            lokasi,
            TransactionDetails::Transfer(TransferDetails {
                departemen_asal: dari,
                departemen_tujuan: ke,
                tgl_mutasi: tanggal.unwrap_or_else(today),
            }),
        ),
    };

    let transaction = NewTransaction {
        aset_id,
        lokasi,
        details,
    };
    cli::cmd_transaction_submit(ctx, transaction).await
}
