//! Asset register and transaction submissions.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::clients::BackendError;
use crate::domain::{AssetId, AssetStatus, TransactionKind};
use crate::models::{
    Asset, AssetUpdate, Beban, Departemen, NewAsset, NewTransaction, Transaction,
    TransactionDetails,
};
use crate::services::backend::AssetApi;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl AssetError {
    fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Client-side filter for the asset list.
#[derive(Debug, Clone, Default)]
pub struct AssetFilter {
    pub status: Option<AssetStatus>,
    pub beban: Option<String>,
    /// Case-insensitive match against id, name and category.
    pub search: Option<String>,
}

impl AssetFilter {
    #[must_use]
    pub fn matches(&self, asset: &Asset) -> bool {
        if self.status.is_some() && asset.status != self.status {
            return false;
        }

        if let Some(beban) = &self.beban
            && asset.beban.as_deref() != Some(beban.as_str())
        {
            return false;
        }

        if let Some(term) = self.search.as_deref().map(str::to_lowercase) {
            let haystack = [
                Some(asset.aset_id.as_str()),
                asset.nama_aset.as_deref(),
                asset.kategori.as_deref(),
            ];
            return haystack
                .into_iter()
                .flatten()
                .any(|s| s.to_lowercase().contains(&term));
        }

        true
    }
}

pub struct AssetService<B> {
    backend: Arc<B>,
}

impl<B: AssetApi> AssetService<B> {
    #[must_use]
    pub const fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub async fn list(&self, filter: &AssetFilter) -> Result<Vec<Asset>, AssetError> {
        let assets = self.backend.list_assets().await?;
        Ok(assets.into_iter().filter(|a| filter.matches(a)).collect())
    }

    pub async fn get(&self, id: &AssetId) -> Result<Asset, AssetError> {
        Ok(self.backend.get_asset(id).await?)
    }

    pub async fn create(&self, asset: &NewAsset) -> Result<(), AssetError> {
        validate_new_asset(asset)?;
        self.backend.create_asset(asset).await?;
        info!(aset_id = %asset.aset_id, "Asset submitted");
        Ok(())
    }

    pub async fn update(&self, id: &AssetId, update: &AssetUpdate) -> Result<(), AssetError> {
        if update.is_empty() {
            return Err(AssetError::validation("Nothing to update"));
        }
        if update.nilai_aset.is_some_and(|v| !v.is_finite() || v < 0.0) {
            return Err(AssetError::validation("Asset value must be zero or more"));
        }
        self.backend.update_asset(id, update).await?;
        Ok(())
    }

    pub async fn transactions(&self, kind: TransactionKind) -> Result<Vec<Transaction>, AssetError> {
        Ok(self.backend.list_transactions(kind).await?)
    }

    pub async fn submit(&self, transaction: &NewTransaction) -> Result<(), AssetError> {
        validate_transaction(transaction)?;
        self.backend.submit_transaction(transaction).await?;
        info!(
            kind = %transaction.kind(),
            aset_id = %transaction.aset_id,
            "Transaction submitted for approval"
        );
        Ok(())
    }

    pub async fn beban(&self) -> Result<Vec<Beban>, AssetError> {
        Ok(self.backend.list_beban().await?)
    }

    pub async fn departemen(&self) -> Result<Vec<Departemen>, AssetError> {
        Ok(self.backend.list_departemen().await?)
    }
}

fn require(value: &str, what: &str) -> Result<(), AssetError> {
    if value.trim().is_empty() {
        return Err(AssetError::validation(format!("{what} cannot be empty")));
    }
    Ok(())
}

fn require_amount(value: f64, what: &str) -> Result<(), AssetError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AssetError::validation(format!("{what} must be zero or more")));
    }
    Ok(())
}

pub fn validate_new_asset(asset: &NewAsset) -> Result<(), AssetError> {
    require(asset.aset_id.as_str(), "Asset id")?;
    require(&asset.nama_aset, "Asset name")?;
    require(&asset.kategori, "Category")?;
    require(&asset.kode_akun, "Account code")?;
    require(&asset.beban, "Cost center")?;
    require(&asset.lokasi, "Location")?;
    require_amount(asset.nilai_aset, "Asset value")?;

    if asset.masa_manfaat == 0 {
        return Err(AssetError::validation("Useful life must be at least one month"));
    }

    Ok(())
}

pub fn validate_transaction(transaction: &NewTransaction) -> Result<(), AssetError> {
    require(transaction.aset_id.as_str(), "Asset id")?;
    require(&transaction.lokasi, "Location")?;

    match &transaction.details {
        TransactionDetails::Repair(repair) => {
            require(&repair.teknisi, "Technician")?;
            require_amount(repair.biaya, "Repair cost")
        }
        TransactionDetails::Damage(_) => Ok(()),
        TransactionDetails::Loan(loan) => {
            require(&loan.peminjam, "Borrower")?;
            if loan.tgl_kembali < loan.tgl_pinjam {
                return Err(AssetError::validation(
                    "Return date cannot be before the loan date",
                ));
            }
            Ok(())
        }
        TransactionDetails::Sale(sale) => require_amount(sale.harga_jual, "Sale price"),
        TransactionDetails::Transfer(transfer) => {
            require(&transfer.departemen_asal, "Origin department")?;
            require(&transfer.departemen_tujuan, "Destination department")?;
            if transfer
                .departemen_asal
                .trim()
                .eq_ignore_ascii_case(transfer.departemen_tujuan.trim())
            {
                return Err(AssetError::validation(
                    "Origin and destination departments must differ",
                ));
            }
            Ok(())
        }
    }
}
