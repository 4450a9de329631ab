//! Asset command handlers

use super::CommandContext;
use crate::domain::AssetId;
use crate::models::{Asset, AssetUpdate, NewAsset};
use crate::services::{AssetFilter, AssetService};

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

fn format_rupiah(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("Rp {v:.0}"))
}

pub async fn cmd_asset_list(ctx: &CommandContext, filter: AssetFilter) -> anyhow::Result<()> {
    let service = AssetService::new(ctx.client()?);
    let assets = service.list(&filter).await?;

    if assets.is_empty() {
        println!("No assets found.");
        return Ok(());
    }

    println!("Assets ({} total)", assets.len());
    println!("{:-<90}", "");

    for asset in &assets {
        let status = asset.status.map_or("?", |s| s.as_str());
        println!(
            "{:<18} {:<32} {:<12} {:>16}",
            asset.aset_id.as_str(),
            asset.display_name(),
            status,
            format_rupiah(asset.nilai_aset)
        );
        println!(
            "  Kategori: {} | Beban: {} | Lokasi: {}",
            or_dash(asset.kategori.as_deref()),
            or_dash(asset.beban.as_deref()),
            or_dash(asset.lokasi.as_deref())
        );
    }

    Ok(())
}

pub async fn cmd_asset_show(ctx: &CommandContext, id: &AssetId) -> anyhow::Result<()> {
    let service = AssetService::new(ctx.client()?);
    let asset = service.get(id).await?;
    print_asset(&asset);
    Ok(())
}

fn print_asset(asset: &Asset) {
    println!("{}", asset.display_name());
    println!("{:-<60}", "");
    println!("ID:            {}", asset.aset_id);
    println!("Kategori:      {}", or_dash(asset.kategori.as_deref()));
    println!("Kode akun:     {}", or_dash(asset.kode_akun.as_deref()));
    println!("Nilai:         {}", format_rupiah(asset.nilai_aset));
    println!("Perolehan:     {}", or_dash(asset.tgl_perolehan.as_deref()));
    if let Some(months) = asset.masa_manfaat {
        println!("Masa manfaat:  {months} bulan");
    }
    println!("Beban:         {}", or_dash(asset.beban.as_deref()));
    println!("Lokasi:        {}", or_dash(asset.lokasi.as_deref()));
    println!(
        "Status:        {}",
        asset.status.map_or("-", |s| s.as_str())
    );
    if let Some(approval) = asset.approval_status {
        println!("Approval:      {approval}");
    }
}

pub async fn cmd_asset_add(ctx: &CommandContext, asset: NewAsset) -> anyhow::Result<()> {
    let service = AssetService::new(ctx.client()?);
    service.create(&asset).await?;
    println!("✓ Asset {} submitted; awaiting approval.", asset.aset_id);
    Ok(())
}

pub async fn cmd_asset_update(
    ctx: &CommandContext,
    id: &AssetId,
    update: AssetUpdate,
) -> anyhow::Result<()> {
    let service = AssetService::new(ctx.client()?);
    service.update(id, &update).await?;
    println!("✓ Asset {id} updated.");
    Ok(())
}
