use super::CommandContext;
use crate::services::AssetService;

pub async fn cmd_reference_beban(ctx: &CommandContext) -> anyhow::Result<()> {
    let service = AssetService::new(ctx.client()?);
    for beban in service.beban().await? {
        println!("{:<10} {}", beban.kode, beban.nama.as_deref().unwrap_or(""));
    }
    Ok(())
}

pub async fn cmd_reference_departemen(ctx: &CommandContext) -> anyhow::Result<()> {
    let service = AssetService::new(ctx.client()?);
    for departemen in service.departemen().await? {
        let id = departemen.id.as_ref().map_or("-", |id| id.as_str());
        println!("{id:<6} {}", departemen.nama.as_deref().unwrap_or(""));
    }
    Ok(())
}
