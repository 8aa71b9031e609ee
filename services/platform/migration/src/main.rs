use sea_orm_migration::prelude::*;

use encore_platform_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
