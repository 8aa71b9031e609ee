use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Albums::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Albums::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Albums::ArtistId).uuid().not_null())
                    .col(ColumnDef::new(Albums::Title).string().not_null())
                    .col(ColumnDef::new(Albums::Description).text())
                    .col(ColumnDef::new(Albums::ReleaseDate).date())
                    .col(ColumnDef::new(Albums::Genre).string())
                    .col(
                        ColumnDef::new(Albums::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Albums::Table, Albums::ArtistId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Albums::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Albums {
    Table,
    Id,
    ArtistId,
    Title,
    Description,
    ReleaseDate,
    Genre,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
