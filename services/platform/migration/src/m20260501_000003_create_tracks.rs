use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tracks::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tracks::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Tracks::ArtistId).uuid().not_null())
                    .col(ColumnDef::new(Tracks::AlbumId).uuid())
                    .col(ColumnDef::new(Tracks::Title).string().not_null())
                    .col(ColumnDef::new(Tracks::Genre).string().not_null())
                    .col(
                        ColumnDef::new(Tracks::DurationSecs)
                            .integer()
                            .not_null()
                            .check(Expr::col(Tracks::DurationSecs).gte(1)),
                    )
                    .col(
                        ColumnDef::new(Tracks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Tracks::Table, Tracks::ArtistId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Tracks::Table, Tracks::AlbumId)
                            .to(Albums::Table, Albums::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tracks::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Tracks {
    Table,
    Id,
    ArtistId,
    AlbumId,
    Title,
    Genre,
    DurationSecs,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Albums {
    Table,
    Id,
}
