use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Listens::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Listens::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Listens::ListenerId).uuid().not_null())
                    .col(ColumnDef::new(Listens::TrackId).uuid().not_null())
                    .col(
                        ColumnDef::new(Listens::Count)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Listens::Count).gte(0)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Listens::Table, Listens::ListenerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Listens::Table, Listens::TrackId)
                            .to(Tracks::Table, Tracks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Target of the play-count upsert (ON CONFLICT (listener_id, track_id)).
        manager
            .create_index(
                Index::create()
                    .table(Listens::Table)
                    .col(Listens::ListenerId)
                    .col(Listens::TrackId)
                    .unique()
                    .name("uq_listens_listener_id_track_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Listens::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Listens {
    Table,
    Id,
    ListenerId,
    TrackId,
    Count,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Tracks {
    Table,
    Id,
}
