use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Session playlists page tracks of one genre in (created_at, id) order.
        manager
            .create_index(
                Index::create()
                    .table(Tracks::Table)
                    .col(Tracks::Genre)
                    .col(Tracks::CreatedAt)
                    .col(Tracks::Id)
                    .name("idx_tracks_genre_created_at_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Tracks::Table)
                    .col(Tracks::ArtistId)
                    .name("idx_tracks_artist_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(PlaylistTracks::Table)
                    .col(PlaylistTracks::TrackId)
                    .name("idx_playlist_tracks_track_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_playlist_tracks_track_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_tracks_artist_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_tracks_genre_created_at_id").to_owned())
            .await
    }
}

#[derive(Iden)]
enum Tracks {
    Table,
    Id,
    ArtistId,
    Genre,
    CreatedAt,
}

#[derive(Iden)]
enum PlaylistTracks {
    Table,
    TrackId,
}
