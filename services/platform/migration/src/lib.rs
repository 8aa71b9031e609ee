use sea_orm_migration::prelude::*;

mod m20260501_000001_create_users;
mod m20260501_000002_create_albums;
mod m20260501_000003_create_tracks;
mod m20260501_000004_create_listens;
mod m20260501_000005_create_playlists;
mod m20260501_000006_create_playlist_tracks;
mod m20260501_000007_create_outbox_events;
mod m20260501_000008_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260501_000001_create_users::Migration),
            Box::new(m20260501_000002_create_albums::Migration),
            Box::new(m20260501_000003_create_tracks::Migration),
            Box::new(m20260501_000004_create_listens::Migration),
            Box::new(m20260501_000005_create_playlists::Migration),
            Box::new(m20260501_000006_create_playlist_tracks::Migration),
            Box::new(m20260501_000007_create_outbox_events::Migration),
            Box::new(m20260501_000008_add_lookup_indexes::Migration),
        ]
    }
}
