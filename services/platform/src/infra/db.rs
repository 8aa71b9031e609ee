use std::collections::BTreeSet;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, FromQueryResult, Insert, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, SqlErr, TransactionError,
    TransactionTrait,
    sea_query::{Expr, Func, OnConflict, Query},
};
use uuid::Uuid;

use encore_domain::genre::Genre;
use encore_domain::pagination::PageRequest;
use encore_domain::user::{AccountStatus, UserRole};
use encore_platform_schema::{
    albums, listens, outbox_events, playlist_tracks, playlists, tracks, users,
};

use crate::domain::repository::{
    AlbumRepository, ListenRepository, PlaylistRepository, TrackRepository, UserRepository,
};
use crate::domain::types::{
    Album, ListenReportRow, OutboxEvent, Playlist, Track, TrackSearchField, User,
};
use crate::error::PlatformError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, PlatformError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model).transpose()?)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, PlatformError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model).transpose()?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PlatformError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model).transpose()?)
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, PlatformError> {
        let count = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .count(&self.db)
            .await
            .context("count users by username")?;
        Ok(count > 0)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, PlatformError> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await
            .context("count users by email")?;
        Ok(count > 0)
    }

    async fn create_with_outbox(
        &self,
        user: &User,
        event: &OutboxEvent,
    ) -> Result<(), PlatformError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let user = user.clone();
                let event = event.clone();
                Box::pin(async move {
                    user_to_active_model(&user).insert(txn).await?;
                    insert_outbox_event(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .map_err(|err| match err {
                TransactionError::Connection(e) | TransactionError::Transaction(e) => {
                    registration_error(e)
                }
            })?;
        Ok(())
    }

    async fn update_account(&self, user: &User) -> Result<(), PlatformError> {
        users::ActiveModel {
            id: Set(user.id),
            role: Set(i16::from(user.role.as_u8())),
            status: Set(i16::from(user.status.as_u8())),
            verified: Set(user.verified),
            verification_code: Set(user.verification_code.clone()),
            updated_at: Set(user.updated_at),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update user account")?;
        Ok(())
    }

    async fn delete_cascade(&self, id: Uuid) -> Result<bool, PlatformError> {
        // Foreign keys cascade to tracks, albums, playlists, listens and memberships.
        let res = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(res.rows_affected > 0)
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<User>, PlatformError> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::FirstName)
            .order_by_asc(users::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models
            .into_iter()
            .map(user_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn list_by_role(
        &self,
        role: UserRole,
        page: PageRequest,
    ) -> Result<Vec<User>, PlatformError> {
        let models = users::Entity::find()
            .filter(users::Column::Role.eq(i16::from(role.as_u8())))
            .order_by_asc(users::Column::FirstName)
            .order_by_asc(users::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list users by role")?;
        Ok(models
            .into_iter()
            .map(user_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn usernames_sharing_genres(
        &self,
        exclude: Uuid,
        genres: &[Genre],
        limit: usize,
    ) -> Result<Vec<String>, PlatformError> {
        if genres.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }
        let usernames = sharing_genres_query(exclude, genres, limit)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .context("find usernames sharing genres")?;
        Ok(usernames)
    }
}

/// Artists other than `exclude` with at least one track in `genres`, oldest account first.
fn sharing_genres_query(exclude: Uuid, genres: &[Genre], limit: usize) -> Select<users::Entity> {
    let genre_names: Vec<&str> = genres.iter().map(|g| g.as_str()).collect();
    users::Entity::find()
        .select_only()
        .column(users::Column::Username)
        .filter(users::Column::Id.ne(exclude))
        .filter(
            users::Column::Id.in_subquery(
                Query::select()
                    .column(tracks::Column::ArtistId)
                    .from(tracks::Entity)
                    .and_where(Expr::col(tracks::Column::Genre).is_in(genre_names))
                    .to_owned(),
            ),
        )
        .order_by_asc(users::Column::CreatedAt)
        .order_by_asc(users::Column::Id)
        .limit(limit as u64)
}

// Backs the exists_* pre-checks when two registrations race past them.
fn registration_error(err: DbErr) -> PlatformError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        if let Some(conflict) = conflict_for_constraint(&detail) {
            return conflict;
        }
    }
    PlatformError::Internal(anyhow::Error::new(err).context("create user with outbox"))
}

fn conflict_for_constraint(detail: &str) -> Option<PlatformError> {
    if detail.contains("users_username_key") {
        Some(PlatformError::UsernameTaken)
    } else if detail.contains("users_email_key") {
        Some(PlatformError::EmailTaken)
    } else {
        None
    }
}

fn user_from_model(model: users::Model) -> anyhow::Result<User> {
    let role = u8::try_from(model.role)
        .ok()
        .and_then(UserRole::from_u8)
        .with_context(|| format!("unknown stored role {} for user {}", model.role, model.id))?;
    let status = u8::try_from(model.status)
        .ok()
        .and_then(AccountStatus::from_u8)
        .with_context(|| format!("unknown stored status {} for user {}", model.status, model.id))?;
    Ok(User {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        username: model.username,
        email: model.email,
        birth_date: model.birth_date,
        password_hash: model.password_hash,
        role,
        status,
        verified: model.verified,
        verification_code: model.verification_code,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn user_to_active_model(user: &User) -> users::ActiveModel {
    users::ActiveModel {
        id: Set(user.id),
        first_name: Set(user.first_name.clone()),
        last_name: Set(user.last_name.clone()),
        username: Set(user.username.clone()),
        email: Set(user.email.clone()),
        birth_date: Set(user.birth_date),
        password_hash: Set(user.password_hash.clone()),
        role: Set(i16::from(user.role.as_u8())),
        status: Set(i16::from(user.status.as_u8())),
        verified: Set(user.verified),
        verification_code: Set(user.verification_code.clone()),
        created_at: Set(user.created_at),
        updated_at: Set(user.updated_at),
    }
}

async fn insert_outbox_event(
    txn: &DatabaseTransaction,
    event: &OutboxEvent,
) -> Result<(), sea_orm::DbErr> {
    let now = Utc::now();
    outbox_events::ActiveModel {
        id: Set(event.id),
        kind: Set(event.kind.clone()),
        payload: Set(event.payload.clone()),
        idempotency_key: Set(event.idempotency_key.clone()),
        attempts: Set(0),
        last_error: Set(None),
        created_at: Set(now),
        next_attempt_at: Set(now),
        processed_at: Set(None),
    }
    .insert(txn)
    .await?;
    Ok(())
}

// ── Track repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTrackRepository {
    pub db: DatabaseConnection,
}

impl DbTrackRepository {
    async fn page(
        &self,
        condition: Condition,
        page: PageRequest,
        what: &'static str,
    ) -> Result<Vec<Track>, PlatformError> {
        let models = tracks::Entity::find()
            .filter(condition)
            .order_by_asc(tracks::Column::CreatedAt)
            .order_by_asc(tracks::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context(what)?;
        Ok(models
            .into_iter()
            .map(track_from_model)
            .collect::<anyhow::Result<_>>()?)
    }
}

impl TrackRepository for DbTrackRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Track>, PlatformError> {
        let model = tracks::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find track by id")?;
        Ok(model.map(track_from_model).transpose()?)
    }

    async fn create(&self, track: &Track) -> Result<(), PlatformError> {
        tracks::ActiveModel {
            id: Set(track.id),
            artist_id: Set(track.artist_id),
            album_id: Set(track.album_id),
            title: Set(track.title.clone()),
            genre: Set(track.genre.as_str().to_owned()),
            duration_secs: Set(track.duration_secs),
            created_at: Set(track.created_at),
        }
        .insert(&self.db)
        .await
        .context("create track")?;
        Ok(())
    }

    async fn update_details(
        &self,
        id: Uuid,
        title: &str,
        duration_secs: i32,
    ) -> Result<(), PlatformError> {
        tracks::ActiveModel {
            id: Set(id),
            title: Set(title.to_owned()),
            duration_secs: Set(duration_secs),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update track details")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, PlatformError> {
        let res = tracks::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete track")?;
        Ok(res.rows_affected > 0)
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Track>, PlatformError> {
        self.page(Condition::all(), page, "list tracks").await
    }

    async fn search(
        &self,
        keyword: &str,
        field: TrackSearchField,
        page: PageRequest,
    ) -> Result<Vec<Track>, PlatformError> {
        let pattern = like_pattern(keyword);
        let title_matches = Expr::expr(Func::lower(Expr::col((
            tracks::Entity,
            tracks::Column::Title,
        ))))
        .like(pattern.clone());
        let artist_matches = tracks::Column::ArtistId.in_subquery(
            Query::select()
                .column(users::Column::Id)
                .from(users::Entity)
                .and_where(
                    Expr::expr(Func::lower(Expr::col((users::Entity, users::Column::Username))))
                        .like(pattern),
                )
                .to_owned(),
        );
        let condition = match field {
            TrackSearchField::Title => Condition::all().add(title_matches),
            TrackSearchField::Artist => Condition::all().add(artist_matches),
            TrackSearchField::Any => Condition::any().add(title_matches).add(artist_matches),
        };
        self.page(condition, page, "search tracks").await
    }

    async fn list_by_genre(
        &self,
        genre: Genre,
        page: PageRequest,
    ) -> Result<Vec<Track>, PlatformError> {
        let condition = Condition::all().add(tracks::Column::Genre.eq(genre.as_str()));
        self.page(condition, page, "list tracks by genre").await
    }

    async fn list_by_artist(
        &self,
        artist_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Track>, PlatformError> {
        let condition = Condition::all().add(tracks::Column::ArtistId.eq(artist_id));
        self.page(condition, page, "list tracks by artist").await
    }

    async fn genres_by_artist(&self, artist_id: Uuid) -> Result<Vec<Genre>, PlatformError> {
        let names = tracks::Entity::find()
            .select_only()
            .column(tracks::Column::Genre)
            .distinct()
            .filter(tracks::Column::ArtistId.eq(artist_id))
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .context("list genres by artist")?;
        let genres = names
            .iter()
            .map(|name| name.parse::<Genre>())
            .collect::<Result<BTreeSet<_>, _>>()
            .context("parse stored track genre")?;
        Ok(genres.into_iter().collect())
    }
}

fn track_from_model(model: tracks::Model) -> anyhow::Result<Track> {
    let genre = model
        .genre
        .parse::<Genre>()
        .with_context(|| format!("stored genre of track {}", model.id))?;
    Ok(Track {
        id: model.id,
        artist_id: model.artist_id,
        album_id: model.album_id,
        title: model.title,
        genre,
        duration_secs: model.duration_secs,
        created_at: model.created_at,
    })
}

/// Case-insensitive substring pattern with LIKE wildcards escaped.
fn like_pattern(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len() + 2);
    escaped.push('%');
    for c in keyword.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

// ── Album repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAlbumRepository {
    pub db: DatabaseConnection,
}

impl AlbumRepository for DbAlbumRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Album>, PlatformError> {
        let model = albums::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find album by id")?;
        Ok(model.map(album_from_model).transpose()?)
    }

    async fn create(&self, album: &Album) -> Result<(), PlatformError> {
        albums::ActiveModel {
            id: Set(album.id),
            artist_id: Set(album.artist_id),
            title: Set(album.title.clone()),
            description: Set(album.description.clone()),
            release_date: Set(album.release_date),
            genre: Set(album.genre.map(|g| g.as_str().to_owned())),
            created_at: Set(album.created_at),
        }
        .insert(&self.db)
        .await
        .context("create album")?;
        Ok(())
    }

    async fn update(&self, album: &Album) -> Result<(), PlatformError> {
        albums::ActiveModel {
            id: Set(album.id),
            title: Set(album.title.clone()),
            description: Set(album.description.clone()),
            release_date: Set(album.release_date),
            genre: Set(album.genre.map(|g| g.as_str().to_owned())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update album")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, PlatformError> {
        let res = albums::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete album")?;
        Ok(res.rows_affected > 0)
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Album>, PlatformError> {
        let models = albums::Entity::find()
            .order_by_asc(albums::Column::CreatedAt)
            .order_by_asc(albums::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list albums")?;
        Ok(models
            .into_iter()
            .map(album_from_model)
            .collect::<anyhow::Result<_>>()?)
    }
}

fn album_from_model(model: albums::Model) -> anyhow::Result<Album> {
    let genre = model
        .genre
        .as_deref()
        .map(str::parse::<Genre>)
        .transpose()
        .with_context(|| format!("stored genre of album {}", model.id))?;
    Ok(Album {
        id: model.id,
        artist_id: model.artist_id,
        title: model.title,
        description: model.description,
        release_date: model.release_date,
        genre,
        created_at: model.created_at,
    })
}

// ── Playlist repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPlaylistRepository {
    pub db: DatabaseConnection,
}

impl PlaylistRepository for DbPlaylistRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Playlist>, PlatformError> {
        let model = playlists::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find playlist by id")?;
        Ok(model.map(playlist_from_model))
    }

    async fn create(&self, playlist: &Playlist) -> Result<(), PlatformError> {
        playlists::ActiveModel {
            id: Set(playlist.id),
            owner_id: Set(playlist.owner_id),
            name: Set(playlist.name.clone()),
            description: Set(playlist.description.clone()),
            created_at: Set(playlist.created_at),
        }
        .insert(&self.db)
        .await
        .context("create playlist")?;
        Ok(())
    }

    async fn update(&self, playlist: &Playlist) -> Result<(), PlatformError> {
        playlists::ActiveModel {
            id: Set(playlist.id),
            name: Set(playlist.name.clone()),
            description: Set(playlist.description.clone()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update playlist")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, PlatformError> {
        let res = playlists::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete playlist")?;
        Ok(res.rows_affected > 0)
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Playlist>, PlatformError> {
        let models = playlists::Entity::find()
            .order_by_asc(playlists::Column::CreatedAt)
            .order_by_asc(playlists::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list playlists")?;
        Ok(models.into_iter().map(playlist_from_model).collect())
    }

    async fn tracks(&self, playlist_id: Uuid) -> Result<Vec<Track>, PlatformError> {
        let rows = playlist_tracks::Entity::find()
            .filter(playlist_tracks::Column::PlaylistId.eq(playlist_id))
            .order_by_asc(playlist_tracks::Column::Position)
            .find_also_related(tracks::Entity)
            .all(&self.db)
            .await
            .context("list playlist tracks")?;
        Ok(rows
            .into_iter()
            .filter_map(|(_, track)| track)
            .map(track_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn add_track(&self, playlist_id: Uuid, track_id: Uuid) -> Result<bool, PlatformError> {
        let inserted = self
            .db
            .transaction::<_, bool, sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    // Serializes concurrent appends to the same playlist.
                    lock_playlist(playlist_id).one(txn).await?;
                    let max = playlist_tracks::Entity::find()
                        .select_only()
                        .column_as(Expr::col(playlist_tracks::Column::Position).max(), "max")
                        .filter(playlist_tracks::Column::PlaylistId.eq(playlist_id))
                        .into_tuple::<Option<i32>>()
                        .one(txn)
                        .await?
                        .flatten();
                    let rows = playlist_tracks::Entity::insert(playlist_tracks::ActiveModel {
                        playlist_id: Set(playlist_id),
                        track_id: Set(track_id),
                        position: Set(next_position(max)?),
                        added_at: Set(Utc::now()),
                    })
                    .on_conflict(
                        OnConflict::columns([
                            playlist_tracks::Column::PlaylistId,
                            playlist_tracks::Column::TrackId,
                        ])
                        .do_nothing()
                        .to_owned(),
                    )
                    .exec_without_returning(txn)
                    .await?;
                    Ok(rows > 0)
                })
            })
            .await
            .context("add track to playlist")?;
        Ok(inserted)
    }
}

fn lock_playlist(id: Uuid) -> Select<playlists::Entity> {
    playlists::Entity::find_by_id(id).lock_exclusive()
}

fn next_position(max: Option<i32>) -> Result<i32, DbErr> {
    match max {
        None => Ok(0),
        Some(last) => last
            .checked_add(1)
            .ok_or_else(|| DbErr::Custom("playlist position overflow".to_owned())),
    }
}

fn playlist_from_model(model: playlists::Model) -> Playlist {
    Playlist {
        id: model.id,
        owner_id: model.owner_id,
        name: model.name,
        description: model.description,
        created_at: model.created_at,
    }
}

// ── Listen repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbListenRepository {
    pub db: DatabaseConnection,
}

// Single statement so concurrent plays never lose an increment.
fn listen_increment(listener_id: Uuid, track_id: Uuid) -> Insert<listens::ActiveModel> {
    listens::Entity::insert(listens::ActiveModel {
        id: Set(Uuid::now_v7()),
        listener_id: Set(listener_id),
        track_id: Set(track_id),
        count: Set(1),
    })
    .on_conflict(
        OnConflict::columns([listens::Column::ListenerId, listens::Column::TrackId])
            .value(
                listens::Column::Count,
                Expr::col((listens::Entity, listens::Column::Count)).add(1),
            )
            .to_owned(),
    )
}

#[derive(Debug, FromQueryResult)]
struct ReportRow {
    username: String,
    title: String,
    count: i64,
}

impl ListenRepository for DbListenRepository {
    async fn increment(&self, listener_id: Uuid, track_id: Uuid) -> Result<(), PlatformError> {
        listen_increment(listener_id, track_id)
            .exec_without_returning(&self.db)
        .await
        .context("increment listen counter")?;
        Ok(())
    }

    async fn genre_counts(&self, listener_id: Uuid) -> Result<Vec<(Genre, i64)>, PlatformError> {
        let rows = listens::Entity::find()
            .filter(listens::Column::ListenerId.eq(listener_id))
            .find_also_related(tracks::Entity)
            .all(&self.db)
            .await
            .context("list listens with tracks")?;
        let counts = rows
            .into_iter()
            .filter_map(|(listen, track)| track.map(|t| (t.genre, listen.count)))
            .map(|(genre, count)| {
                genre
                    .parse::<Genre>()
                    .map(|g| (g, count))
                    .context("parse stored track genre")
            })
            .collect::<anyhow::Result<_>>()?;
        Ok(counts)
    }

    async fn report(&self) -> Result<Vec<ListenReportRow>, PlatformError> {
        let rows = listens::Entity::find()
            .select_only()
            .column_as(users::Column::Username, "username")
            .column_as(tracks::Column::Title, "title")
            .column(listens::Column::Count)
            .join(JoinType::InnerJoin, listens::Relation::Listener.def())
            .join(JoinType::InnerJoin, listens::Relation::Track.def())
            .order_by_asc(users::Column::Username)
            .order_by_asc(tracks::Column::Title)
            .into_model::<ReportRow>()
            .all(&self.db)
            .await
            .context("load listen report")?;
        Ok(rows
            .into_iter()
            .map(|row| ListenReportRow {
                listener_username: row.username,
                track_title: row.title,
                count: row.count,
            })
            .collect())
    }
}
