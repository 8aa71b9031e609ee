use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use encore_core::health::{healthz, readyz};
use encore_core::middleware::{catch_panic_layer, propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    account::{get_artist_profile, get_me, list_users, login, register, verify_email},
    admin::{block_user, delete_user, list_users_by_role, promote_user, unblock_user},
    album::{admin_delete_album, create_album, delete_album, get_album, list_albums, update_album},
    playlist::{
        add_track_to_playlist, admin_create_playlist, admin_delete_playlist,
        admin_update_playlist, create_playlist, delete_playlist, get_playlist, list_playlists,
        update_playlist,
    },
    session::get_session_playlists,
    track::{
        admin_delete_track, delete_track, list_tracks, list_tracks_by_artist,
        list_tracks_by_genre, play_track, search_tracks, update_track, upload_track,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Accounts
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route("/users/verify", post(verify_email))
        .route("/users", get(list_users))
        .route("/users/@me", get(get_me))
        .route("/users/{id}/artist-profile", get(get_artist_profile))
        .route("/users/{id}/tracks", get(list_tracks_by_artist))
        // Recommendations
        .route("/session/playlists", get(get_session_playlists))
        // Tracks
        .route("/tracks", get(list_tracks).post(upload_track))
        .route("/tracks/search", get(search_tracks))
        .route(
            "/tracks/{id}",
            get(play_track).patch(update_track).delete(delete_track),
        )
        .route("/genres/{genre}/tracks", get(list_tracks_by_genre))
        // Albums
        .route("/albums", get(list_albums).post(create_album))
        .route(
            "/albums/{id}",
            get(get_album).put(update_album).delete(delete_album),
        )
        // Playlists
        .route("/playlists", get(list_playlists).post(create_playlist))
        .route(
            "/playlists/{id}",
            get(get_playlist)
                .put(update_playlist)
                .delete(delete_playlist),
        )
        .route("/playlists/{id}/tracks", post(add_track_to_playlist))
        // Admin
        .route("/admin/users", get(list_users_by_role))
        .route("/admin/users/{id}", delete(delete_user))
        .route("/admin/users/{id}/promote", post(promote_user))
        .route("/admin/users/{id}/block", post(block_user))
        .route("/admin/users/{id}/unblock", post(unblock_user))
        .route("/admin/albums/{id}", delete(admin_delete_album))
        .route("/admin/tracks/{id}", delete(admin_delete_track))
        .route("/admin/playlists", post(admin_create_playlist))
        .route(
            "/admin/playlists/{id}",
            put(admin_update_playlist).delete(admin_delete_playlist),
        )
        .layer(catch_panic_layer())
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
