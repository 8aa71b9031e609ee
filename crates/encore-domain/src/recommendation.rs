//! Genre ranking used by session playlists.

use std::collections::HashMap;

use crate::genre::Genre;

/// Number of genres a session playlist covers.
pub const TOP_GENRES: usize = 3;

/// Maximum number of similar artists returned for an artist profile.
pub const SIMILAR_ARTISTS_LIMIT: usize = 10;

/// Sum listen counts per genre.
pub fn aggregate_genres<I>(listens: I) -> HashMap<Genre, i64>
where
    I: IntoIterator<Item = (Genre, i64)>,
{
    let mut sums = HashMap::new();
    for (genre, count) in listens {
        *sums.entry(genre).or_insert(0) += count;
    }
    sums
}

/// Rank genres by summed count descending, ties broken by canonical genre order,
/// and keep the first `limit`.
pub fn top_genres(sums: &HashMap<Genre, i64>, limit: usize) -> Vec<Genre> {
    let mut ranked: Vec<(Genre, i64)> = sums.iter().map(|(g, c)| (*g, *c)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.into_iter().take(limit).map(|(g, _)| g).collect()
}
