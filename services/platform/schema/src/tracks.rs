use sea_orm::entity::prelude::*;

/// Published track. `genre` stores the `Genre` wire name and never changes after upload.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tracks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub artist_id: Uuid,
    pub album_id: Option<Uuid>,
    pub title: String,
    pub genre: String,
    pub duration_secs: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ArtistId",
        to = "super::users::Column::Id"
    )]
    Artist,
    #[sea_orm(
        belongs_to = "super::albums::Entity",
        from = "Column::AlbumId",
        to = "super::albums::Column::Id"
    )]
    Album,
    #[sea_orm(has_many = "super::listens::Entity")]
    Listens,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Artist.def()
    }
}

impl Related<super::albums::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Album.def()
    }
}

impl Related<super::listens::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Listens.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
