/// View (secondary index) definitions
///
/// Each view is a partial Postgres index over the `documents` table,
/// defined here as a static list so the whole set is known at compile time
/// and synced in one startup pass. The full `CREATE INDEX` statement doubles
/// as the view's definition signature: any change to the statement text is
/// a definition change and forces a drop-and-rebuild on the next startup.
///
/// The persisted signatures live in the `view_signatures` table, written by
/// [`sync_views`](crate::store::pg::PgStore) after each successful build.

/// A single view definition
#[derive(Debug, Clone, Copy)]
pub struct ViewDef {
    /// Index name, also the key in `view_signatures`
    pub name: &'static str,

    /// Full DDL for the index; also serves as the definition signature
    pub create_sql: &'static str,
}

impl ViewDef {
    /// The definition signature persisted after a successful sync
    pub fn signature(&self) -> &'static str {
        self.create_sql
    }
}

/// All views the service depends on
///
/// - `users_by_username`: uniqueness lookup and the username listing
/// - `articles_by_created`: global reverse-chronological listing
/// - `articles_by_owner_created`: per-owner reverse-chronological listing
pub const VIEWS: &[ViewDef] = &[
    ViewDef {
        name: "users_by_username",
        create_sql: "CREATE INDEX users_by_username \
                     ON documents ((body->>'username')) \
                     WHERE collection = 'users'",
    },
    ViewDef {
        name: "articles_by_created",
        create_sql: "CREATE INDEX articles_by_created \
                     ON documents (created DESC) \
                     WHERE collection = 'articles'",
    },
    ViewDef {
        name: "articles_by_owner_created",
        create_sql: "CREATE INDEX articles_by_owner_created \
                     ON documents ((body->>'username'), created DESC) \
                     WHERE collection = 'articles'",
    },
];
