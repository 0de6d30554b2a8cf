/// Database connectivity
///
/// - `pool`: Connection pool construction and health check
/// - `migrations`: Schema bootstrap (documents and view_signatures tables)

pub mod migrations;
pub mod pool;
