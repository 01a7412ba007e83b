use deadpool_sqlite::Pool;

#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: Pool,
}
