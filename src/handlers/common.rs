use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct PaginationParams {
    #[param(default = 20, minimum = 1, maximum = 100)]
    pub limit: Option<i64>,
    #[param(default = 0, minimum = 0)]
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Clamp to the supported page size and offset
    pub fn resolve(&self) -> (u64, u64) {
        let limit = self.limit.unwrap_or(20).clamp(1, 100) as u64;
        let offset = self.offset.unwrap_or(0).max(0) as u64;
        (limit, offset)
    }
}
