//! Menu/catalog service.

use eyre::Result;

use mensa_primitives::Category;

use crate::connection::ConnectionInfo;

const CATEGORIES_PATH: &str = "api/catalog/categories/";

/// Read access to the published menu.
#[derive(Clone, Debug)]
pub struct MenuService {
    connection: ConnectionInfo,
}

impl MenuService {
    #[must_use]
    pub fn new(connection: ConnectionInfo) -> Self {
        Self { connection }
    }

    /// All active categories with their items, in display order.
    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.connection.get(CATEGORIES_PATH).await
    }
}
