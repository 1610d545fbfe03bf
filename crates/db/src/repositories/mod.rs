//! Repositories: one struct of static query methods per table group.

pub mod audit_repo;
pub mod dashboard_repo;
pub mod order_repo;
pub mod product_repo;
pub mod sale_repo;
pub mod session_repo;
pub mod stock_history_repo;
pub mod user_repo;

pub use audit_repo::AuditLogRepo;
pub use dashboard_repo::DashboardRepo;
pub use order_repo::OrderRepo;
pub use product_repo::ProductRepo;
pub use sale_repo::SaleRepo;
pub use session_repo::SessionRepo;
pub use stock_history_repo::StockHistoryRepo;
pub use user_repo::UserRepo;
