pub mod mysql;
pub mod pool;
pub mod repository;
pub mod update;

pub use mysql::MySqlStore;
pub use repository::{CategoryRepository, NewProduct, NewUser, ProductRepository, UserRepository};
pub use update::{SqlValue, UpdateSet};
