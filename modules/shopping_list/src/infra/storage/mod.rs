pub mod entity;
pub mod file_repo;
pub mod mapper;
pub mod memory_repo;
pub mod migrations;
pub mod sea_orm_repo;

pub use file_repo::FileRepository;
pub use memory_repo::MemoryRepository;
pub use migrations::Migrator;
pub use sea_orm_repo::SeaOrmItemsRepository;
