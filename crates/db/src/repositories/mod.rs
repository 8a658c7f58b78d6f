//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod ledger_repo;
pub mod reservation_repo;
pub mod space_image_repo;
pub mod space_repo;
pub mod user_repo;

pub use ledger_repo::LedgerRepo;
pub use reservation_repo::ReservationRepo;
pub use space_image_repo::SpaceImageRepo;
pub use space_repo::SpaceRepo;
pub use user_repo::UserRepo;
