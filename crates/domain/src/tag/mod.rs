mod phone_number;
mod registry;
mod repository;
mod tag_name;

pub use phone_number::{MAX_DIGITS, MEMBER_ID_SUFFIX, MIN_DIGITS, PhoneNumber, Validation};
pub use registry::{AdditionReport, Registry, RemovalReport, RenameReport};
pub use repository::RegistryRepository;
pub use tag_name::TagName;
