pub mod static_roster;

pub use static_roster::StaticGroupRoster;
