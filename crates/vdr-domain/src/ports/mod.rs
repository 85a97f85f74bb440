//! Domain ports (interfaces to external collaborators)

pub mod providers;
