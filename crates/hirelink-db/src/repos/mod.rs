//! One repository per entity.

pub mod application;
pub mod company;
pub mod job;
pub mod profile;
pub mod saved_job;
pub mod user;
