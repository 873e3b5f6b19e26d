//! Business logic services.

pub mod auth;
pub mod comment;
pub mod feed;
pub mod like;
pub mod post;
pub mod schedule;
pub mod sorting;
pub mod storage;
pub mod todo;
pub mod user;
