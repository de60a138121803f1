//! EduManage: a school-management dashboard over simulated data stores.
//!
//! The [`store`] module holds the in-memory grade, attendance, calendar and
//! weather services; [`session`] tracks the logged-in user; [`views`] renders
//! the role-aware dashboard tabs; [`api`] exposes the stores as JSON.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod store;
pub mod views;
