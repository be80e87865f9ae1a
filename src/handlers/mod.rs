//! HTTP handlers for resource CRUD, contact submissions, demo echoes and pages.

pub mod contact;
pub mod demo;
pub mod pages;
pub mod resource;
