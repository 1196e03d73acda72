//! ATM recommender server.
//!
//! A web application that answers: "which nearby cash machines of my
//! network are most likely to still have money?" It suggests the nearest
//! stations and learns from every suggestion it makes.

pub mod catalog;
pub mod domain;
pub mod recommend;
pub mod session;
pub mod web;
