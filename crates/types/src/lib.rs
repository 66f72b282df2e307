pub mod auth;
pub mod chart;
pub mod column;
pub mod guard;
pub mod post;
pub mod validation;
