pub mod builders;
pub mod commands;
pub mod services;
