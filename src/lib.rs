pub mod app;
pub mod autocomplete;
pub mod cli;
pub mod client;
pub mod config;
pub mod controller;
pub mod facts;
pub mod output;
pub mod pagination;
pub mod view;

#[cfg(test)]
mod tests;
