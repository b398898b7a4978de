// Library exports for testing
pub mod cli;
pub mod config;
pub mod error;
pub mod folder_name;
pub mod grouper;
pub mod nfo;
pub mod organize;
pub mod renamer;
pub mod resolver;
pub mod show;
pub mod tmdb;
pub mod tokenizer;
