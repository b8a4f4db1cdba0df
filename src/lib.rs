pub mod cli_args;
mod error;
mod extractor;
mod middleware;
mod route;
pub mod server;
mod state;
pub mod store;
pub mod types;

#[cfg(test)]
mod test;
