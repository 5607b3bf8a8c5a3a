mod auth;
mod retry;
mod snow_client;
