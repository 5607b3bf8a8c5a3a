mod context;
mod report;
mod snow_client;
mod template;
