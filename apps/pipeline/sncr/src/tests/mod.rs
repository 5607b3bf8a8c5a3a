// Unit tests for the pipeline step binary's own wiring.

mod cli;
mod error;
mod logger;
