mod args;
mod error;
mod logger;
mod run;
