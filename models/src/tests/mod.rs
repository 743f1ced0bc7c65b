mod keyword;
mod paper;
