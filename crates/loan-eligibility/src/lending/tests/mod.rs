mod common;
mod history;
mod rules;
