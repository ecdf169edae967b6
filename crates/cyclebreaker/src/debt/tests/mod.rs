mod common;
mod import;
mod negotiation;
mod plan;
