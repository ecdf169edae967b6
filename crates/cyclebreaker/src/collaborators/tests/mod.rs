mod common;
mod extraction;
mod posting;
