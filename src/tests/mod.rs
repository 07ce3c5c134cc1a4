#[macro_use]
mod util;

mod tree;
mod parser;
mod render;
mod navigation;
mod selection;
