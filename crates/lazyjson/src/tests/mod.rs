mod arbitrary;

mod objects;
mod threads;
